//! Command-line parsing for the Solow toolkit.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::GuessSampling;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "solow",
    version,
    about = "Solow growth-model toolkit and asset-return helpers"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Solve for steady-state capital and human capital via multi-start root finding.
    Steady(SteadyArgs),
    /// Trace both null-clines over a capital grid and locate their crossing.
    Nullclines(NullclineArgs),
    /// Simulate a finite-horizon growth transition path, optionally with a savings shock.
    Simulate(SimulateArgs),
    /// Compute simple, cumulative, and portfolio returns over a price table.
    Returns(ReturnsArgs),
}

/// Model parameters shared by every model subcommand.
#[derive(Debug, Parser, Clone)]
pub struct ParamArgs {
    /// Savings rate in physical capital.
    #[arg(long, default_value_t = 0.2)]
    pub s_k: f64,

    /// Savings rate in human capital.
    #[arg(long, default_value_t = 0.15)]
    pub s_h: f64,

    /// Population growth rate.
    #[arg(long, default_value_t = 0.02)]
    pub n: f64,

    /// Technology growth rate.
    #[arg(long, default_value_t = 0.02)]
    pub g: f64,

    /// Depreciation rate.
    #[arg(long, default_value_t = 0.1)]
    pub delta: f64,

    /// Output elasticity of physical capital.
    #[arg(long, default_value_t = 1.0 / 3.0)]
    pub alpha: f64,

    /// Output elasticity of human capital.
    #[arg(long, default_value_t = 1.0 / 3.0)]
    pub varphi: f64,
}

/// Options for the steady-state solver.
#[derive(Debug, Parser, Clone)]
pub struct SteadyArgs {
    #[command(flatten)]
    pub params: ParamArgs,

    /// Number of random starting pairs.
    #[arg(long, default_value_t = 100)]
    pub guesses: usize,

    /// Lower bound for starting-pair sampling.
    #[arg(long, default_value_t = 0.1)]
    pub low: f64,

    /// Upper bound for starting-pair sampling.
    #[arg(long, default_value_t = 10.0)]
    pub high: f64,

    /// Random seed for starting-pair sampling.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// How starting pairs are drawn (shared-pool reproduces historical runs).
    #[arg(long, value_enum, default_value_t = GuessSampling::Independent)]
    pub sampling: GuessSampling,
}

/// Options for the null-cline sweep.
#[derive(Debug, Parser, Clone)]
pub struct NullclineArgs {
    #[command(flatten)]
    pub params: ParamArgs,

    /// Upper end of the capital grid.
    #[arg(long, default_value_t = 10.0)]
    pub k_max: f64,

    /// Number of capital grid points.
    #[arg(long, default_value_t = 100)]
    pub points: usize,

    /// Small positive lower end for the grid and root bracket.
    #[arg(long, default_value_t = 1e-4)]
    pub epsilon: f64,

    /// Upper end of the human-capital root bracket (defaults to k-max).
    #[arg(long)]
    pub h_max: Option<f64>,

    /// Render an ASCII chart of both curves.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for the growth-path simulator.
#[derive(Debug, Parser, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub params: ParamArgs,

    /// Number of periods to simulate.
    #[arg(long, default_value_t = 100)]
    pub horizon: usize,

    /// Initial labor force.
    #[arg(long, default_value_t = 1.0)]
    pub l0: f64,

    /// Initial technology level.
    #[arg(long, default_value_t = 1.0)]
    pub a0: f64,

    /// Initial physical capital stock.
    #[arg(long, default_value_t = 1.0)]
    pub k0: f64,

    /// Initial human capital stock.
    #[arg(long, default_value_t = 1.0)]
    pub h0: f64,

    /// Period at which the human-capital savings rate shock applies.
    #[arg(long)]
    pub shock_period: Option<usize>,

    /// Magnitude added to s_h from the shock period onward.
    #[arg(long, default_value_t = 0.05)]
    pub shock_size: f64,

    /// Render an ASCII chart of the path.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the per-period path to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Options for the returns helpers.
#[derive(Debug, Parser, Clone)]
pub struct ReturnsArgs {
    /// Price CSV (date column first, one numeric column per series).
    /// Omitted: a seeded synthetic table is generated instead.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Months of synthetic data when no CSV is given.
    #[arg(long, default_value_t = 120)]
    pub months: usize,

    /// Synthetic asset columns when no CSV is given.
    #[arg(long, default_value_t = 4)]
    pub assets: usize,

    /// Random seed for synthetic data.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Comma-separated portfolio weights, one per table column.
    #[arg(long)]
    pub weights: Option<String>,

    /// Series to highlight in the comparison chart (defaults to the first
    /// non-benchmark column).
    #[arg(long)]
    pub stock: Option<String>,

    /// Benchmark column for the comparison chart.
    #[arg(long, default_value = "INDEX")]
    pub benchmark: String,

    /// Render the cumulative-return comparison chart.
    #[arg(long)]
    pub plot: bool,

    /// Render the annotated risk/return scatter.
    #[arg(long)]
    pub scatter: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
