//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the solver / tracer / simulator / returns pipelines
//! - prints reports and optional ASCII charts
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, NullclineArgs, ParamArgs, ReturnsArgs, SimulateArgs, SteadyArgs};
use crate::domain::{InitialConditions, ModelParameters, Shock};
use crate::error::AppError;
use crate::solve::{SolveOptions, TraceOptions};

pub mod pipeline;

/// Entry point for the `solow` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `solow` (and `solow --seed 7`) to behave like
    // `solow steady ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the convenient default.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Steady(args) => handle_steady(args),
        Command::Nullclines(args) => handle_nullclines(args),
        Command::Simulate(args) => handle_simulate(args),
        Command::Returns(args) => handle_returns(args),
    }
}

fn handle_steady(args: SteadyArgs) -> Result<(), AppError> {
    let params = model_params_from_args(&args.params);
    let opts = SolveOptions {
        num_guesses: args.guesses,
        bounds: [args.low, args.high],
        seed: args.seed,
        sampling: args.sampling,
        ..SolveOptions::default()
    };

    let steady = crate::solve::multi_start(&params, &opts)?;
    println!("{}", crate::report::format_steady_state(&params, &opts, &steady));
    Ok(())
}

fn handle_nullclines(args: NullclineArgs) -> Result<(), AppError> {
    let params = model_params_from_args(&args.params);
    let opts = TraceOptions {
        k_max: args.k_max,
        k_points: args.points,
        epsilon: args.epsilon,
        h_max: args.h_max,
        ..TraceOptions::default()
    };

    let run = pipeline::run_null_clines(&params, &opts)?;
    println!(
        "{}",
        crate::report::format_null_clines(&params, &run.clines, run.intersection.as_ref())
    );

    if args.plot {
        let chart = crate::plot::render_null_cline_chart(
            &run.clines,
            run.intersection.as_ref(),
            args.width,
            args.height,
        );
        println!("{chart}");
    }

    Ok(())
}

fn handle_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let params = model_params_from_args(&args.params);
    let initial = InitialConditions {
        l0: args.l0,
        a0: args.a0,
        k0: args.k0,
        h0: args.h0,
    };
    let shock = args.shock_period.map(|period| Shock {
        period,
        magnitude: args.shock_size,
    });

    let path = crate::sim::simulate(&params, &initial, args.horizon, shock)?;
    println!("{}", crate::report::format_growth_path(&params, &path));

    if args.plot {
        println!("{}", crate::plot::render_path_chart(&path, args.width, args.height));
    }
    if let Some(export) = &args.export {
        crate::io::write_path_csv(export, &path)?;
    }

    Ok(())
}

fn handle_returns(args: ReturnsArgs) -> Result<(), AppError> {
    let source = match &args.csv {
        Some(path) => pipeline::PriceSource::Csv(path.clone()),
        None => pipeline::PriceSource::Synthetic(crate::data::SampleConfig {
            months: args.months,
            assets: args.assets,
            seed: args.seed,
        }),
    };

    let weights = args
        .weights
        .as_deref()
        .map(parse_weights)
        .transpose()?;
    let run = pipeline::run_returns(&source, weights.as_deref())?;

    for err in &run.row_errors {
        eprintln!("line {}: {}", err.line, err.message);
    }

    println!(
        "{}",
        crate::report::format_returns_summary(&run.source, &run.cumulative, run.portfolio.as_deref())
    );

    if args.plot {
        let stock = resolve_stock_column(&args, &run)?;
        let benchmark = run.cumulative.column(&args.benchmark).ok_or_else(|| {
            AppError::bad_input(format!(
                "Benchmark column '{}' not found; available: {}.",
                args.benchmark,
                run.cumulative.column_names().join(", ")
            ))
        })?;
        let series = run.cumulative.column(&stock).ok_or_else(|| {
            AppError::bad_input(format!(
                "Series column '{stock}' not found; available: {}.",
                run.cumulative.column_names().join(", ")
            ))
        })?;
        let chart = crate::plot::render_comparison_chart(
            1,
            &series.name,
            &series.values,
            &benchmark.name,
            &benchmark.values,
            args.width,
            args.height,
        );
        println!("{chart}");
    }

    if args.scatter {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        let mut labels = Vec::new();
        for col in &run.simple.columns {
            if let Some((mean, vol)) = crate::data::mean_and_volatility(&col.values) {
                xs.push(vol);
                ys.push(mean);
                labels.push(col.name.as_str());
            }
        }
        let chart = crate::plot::render_scatter(
            "Risk/return by series (x: volatility, y: mean return)",
            &xs,
            &ys,
            &labels,
            args.width,
            args.height,
        );
        println!("{chart}");
    }

    Ok(())
}

fn model_params_from_args(args: &ParamArgs) -> ModelParameters {
    ModelParameters {
        s_k: args.s_k,
        s_h: args.s_h,
        n: args.n,
        g: args.g,
        delta: args.delta,
        alpha: args.alpha,
        varphi: args.varphi,
    }
}

/// Parse comma-separated portfolio weights.
fn parse_weights(raw: &str) -> Result<Vec<f64>, AppError> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| AppError::bad_input(format!("Bad weight '{part}': {e}")))
        })
        .collect()
}

/// Pick the highlighted series for the comparison chart: the explicit
/// `--stock` flag, else the first non-benchmark column.
fn resolve_stock_column(args: &ReturnsArgs, run: &pipeline::ReturnsRun) -> Result<String, AppError> {
    if let Some(stock) = &args.stock {
        return Ok(stock.clone());
    }
    run.cumulative
        .columns
        .iter()
        .map(|c| c.name.clone())
        .find(|name| name != &args.benchmark)
        .ok_or_else(|| {
            AppError::no_data("No non-benchmark column available for the comparison chart.")
        })
}

/// Rewrite argv so `solow` defaults to `solow steady`.
///
/// Rules:
/// - `solow`                     -> `solow steady`
/// - `solow --seed 7 ...`        -> `solow steady --seed 7 ...`
/// - `solow --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("steady".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "steady" | "nullclines" | "simulate" | "returns"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "steady flags".
    if arg1.starts_with('-') {
        argv.insert(1, "steady".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_vec(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_steady() {
        assert_eq!(rewrite_args(to_vec(&["solow"])), to_vec(&["solow", "steady"]));
    }

    #[test]
    fn leading_flag_is_treated_as_steady_flags() {
        assert_eq!(
            rewrite_args(to_vec(&["solow", "--seed", "7"])),
            to_vec(&["solow", "steady", "--seed", "7"])
        );
    }

    #[test]
    fn explicit_subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(to_vec(&["solow", "simulate"])),
            to_vec(&["solow", "simulate"])
        );
        assert_eq!(
            rewrite_args(to_vec(&["solow", "--help"])),
            to_vec(&["solow", "--help"])
        );
    }

    #[test]
    fn weights_parse_and_reject_garbage() {
        assert_eq!(parse_weights("1, 2,3").unwrap(), vec![1.0, 2.0, 3.0]);
        assert!(parse_weights("1,abc").is_err());
    }
}
