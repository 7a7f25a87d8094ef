//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during solving and simulation
//! - exported to CSV
//! - rendered by the report/plot front-ends

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Parameters of the Solow model with human capital.
///
/// All values are real scalars. There is no validation beyond what the
/// equations naturally enforce: non-physical values simply produce
/// non-convergent or negative residuals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Savings rate in physical capital.
    pub s_k: f64,
    /// Savings rate in human capital.
    pub s_h: f64,
    /// Population growth rate.
    pub n: f64,
    /// Technology (TFP) growth rate.
    pub g: f64,
    /// Depreciation rate.
    pub delta: f64,
    /// Output elasticity of physical capital.
    pub alpha: f64,
    /// Output elasticity of human capital.
    pub varphi: f64,
}

impl ModelParameters {
    /// Break-even investment term `n + g + delta + n*g`.
    ///
    /// Savings below this level (per unit of the stock) shrink the
    /// technology-adjusted stock.
    pub fn breakeven(&self) -> f64 {
        self.n + self.g + self.delta + self.n * self.g
    }

    /// Growth discount `1 / ((1+n)(1+g))` applied to both accumulation
    /// equations.
    pub fn growth_discount(&self) -> f64 {
        1.0 / ((1.0 + self.n) * (1.0 + self.g))
    }
}

/// How the multi-start solver draws its random starting pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GuessSampling {
    /// Draw an independent uniform pair per guess (default).
    Independent,
    /// Draw one pool of `num_guesses` uniform samples and form each starting
    /// pair from two distinct pool entries.
    ///
    /// This reproduces the historical sampling scheme where guesses share a
    /// sample pool and are therefore not fully independent. Only useful when
    /// runs must be comparable with results produced under that scheme.
    SharedPool,
}

/// One steady-state attempt: a candidate point plus its residual norm.
///
/// Candidates are ephemeral; the multi-start solver discards all but the best.
#[derive(Debug, Clone, Copy)]
pub struct SteadyStateCandidate {
    pub k: f64,
    pub h: f64,
    pub residual_norm: f64,
}

/// Best steady state found across all attempts.
///
/// A large `residual_norm` means no attempt converged; callers that need a
/// quality guarantee should check it against their own threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SteadyState {
    /// Technology-adjusted capital per worker at the steady state.
    pub k: f64,
    /// Technology-adjusted human capital per worker at the steady state.
    pub h: f64,
    /// Euclidean norm of the residual at `(k, h)`.
    pub residual_norm: f64,
}

/// Two null-cline curves sampled over a shared capital grid.
///
/// Curves may contain NaN gaps where the bracket did not straddle a root;
/// `bracket_failures` counts those points for the once-per-sweep warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NullClines {
    /// Evenly spaced capital grid.
    pub k_grid: Vec<f64>,
    /// Human capital that zeroes the capital accumulation equation at each
    /// grid point.
    pub h_on_k_null: Vec<f64>,
    /// Human capital that zeroes the human-capital accumulation equation at
    /// each grid point.
    pub h_on_h_null: Vec<f64>,
    /// Grid points where at least one bracket failed to straddle a root.
    pub bracket_failures: usize,
}

impl NullClines {
    /// Diagnostic for the sweep, surfaced at most once regardless of how many
    /// grid points failed.
    pub fn bracket_warning(&self) -> Option<String> {
        if self.bracket_failures == 0 {
            return None;
        }
        Some(format!(
            "warning: bracket did not straddle a root at {} of {} grid points; recorded NaN and continued",
            self.bracket_failures,
            self.k_grid.len()
        ))
    }
}

/// Point where two sampled curves cross, reported at the last grid index
/// before the sign change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Intersection {
    pub k: f64,
    pub h_on_k: f64,
    pub h_on_h: f64,
}

/// Initial stocks and scale factors for a simulation run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InitialConditions {
    /// Initial labor force.
    pub l0: f64,
    /// Initial technology level.
    pub a0: f64,
    /// Initial physical capital stock.
    pub k0: f64,
    /// Initial human capital stock.
    pub h0: f64,
}

/// One-time, permanent increase of the human-capital savings rate.
///
/// The increment applies from `period` onward and is never reverted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shock {
    pub period: usize,
    pub magnitude: f64,
}

/// Technology-adjusted per-capita quantities for one period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PathPoint {
    pub k_pc: f64,
    pub h_pc: f64,
    pub y_pc: f64,
}

/// A full transition path over a fixed horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthPath {
    pub points: Vec<PathPoint>,
    pub shock: Option<Shock>,
}

/// A named numeric series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

/// A small date-indexed table of named numeric series.
///
/// Used both for price inputs and for derived return tables (where the first
/// row of each column is NaN).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesTable {
    pub dates: Vec<NaiveDate>,
    pub columns: Vec<Column>,
}

impl SeriesTable {
    /// Build a table, checking that every column matches the date index.
    pub fn new(dates: Vec<NaiveDate>, columns: Vec<Column>) -> Result<Self, AppError> {
        for col in &columns {
            if col.values.len() != dates.len() {
                return Err(AppError::bad_input(format!(
                    "Column '{}' has {} rows but the date index has {}.",
                    col.name,
                    col.values.len(),
                    dates.len()
                )));
            }
        }
        Ok(Self { dates, columns })
    }

    pub fn n_rows(&self) -> usize {
        self.dates.len()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}
