//! Shared pipelines for the multi-step commands.
//!
//! Keeping these in one place avoids duplicating the workflows:
//! trace -> intersect (null-clines) and ingest/synthesize -> returns ->
//! portfolio (returns). The CLI front-end then focuses on presentation.

use std::path::PathBuf;

use crate::data::{
    cumulative_returns, generate_price_table, portfolio_returns, simple_returns, SampleConfig,
};
use crate::domain::{Intersection, ModelParameters, NullClines, SeriesTable};
use crate::error::AppError;
use crate::io::ingest::{load_price_table, RowError};
use crate::solve::{find_intersection, null_clines, TraceOptions};

/// All computed outputs of a null-cline run.
#[derive(Debug, Clone)]
pub struct NullClineRun {
    pub clines: NullClines,
    /// `None` when the curves never cross on the grid; the library-level
    /// `find_intersection` error is demoted to a reportable absence here so
    /// the sweep output still prints.
    pub intersection: Option<Intersection>,
}

/// Trace the null-clines and attempt the crossing lookup.
pub fn run_null_clines(
    params: &ModelParameters,
    opts: &TraceOptions,
) -> Result<NullClineRun, AppError> {
    let clines = null_clines(params, opts)?;
    let intersection =
        find_intersection(&clines.k_grid, &clines.h_on_k_null, &clines.h_on_h_null).ok();
    Ok(NullClineRun {
        clines,
        intersection,
    })
}

/// Where the price table for a returns run comes from.
#[derive(Debug, Clone)]
pub enum PriceSource {
    Csv(PathBuf),
    Synthetic(SampleConfig),
}

/// All computed outputs of a returns run.
#[derive(Debug, Clone)]
pub struct ReturnsRun {
    /// Human-readable description of the input for the report header.
    pub source: String,
    pub prices: SeriesTable,
    pub simple: SeriesTable,
    pub cumulative: SeriesTable,
    pub portfolio: Option<Vec<f64>>,
    pub row_errors: Vec<RowError>,
}

/// Execute the returns pipeline: obtain prices, derive return tables, and
/// compute the portfolio series when weights are given.
pub fn run_returns(
    source: &PriceSource,
    weights: Option<&[f64]>,
) -> Result<ReturnsRun, AppError> {
    let (prices, source_label, row_errors) = match source {
        PriceSource::Csv(path) => {
            let ingested = load_price_table(path)?;
            (
                ingested.table,
                format!("{}", path.display()),
                ingested.row_errors,
            )
        }
        PriceSource::Synthetic(config) => (
            generate_price_table(config)?,
            format!("synthetic (seed {})", config.seed),
            Vec::new(),
        ),
    };

    let simple = simple_returns(&prices)?;
    let cumulative = cumulative_returns(&simple)?;
    let portfolio = match weights {
        Some(w) => Some(portfolio_returns(&simple, w)?),
        None => None,
    };

    Ok(ReturnsRun {
        source: source_label,
        prices,
        simple,
        cumulative,
        portfolio,
        row_errors,
    })
}
