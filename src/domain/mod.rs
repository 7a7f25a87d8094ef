//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - model inputs (`ModelParameters`, `InitialConditions`, `Shock`)
//! - solver outputs (`SteadyState`, `NullClines`, `Intersection`)
//! - simulation outputs (`GrowthPath`, `PathPoint`)
//! - tabular series used by the returns helpers (`SeriesTable`)

pub mod types;

pub use types::*;
