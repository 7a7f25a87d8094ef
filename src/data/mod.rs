//! Tabular price data and return calculations.
//!
//! - return/portfolio arithmetic over date-indexed tables (`returns`)
//! - deterministic synthetic price tables for offline runs (`sample`)

pub mod returns;
pub mod sample;

pub use returns::*;
pub use sample::*;
