//! Input/output helpers.
//!
//! - CSV price-table ingest + validation (`ingest`)
//! - growth-path CSV export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
