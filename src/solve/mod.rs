//! Steady-state solving orchestration.
//!
//! Responsibilities:
//!
//! - draw seeded random starting points and evaluate each attempt (parallel)
//! - keep the lowest-residual steady-state candidate (`multi_start`)
//! - trace null-clines over a capital grid and locate their crossing
//!   (`null_cline`)

pub mod multi_start;
pub mod null_cline;

pub use multi_start::*;
pub use null_cline::*;
