//! Solow model equations.
//!
//! Equations are implemented as small, pure functions so that solver and
//! simulation code can stay generic over parameters.

pub mod solow;

pub use solow::*;
