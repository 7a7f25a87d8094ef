//! Finite-horizon growth simulation.

pub mod path;

pub use path::*;
