//! Mathematical utilities: bracketed bisection and a damped Newton step.

pub mod bisect;
pub mod newton;

pub use bisect::*;
pub use newton::*;
