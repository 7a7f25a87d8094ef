//! Steady-state residuals and production for the Solow model with human
//! capital.
//!
//! The solver and tracer rely on three primitive operations:
//! - evaluate the two-equation steady-state residual `F(k, h)` (for root finding)
//! - evaluate each equation individually (for null-cline tracing)
//! - evaluate Cobb-Douglas output (for simulation)

use crate::domain::ModelParameters;

/// Residual magnitude reported for non-positive stocks.
///
/// The penalty steers the root finder away from the infeasible region
/// instead of raising an error there.
pub const INFEASIBLE_RESIDUAL: f64 = 1e10;

/// Steady-state residual `F(k, h)` of the two accumulation equations.
///
/// With `q = n + g + delta + n*g` and `c = 1/((1+n)(1+g))`:
///
/// ```text
/// F_k = c * (s_k * k^alpha * h^varphi - q * k)
/// F_h = c * (s_h * k^alpha * h^varphi - q * h)
/// ```
///
/// Both components are `INFEASIBLE_RESIDUAL` when `k <= 0` or `h <= 0`.
pub fn steady_state_residual(params: &ModelParameters, k: f64, h: f64) -> [f64; 2] {
    if k <= 0.0 || h <= 0.0 {
        return [INFEASIBLE_RESIDUAL, INFEASIBLE_RESIDUAL];
    }

    let q = params.breakeven();
    let c = params.growth_discount();
    let production = k.powf(params.alpha) * h.powf(params.varphi);

    [
        c * (params.s_k * production - q * k),
        c * (params.s_h * production - q * h),
    ]
}

/// Residual of the capital accumulation equation alone (`F_k`).
pub fn capital_residual(params: &ModelParameters, k: f64, h: f64) -> f64 {
    steady_state_residual(params, k, h)[0]
}

/// Residual of the human-capital accumulation equation alone (`F_h`).
pub fn human_capital_residual(params: &ModelParameters, k: f64, h: f64) -> f64 {
    steady_state_residual(params, k, h)[1]
}

/// Cobb-Douglas output `Y = K^alpha * H^varphi * (A*L)^(1 - alpha - varphi)`.
pub fn output(params: &ModelParameters, capital: f64, human_capital: f64, effective_labor: f64) -> f64 {
    capital.powf(params.alpha)
        * human_capital.powf(params.varphi)
        * effective_labor.powf(1.0 - params.alpha - params.varphi)
}

/// Closed-form steady state for the degenerate `alpha = varphi = 0` case,
/// where both equations are linear: `k* = s_k / q`, `h* = s_h / q`.
///
/// Only meaningful for the degenerate parameters; used as a reference value
/// when checking the solver.
pub fn linear_steady_state(params: &ModelParameters) -> (f64, f64) {
    let q = params.breakeven();
    (params.s_k / q, params.s_h / q)
}
