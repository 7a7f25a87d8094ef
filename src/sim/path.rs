//! Forward iteration of the discrete-time accumulation system.
//!
//! The simulator tracks the level variables (labor, technology, capital,
//! human capital) and records technology-adjusted per-capita quantities each
//! period. It runs for exactly the requested horizon; whether the path has
//! settled near a steady state is the caller's question, not ours.
//!
//! An optional shock permanently raises the human-capital savings rate from
//! its period onward. The increment is never reverted.

use crate::domain::{GrowthPath, InitialConditions, ModelParameters, PathPoint, Shock};
use crate::error::AppError;
use crate::model::output;

/// Simulate `horizon` periods from the given initial conditions.
///
/// Period 0 reports the initial stocks normalized by initial effective labor
/// `a0 * l0`; each later period grows labor and technology, accumulates both
/// stocks out of the previous period's output, and re-normalizes.
pub fn simulate(
    params: &ModelParameters,
    initial: &InitialConditions,
    horizon: usize,
    shock: Option<Shock>,
) -> Result<GrowthPath, AppError> {
    if horizon == 0 {
        return Err(AppError::bad_input("Simulation horizon must be >= 1."));
    }
    if !(initial.l0.is_finite() && initial.l0 > 0.0 && initial.a0.is_finite() && initial.a0 > 0.0) {
        return Err(AppError::bad_input(
            "Initial labor and technology must be positive and finite.",
        ));
    }
    if !(initial.k0.is_finite() && initial.k0 >= 0.0 && initial.h0.is_finite() && initial.h0 >= 0.0)
    {
        return Err(AppError::bad_input(
            "Initial capital stocks must be non-negative and finite.",
        ));
    }
    if let Some(s) = shock {
        if !s.magnitude.is_finite() {
            return Err(AppError::bad_input("Shock magnitude must be finite."));
        }
    }

    let mut labor = initial.l0;
    let mut technology = initial.a0;
    let mut capital = initial.k0;
    let mut human_capital = initial.h0;

    let mut s_h = params.s_h;
    if let Some(s) = shock {
        if s.period == 0 {
            s_h += s.magnitude;
        }
    }

    let mut y = output(params, capital, human_capital, technology * labor);
    let mut points = Vec::with_capacity(horizon);
    points.push(per_capita(capital, human_capital, y, technology * labor));

    for t in 1..horizon {
        if let Some(s) = shock {
            if t == s.period {
                s_h += s.magnitude;
            }
        }

        let prev_y = y;
        capital = params.s_k * prev_y + (1.0 - params.delta) * capital;
        human_capital = s_h * prev_y + (1.0 - params.delta) * human_capital;
        labor *= 1.0 + params.n;
        technology *= 1.0 + params.g;

        y = output(params, capital, human_capital, technology * labor);
        points.push(per_capita(capital, human_capital, y, technology * labor));
    }

    Ok(GrowthPath { points, shock })
}

fn per_capita(capital: f64, human_capital: f64, y: f64, effective_labor: f64) -> PathPoint {
    PathPoint {
        k_pc: capital / effective_labor,
        h_pc: human_capital / effective_labor,
        y_pc: y / effective_labor,
    }
}
