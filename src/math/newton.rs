//! Damped Newton root finding for two-equation systems.
//!
//! The multi-start solver needs a local root finder in the spirit of the
//! classic hybrid (Powell) methods: full Newton steps while they reduce the
//! residual, with a step-halving fallback when they do not. The Jacobian is
//! approximated by forward differences, so callers only supply the residual.
//!
//! The finder never fails: if the Jacobian becomes singular (as it does on
//! the constant penalty plateau for infeasible stocks) or no damped step
//! reduces the residual, it stops and reports the best point reached. The
//! multi-start layer turns those poor outcomes into discarded candidates.

use nalgebra::{Matrix2, Vector2};

/// Relative step used for the forward-difference Jacobian.
const JACOBIAN_STEP: f64 = 1e-7;

/// Maximum number of step halvings per Newton iteration.
const MAX_HALVINGS: usize = 8;

/// Outcome of a single root-finding attempt.
#[derive(Debug, Clone, Copy)]
pub struct NewtonOutcome {
    /// Final iterate.
    pub x: [f64; 2],
    /// Residual at the final iterate.
    pub residual: [f64; 2],
    /// Euclidean norm of the residual.
    pub residual_norm: f64,
    /// Newton iterations actually taken.
    pub iterations: usize,
    /// Whether the residual norm reached `tol`.
    pub converged: bool,
}

/// Drive the residual `f` toward zero starting from `x0`.
pub fn newton2<F>(f: F, x0: [f64; 2], tol: f64, max_iter: usize) -> NewtonOutcome
where
    F: Fn(f64, f64) -> [f64; 2],
{
    let eval = |x: &Vector2<f64>| {
        let r = f(x[0], x[1]);
        Vector2::new(r[0], r[1])
    };

    let mut x = Vector2::new(x0[0], x0[1]);
    let mut fx = eval(&x);
    let mut norm = fx.norm();
    let mut iterations = 0usize;

    while iterations < max_iter && norm.is_finite() && norm > tol {
        let Some(step) = newton_step(&eval, &x, &fx) else {
            break;
        };

        // Damped acceptance: take the longest step in the Newton direction
        // that actually reduces the residual norm.
        let mut lambda = 1.0;
        let mut accepted = false;
        for _ in 0..MAX_HALVINGS {
            let trial = x + step * lambda;
            let f_trial = eval(&trial);
            let trial_norm = f_trial.norm();
            if trial_norm.is_finite() && trial_norm < norm {
                x = trial;
                fx = f_trial;
                norm = trial_norm;
                accepted = true;
                break;
            }
            lambda *= 0.5;
        }
        if !accepted {
            break;
        }
        iterations += 1;
    }

    NewtonOutcome {
        x: [x[0], x[1]],
        residual: [fx[0], fx[1]],
        residual_norm: norm,
        iterations,
        converged: norm.is_finite() && norm <= tol,
    }
}

/// One Newton step `-J^{-1} f(x)` with a forward-difference Jacobian.
///
/// Returns `None` when the Jacobian is singular or non-finite.
fn newton_step<E>(eval: &E, x: &Vector2<f64>, fx: &Vector2<f64>) -> Option<Vector2<f64>>
where
    E: Fn(&Vector2<f64>) -> Vector2<f64>,
{
    let mut jac = Matrix2::<f64>::zeros();
    for j in 0..2 {
        let h = (x[j].abs() * JACOBIAN_STEP).max(JACOBIAN_STEP);
        let mut shifted = *x;
        shifted[j] += h;
        let f_shifted = eval(&shifted);
        for i in 0..2 {
            jac[(i, j)] = (f_shifted[i] - fx[i]) / h;
        }
    }
    if jac.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let rhs = -*fx;
    jac.lu().solve(&rhs).filter(|s| s.iter().all(|v| v.is_finite()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_linear_system_immediately() {
        // f(x, y) = (2x - 4, 3y + 6): root at (2, -2).
        let out = newton2(|x, y| [2.0 * x - 4.0, 3.0 * y + 6.0], [10.0, 10.0], 1e-12, 50);
        assert!(out.converged);
        assert!((out.x[0] - 2.0).abs() < 1e-9, "x = {}", out.x[0]);
        assert!((out.x[1] + 2.0).abs() < 1e-9, "y = {}", out.x[1]);
    }

    #[test]
    fn solves_coupled_nonlinear_system() {
        // x^2 + y^2 = 5, x*y = 2: root at (2, 1) among others.
        let out = newton2(
            |x, y| [x * x + y * y - 5.0, x * y - 2.0],
            [1.8, 0.8],
            1e-12,
            100,
        );
        assert!(out.converged, "residual norm {}", out.residual_norm);
        assert!((out.x[0] - 2.0).abs() < 1e-8 && (out.x[1] - 1.0).abs() < 1e-8);
    }

    #[test]
    fn reports_best_point_on_constant_plateau() {
        // A constant residual has a zero Jacobian; the finder must stop
        // gracefully rather than error.
        let out = newton2(|_, _| [1e10, 1e10], [1.0, 1.0], 1e-12, 50);
        assert!(!out.converged);
        assert_eq!(out.iterations, 0);
        assert_eq!(out.x, [1.0, 1.0]);
        assert!(out.residual_norm > 1e9);
    }

    #[test]
    fn converged_outcome_has_small_residual() {
        let out = newton2(|x, y| [x - 1.0, y - 1.0], [0.0, 0.0], 1e-10, 50);
        assert!(out.converged);
        assert!(out.residual_norm <= 1e-10);
    }
}
