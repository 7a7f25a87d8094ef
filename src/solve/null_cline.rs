//! Null-cline tracing and curve intersection.
//!
//! For each capital value on an evenly spaced grid we solve each steady-state
//! equation *individually* for the human capital that zeroes it, producing
//! two curves. The steady state is where the curves cross.
//!
//! Per-point bracket failures are tolerated: the point becomes NaN, a counter
//! is bumped, and the sweep continues. The counter lives in the result value,
//! so the "warn once per sweep" rule needs no process-wide state.

use crate::domain::{Intersection, ModelParameters, NullClines};
use crate::error::AppError;
use crate::math::bisect;
use crate::model::{capital_residual, human_capital_residual};

/// Options for a null-cline sweep.
#[derive(Debug, Clone)]
pub struct TraceOptions {
    /// Upper end of the capital grid.
    pub k_max: f64,
    /// Number of grid points.
    pub k_points: usize,
    /// Small positive lower end for both the grid and the root bracket.
    pub epsilon: f64,
    /// Upper end of the human-capital bracket; defaults to `k_max`.
    pub h_max: Option<f64>,
    /// Absolute tolerance for the bracketed root finder.
    pub tol: f64,
    /// Iteration cap for the bracketed root finder.
    pub max_iter: usize,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            k_max: 10.0,
            k_points: 100,
            epsilon: 1e-4,
            h_max: None,
            tol: 1e-10,
            max_iter: 200,
        }
    }
}

/// Generate `steps` evenly spaced points between `min` and `max` (inclusive).
pub fn lin_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, AppError> {
    if !(min.is_finite() && max.is_finite() && max > min) {
        return Err(AppError::bad_input(format!(
            "Invalid grid range: min={min}, max={max} (must be finite and max>min)."
        )));
    }
    if steps < 2 {
        return Err(AppError::bad_input("Grid steps must be >= 2."));
    }

    let step = (max - min) / (steps as f64 - 1.0);
    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        out.push(min + step * i as f64);
    }
    Ok(out)
}

/// Trace both null-clines over the capital grid.
///
/// The two curves have the same length as the grid and may contain NaN gaps
/// where the bracket did not straddle a root; `bracket_failures` counts the
/// grid points affected.
pub fn null_clines(params: &ModelParameters, opts: &TraceOptions) -> Result<NullClines, AppError> {
    if !(opts.epsilon.is_finite() && opts.epsilon > 0.0) {
        return Err(AppError::bad_input("Epsilon must be a small positive number."));
    }
    let h_hi = opts.h_max.unwrap_or(opts.k_max);
    if !(h_hi.is_finite() && h_hi > opts.epsilon) {
        return Err(AppError::bad_input(
            "Human-capital bracket upper bound must exceed epsilon.",
        ));
    }

    let k_grid = lin_space(opts.epsilon, opts.k_max, opts.k_points)?;

    let mut h_on_k_null = Vec::with_capacity(k_grid.len());
    let mut h_on_h_null = Vec::with_capacity(k_grid.len());
    let mut bracket_failures = 0usize;

    for &k in &k_grid {
        let mut failed = false;

        let h_k = bisect(
            |h| capital_residual(params, k, h),
            opts.epsilon,
            h_hi,
            opts.tol,
            opts.max_iter,
        );
        let h_h = bisect(
            |h| human_capital_residual(params, k, h),
            opts.epsilon,
            h_hi,
            opts.tol,
            opts.max_iter,
        );

        h_on_k_null.push(h_k.unwrap_or_else(|| {
            failed = true;
            f64::NAN
        }));
        h_on_h_null.push(h_h.unwrap_or_else(|| {
            failed = true;
            f64::NAN
        }));

        if failed {
            bracket_failures += 1;
        }
    }

    Ok(NullClines {
        k_grid,
        h_on_k_null,
        h_on_h_null,
        bracket_failures,
    })
}

/// Locate the first sign crossing of `y - z` over three aligned sequences.
///
/// Returns the values at the last index before the crossing; for
/// `x=[0,1,2,3]`, `y=[1,1,-1,-1]`, `z=[0,0,0,0]` that is `(1, 1, 0)`.
/// Indices where the difference is not finite (NaN gaps from the tracer) are
/// skipped; a crossing is detected between consecutive finite differences.
pub fn find_intersection(x: &[f64], y: &[f64], z: &[f64]) -> Result<Intersection, AppError> {
    if x.len() != y.len() || x.len() != z.len() {
        return Err(AppError::bad_input(format!(
            "Intersection lookup needs aligned sequences; got lengths {}, {}, {}.",
            x.len(),
            y.len(),
            z.len()
        )));
    }

    let mut prev: Option<(usize, f64)> = None;
    for i in 0..x.len() {
        let diff = y[i] - z[i];
        if !diff.is_finite() {
            continue;
        }
        let sign = diff.signum();
        if let Some((prev_idx, prev_sign)) = prev {
            if sign != prev_sign {
                return Ok(Intersection {
                    k: x[prev_idx],
                    h_on_k: y[prev_idx],
                    h_on_h: z[prev_idx],
                });
            }
        }
        prev = Some((i, sign));
    }

    Err(AppError::no_data(
        "No intersection found: the curves never change sign order on the grid.",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_params() -> ModelParameters {
        ModelParameters {
            s_k: 0.2,
            s_h: 0.15,
            n: 0.02,
            g: 0.02,
            delta: 0.1,
            alpha: 1.0 / 3.0,
            varphi: 1.0 / 3.0,
        }
    }

    #[test]
    fn lin_space_includes_endpoints() {
        let v = lin_space(0.5, 4.5, 5).unwrap();
        assert_eq!(v.len(), 5);
        assert!((v[0] - 0.5).abs() < 1e-12);
        assert!((v[4] - 4.5).abs() < 1e-12);
        assert!((v[2] - 2.5).abs() < 1e-12);
    }

    #[test]
    fn lin_space_rejects_degenerate_ranges() {
        assert!(lin_space(1.0, 1.0, 5).is_err());
        assert!(lin_space(0.0, 1.0, 1).is_err());
        assert!(lin_space(f64::NAN, 1.0, 5).is_err());
    }

    #[test]
    fn traces_finite_curves_on_benchmark_parameters() {
        let params = base_params();
        let opts = TraceOptions {
            k_max: 5.0,
            k_points: 200,
            ..TraceOptions::default()
        };
        let nc = null_clines(&params, &opts).unwrap();
        assert_eq!(nc.k_grid.len(), 200);
        assert_eq!(nc.h_on_k_null.len(), 200);
        assert_eq!(nc.h_on_h_null.len(), 200);

        // Both curves must have finite stretches on this benign range.
        assert!(nc.h_on_k_null.iter().any(|v| v.is_finite()));
        assert!(nc.h_on_h_null.iter().any(|v| v.is_finite()));
    }

    #[test]
    fn all_failures_yield_all_nan_and_one_warning() {
        // A vanishing capital savings rate pushes the k-nullcline far above
        // any reasonable bracket, so no grid point straddles a root.
        let params = ModelParameters {
            s_k: 1e-12,
            ..base_params()
        };
        let opts = TraceOptions {
            k_max: 5.0,
            k_points: 100,
            h_max: Some(5.0),
            ..TraceOptions::default()
        };
        let nc = null_clines(&params, &opts).unwrap();

        assert!(nc.h_on_k_null.iter().all(|v| v.is_nan()));
        assert_eq!(nc.bracket_failures, 100);
        // One warning per sweep, not one per point.
        assert!(nc.bracket_warning().is_some());
        assert_eq!(nc.bracket_warning().iter().count(), 1);
    }

    #[test]
    fn curves_cross_at_the_multi_start_steady_state() {
        let params = base_params();
        let opts = TraceOptions {
            k_max: 5.0,
            k_points: 400,
            ..TraceOptions::default()
        };
        let nc = null_clines(&params, &opts).unwrap();
        let cross = find_intersection(&nc.k_grid, &nc.h_on_k_null, &nc.h_on_h_null).unwrap();

        let ss = crate::solve::multi_start(&params, &crate::solve::SolveOptions::default()).unwrap();
        let spacing = nc.k_grid[1] - nc.k_grid[0];
        assert!(
            (cross.k - ss.k).abs() <= 2.0 * spacing,
            "crossing k {} vs steady state {}",
            cross.k,
            ss.k
        );
        assert!(
            (cross.h_on_k - ss.h).abs() < 0.1,
            "crossing h {} vs steady state {}",
            cross.h_on_k,
            ss.h
        );
    }

    #[test]
    fn intersection_reports_last_index_before_sign_change() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 1.0, -1.0, -1.0];
        let z = [0.0, 0.0, 0.0, 0.0];
        let cross = find_intersection(&x, &y, &z).unwrap();
        assert_eq!((cross.k, cross.h_on_k, cross.h_on_h), (1.0, 1.0, 0.0));
    }

    #[test]
    fn intersection_skips_nan_gaps() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, f64::NAN, f64::NAN, -1.0];
        let z = [0.0, 0.0, 0.0, 0.0];
        let cross = find_intersection(&x, &y, &z).unwrap();
        // The crossing is detected between the two finite entries.
        assert_eq!((cross.k, cross.h_on_k), (0.0, 1.0));
    }

    #[test]
    fn missing_intersection_is_an_explicit_error() {
        let x = [0.0, 1.0, 2.0];
        let y = [1.0, 2.0, 3.0];
        let z = [0.0, 0.0, 0.0];
        let err = find_intersection(&x, &y, &z).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = find_intersection(&[0.0], &[1.0, 2.0], &[0.0, 0.0]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
