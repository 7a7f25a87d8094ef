//! Reporting utilities: formatted terminal summaries.
//!
//! We keep formatting code in one place so:
//! - the solver/simulation code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{
    GrowthPath, Intersection, ModelParameters, NullClines, SeriesTable, SteadyState,
};
use crate::solve::SolveOptions;

/// Format the steady-state solve summary.
pub fn format_steady_state(
    params: &ModelParameters,
    opts: &SolveOptions,
    steady: &SteadyState,
) -> String {
    let mut out = String::new();

    out.push_str("=== solow - steady state (multi-start) ===\n");
    out.push_str(&format_parameters(params));
    out.push_str(&format!(
        "Guesses: {} in [{}, {}] | seed={} | sampling={:?}\n",
        opts.num_guesses, opts.bounds[0], opts.bounds[1], opts.seed, opts.sampling
    ));
    out.push('\n');
    out.push_str(&format!("k* = {:.6}\n", steady.k));
    out.push_str(&format!("h* = {:.6}\n", steady.h));
    out.push_str(&format!("residual norm = {:.3e}\n", steady.residual_norm));

    out
}

/// Format the null-cline sweep summary, including the once-per-sweep bracket
/// warning and the crossing (or its absence).
pub fn format_null_clines(
    params: &ModelParameters,
    clines: &NullClines,
    intersection: Option<&Intersection>,
) -> String {
    let mut out = String::new();

    out.push_str("=== solow - null-clines ===\n");
    out.push_str(&format_parameters(params));
    out.push_str(&format!(
        "Grid: {} points on [{:.4}, {:.4}]\n",
        clines.k_grid.len(),
        clines.k_grid.first().copied().unwrap_or(f64::NAN),
        clines.k_grid.last().copied().unwrap_or(f64::NAN)
    ));

    if let Some(warning) = clines.bracket_warning() {
        out.push_str(&warning);
        out.push('\n');
    }

    match intersection {
        Some(cross) => {
            out.push_str(&format!(
                "Crossing near k = {:.6} (h = {:.6} on the capital null-cline, {:.6} on the human-capital null-cline)\n",
                cross.k, cross.h_on_k, cross.h_on_h
            ));
        }
        None => {
            out.push_str("No crossing found on the grid.\n");
        }
    }

    out
}

/// Format the per-period simulation table.
pub fn format_growth_path(params: &ModelParameters, path: &GrowthPath) -> String {
    let mut out = String::new();

    out.push_str("=== solow - growth path ===\n");
    out.push_str(&format_parameters(params));
    if let Some(shock) = path.shock {
        out.push_str(&format!(
            "Shock: s_h +{:.4} from period {}\n",
            shock.magnitude, shock.period
        ));
    }
    out.push('\n');
    out.push_str("period        k_pc        h_pc        y_pc\n");
    for (t, p) in path.points.iter().enumerate() {
        out.push_str(&format!(
            "{t:>6}  {:>10.6}  {:>10.6}  {:>10.6}\n",
            p.k_pc, p.h_pc, p.y_pc
        ));
    }

    out
}

/// Format the returns summary: last cumulative return per column plus the
/// portfolio line when weights were supplied.
pub fn format_returns_summary(
    source: &str,
    cumulative: &SeriesTable,
    portfolio: Option<&[f64]>,
) -> String {
    let mut out = String::new();

    out.push_str("=== solow - returns ===\n");
    out.push_str(&format!("Source: {source}\n"));
    out.push_str(&format!(
        "Rows: {} | columns: {}\n\n",
        cumulative.n_rows(),
        cumulative.columns.len()
    ));

    out.push_str("Cumulative return over the full window:\n");
    for col in &cumulative.columns {
        let last_finite = col.values.iter().rev().find(|v| v.is_finite());
        match last_finite {
            Some(v) => out.push_str(&format!("  {:<12} {:>8.4}x\n", col.name, v)),
            None => out.push_str(&format!("  {:<12} (no data)\n", col.name)),
        }
    }

    if let Some(port) = portfolio {
        let mut product = 1.0;
        for &r in port {
            if r.is_finite() {
                product *= 1.0 + r;
            }
        }
        out.push_str(&format!("\nPortfolio cumulative return: {product:.4}x\n"));
    }

    out
}

fn format_parameters(params: &ModelParameters) -> String {
    format!(
        "Params: s_k={} s_h={} n={} g={} delta={} alpha={:.4} varphi={:.4}\n",
        params.s_k, params.s_h, params.n, params.g, params.delta, params.alpha, params.varphi
    )
}
