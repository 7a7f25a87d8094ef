//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size character grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! NaN values (e.g. null-cline bracket gaps, the leading return row) are
//! simply not drawn, so gaps stay blank instead of distorting the scale.

use crate::domain::{GrowthPath, Intersection, NullClines};

/// One plottable series: a glyph, a legend label, and y-values aligned with
/// the shared x-axis.
#[derive(Debug, Clone, Copy)]
pub struct ChartSeries<'a> {
    pub glyph: char,
    pub label: &'a str,
    pub values: &'a [f64],
}

/// A single highlighted point drawn on top of all series.
#[derive(Debug, Clone, Copy)]
pub struct ChartMarker {
    pub x: f64,
    pub y: f64,
    pub glyph: char,
}

/// Render a multi-series line chart onto a character grid.
pub fn render_line_chart(
    title: &str,
    x: &[f64],
    series: &[ChartSeries<'_>],
    markers: &[ChartMarker],
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = finite_range(std::iter::once(x)).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = finite_range(series.iter().map(|s| s.values)).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    for s in series {
        for (&xv, &yv) in x.iter().zip(s.values.iter()) {
            if let Some((col, row)) = to_cell(xv, yv, x_min, x_max, y_min, y_max, width, height) {
                grid[row][col] = s.glyph;
            }
        }
    }

    // Markers overwrite series glyphs.
    for m in markers {
        if let Some((col, row)) = to_cell(m.x, m.y, x_min, x_max, y_min, y_max, width, height) {
            grid[row][col] = m.glyph;
        }
    }

    let mut out = String::new();
    out.push_str(title);
    out.push('\n');

    for (i, row) in grid.iter().enumerate() {
        let label = if i == 0 {
            format!("{y_max:>10.4} ")
        } else if i == height - 1 {
            format!("{y_min:>10.4} ")
        } else {
            " ".repeat(11)
        };
        out.push_str(&label);
        out.push('|');
        out.push_str(&row.iter().collect::<String>());
        out.push('\n');
    }

    out.push_str(&" ".repeat(11));
    out.push('+');
    out.push_str(&"-".repeat(width));
    out.push('\n');
    out.push_str(&format!(
        "{}{x_min:<.4} .. {x_max:<.4}\n",
        " ".repeat(12)
    ));

    for s in series {
        out.push_str(&format!("  {} {}\n", s.glyph, s.label));
    }

    out
}

/// Cumulative-return comparison chart: one series against a benchmark.
pub fn render_comparison_chart(
    figure: usize,
    series_name: &str,
    series_values: &[f64],
    benchmark_name: &str,
    benchmark_values: &[f64],
    width: usize,
    height: usize,
) -> String {
    let x: Vec<f64> = (0..series_values.len().max(benchmark_values.len()))
        .map(|i| i as f64)
        .collect();
    let series = [
        ChartSeries {
            glyph: 'o',
            label: series_name,
            values: series_values,
        },
        ChartSeries {
            glyph: '*',
            label: benchmark_name,
            values: benchmark_values,
        },
    ];
    render_line_chart(
        &format!("Figure {figure}: Cumulative return of {series_name} vs {benchmark_name}"),
        &x,
        &series,
        &[],
        width,
        height,
    )
}

/// Null-cline chart with an optional intersection marker.
pub fn render_null_cline_chart(
    clines: &NullClines,
    intersection: Option<&Intersection>,
    width: usize,
    height: usize,
) -> String {
    let series = [
        ChartSeries {
            glyph: 'o',
            label: "capital null-cline",
            values: &clines.h_on_k_null,
        },
        ChartSeries {
            glyph: '+',
            label: "human-capital null-cline",
            values: &clines.h_on_h_null,
        },
    ];
    let markers: Vec<ChartMarker> = intersection
        .map(|i| {
            vec![ChartMarker {
                x: i.k,
                y: i.h_on_k,
                glyph: 'X',
            }]
        })
        .unwrap_or_default();
    render_line_chart(
        "Null-clines (h against k); X marks the crossing",
        &clines.k_grid,
        &series,
        &markers,
        width,
        height,
    )
}

/// Growth-path chart: per-capita capital, human capital, and output.
pub fn render_path_chart(path: &GrowthPath, width: usize, height: usize) -> String {
    let x: Vec<f64> = (0..path.points.len()).map(|i| i as f64).collect();
    let k: Vec<f64> = path.points.iter().map(|p| p.k_pc).collect();
    let h: Vec<f64> = path.points.iter().map(|p| p.h_pc).collect();
    let y: Vec<f64> = path.points.iter().map(|p| p.y_pc).collect();

    let series = [
        ChartSeries {
            glyph: 'k',
            label: "capital per effective worker",
            values: &k,
        },
        ChartSeries {
            glyph: 'h',
            label: "human capital per effective worker",
            values: &h,
        },
        ChartSeries {
            glyph: 'y',
            label: "output per effective worker",
            values: &y,
        },
    ];
    render_line_chart("Growth transition path", &x, &series, &[], width, height)
}

/// Annotated scatter: numbered markers plus a label legend.
pub fn render_scatter(
    title: &str,
    xs: &[f64],
    ys: &[f64],
    labels: &[&str],
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = finite_range(std::iter::once(xs)).unwrap_or((0.0, 1.0));
    let (x_min, x_max) = pad_range(x_min, x_max, 0.05);
    let (y_min, y_max) = finite_range(std::iter::once(ys)).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    for (i, (&xv, &yv)) in xs.iter().zip(ys.iter()).enumerate() {
        if let Some((col, row)) = to_cell(xv, yv, x_min, x_max, y_min, y_max, width, height) {
            grid[row][col] = point_glyph(i);
        }
    }

    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    for row in &grid {
        out.push('|');
        out.push_str(&row.iter().collect::<String>());
        out.push('\n');
    }
    out.push('+');
    out.push_str(&"-".repeat(width));
    out.push('\n');
    for (i, label) in labels.iter().enumerate() {
        out.push_str(&format!("  {} {label}\n", point_glyph(i)));
    }
    out
}

fn point_glyph(index: usize) -> char {
    const GLYPHS: &[u8] = b"123456789abcdefghijklmnopqrstuvwxyz";
    GLYPHS[index % GLYPHS.len()] as char
}

fn to_cell(
    x: f64,
    y: f64,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    width: usize,
    height: usize,
) -> Option<(usize, usize)> {
    if !(x.is_finite() && y.is_finite()) {
        return None;
    }
    if x < x_min || x > x_max || y < y_min || y > y_max {
        return None;
    }
    let x_span = (x_max - x_min).max(f64::EPSILON);
    let y_span = (y_max - y_min).max(f64::EPSILON);
    let col = (((x - x_min) / x_span) * (width as f64 - 1.0)).round() as usize;
    let row = (((y_max - y) / y_span) * (height as f64 - 1.0)).round() as usize;
    Some((col.min(width - 1), row.min(height - 1)))
}

fn finite_range<'a>(slices: impl Iterator<Item = &'a [f64]>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for slice in slices {
        for &v in slice {
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
            }
        }
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, fraction: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = if span > 0.0 {
        span * fraction
    } else {
        min.abs().max(1.0) * fraction
    };
    (min - pad, max + pad)
}
