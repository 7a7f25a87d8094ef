//! Simple, cumulative, and portfolio returns over a price table.
//!
//! All computations are column-wise arithmetic on a `SeriesTable`; the date
//! index passes through unchanged. The first row of a return table is NaN
//! (there is no prior observation), matching the usual period-over-period
//! convention.

use crate::domain::{Column, SeriesTable};
use crate::error::AppError;

/// Period-over-period simple returns: `r_t = p_t / p_{t-1} - 1`.
///
/// The first row of each column is NaN; a non-positive or non-finite prior
/// price also yields NaN for that period.
pub fn simple_returns(prices: &SeriesTable) -> Result<SeriesTable, AppError> {
    if prices.n_rows() < 2 {
        return Err(AppError::no_data(
            "Need at least 2 price rows to compute returns.",
        ));
    }

    let columns = prices
        .columns
        .iter()
        .map(|col| {
            let mut values = Vec::with_capacity(col.values.len());
            values.push(f64::NAN);
            for w in col.values.windows(2) {
                let (prev, cur) = (w[0], w[1]);
                if prev.is_finite() && prev > 0.0 && cur.is_finite() {
                    values.push(cur / prev - 1.0);
                } else {
                    values.push(f64::NAN);
                }
            }
            Column {
                name: col.name.clone(),
                values,
            }
        })
        .collect();

    SeriesTable::new(prices.dates.clone(), columns)
}

/// Cumulative returns: the running product of `(1 + r_t)` per column.
///
/// NaN entries (including the leading one) stay NaN and do not reset the
/// running product.
pub fn cumulative_returns(returns: &SeriesTable) -> Result<SeriesTable, AppError> {
    let columns = returns
        .columns
        .iter()
        .map(|col| {
            let mut product = 1.0;
            let values = col
                .values
                .iter()
                .map(|&r| {
                    if r.is_finite() {
                        product *= 1.0 + r;
                        product
                    } else {
                        f64::NAN
                    }
                })
                .collect();
            Column {
                name: col.name.clone(),
                values,
            }
        })
        .collect();

    SeriesTable::new(returns.dates.clone(), columns)
}

/// Scale weights so they sum to one.
pub fn normalize_weights(weights: &[f64]) -> Result<Vec<f64>, AppError> {
    if weights.is_empty() {
        return Err(AppError::bad_input("Portfolio weights must not be empty."));
    }
    let sum: f64 = weights.iter().sum();
    if !(sum.is_finite() && sum != 0.0) {
        return Err(AppError::bad_input(format!(
            "Portfolio weights must have a finite non-zero sum; got {sum}."
        )));
    }
    Ok(weights.iter().map(|w| w / sum).collect())
}

/// Per-period portfolio returns: the weighted row sum of the return table,
/// with weights normalized to sum to one.
///
/// A row where any column is NaN (typically the first) yields NaN.
pub fn portfolio_returns(returns: &SeriesTable, weights: &[f64]) -> Result<Vec<f64>, AppError> {
    if weights.len() != returns.columns.len() {
        return Err(AppError::bad_input(format!(
            "Got {} weights for {} return columns.",
            weights.len(),
            returns.columns.len()
        )));
    }
    let weights = normalize_weights(weights)?;

    let n = returns.n_rows();
    let mut out = Vec::with_capacity(n);
    for row in 0..n {
        let mut acc = 0.0;
        for (col, w) in returns.columns.iter().zip(weights.iter()) {
            acc += w * col.values[row];
        }
        out.push(acc);
    }
    Ok(out)
}

/// Mean and standard deviation of the finite entries of a return series.
///
/// Returns `None` when fewer than two finite observations exist. Used by the
/// annotated risk/return scatter.
pub fn mean_and_volatility(values: &[f64]) -> Option<(f64, f64)> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.len() < 2 {
        return None;
    }
    let n = finite.len() as f64;
    let mean = finite.iter().sum::<f64>() / n;
    let var = finite.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1.0);
    Some((mean, var.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn table(columns: Vec<(&str, Vec<f64>)>) -> SeriesTable {
        let n = columns[0].1.len();
        let dates = (0..n)
            .map(|i| {
                NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .checked_add_days(chrono::Days::new(i as u64))
                    .unwrap()
            })
            .collect();
        let columns = columns
            .into_iter()
            .map(|(name, values)| Column {
                name: name.to_string(),
                values,
            })
            .collect();
        SeriesTable::new(dates, columns).unwrap()
    }

    #[test]
    fn simple_returns_match_hand_computation() {
        let prices = table(vec![("A", vec![100.0, 110.0, 121.0])]);
        let r = simple_returns(&prices).unwrap();
        let values = &r.column("A").unwrap().values;
        assert!(values[0].is_nan());
        assert!((values[1] - 0.1).abs() < 1e-12);
        assert!((values[2] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn cumulative_returns_compound_past_the_leading_nan() {
        let prices = table(vec![("A", vec![100.0, 110.0, 121.0])]);
        let r = simple_returns(&prices).unwrap();
        let cr = cumulative_returns(&r).unwrap();
        let values = &cr.column("A").unwrap().values;
        assert!(values[0].is_nan());
        assert!((values[1] - 1.1).abs() < 1e-12);
        assert!((values[2] - 1.21).abs() < 1e-12);
    }

    #[test]
    fn weights_are_sum_normalized() {
        let w = normalize_weights(&[2.0, 3.0, 5.0]).unwrap();
        assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!((w[0] - 0.2).abs() < 1e-12);
        assert!(normalize_weights(&[1.0, -1.0]).is_err());
        assert!(normalize_weights(&[]).is_err());
    }

    #[test]
    fn portfolio_returns_are_the_weighted_row_sum() {
        let prices = table(vec![
            ("A", vec![100.0, 110.0]),
            ("B", vec![50.0, 45.0]),
        ]);
        let r = simple_returns(&prices).unwrap();
        let port = portfolio_returns(&r, &[3.0, 1.0]).unwrap();
        assert!(port[0].is_nan());
        // 0.75 * 0.10 + 0.25 * (-0.10) = 0.05
        assert!((port[1] - 0.05).abs() < 1e-12, "got {}", port[1]);
    }

    #[test]
    fn portfolio_rejects_mismatched_weight_count() {
        let prices = table(vec![("A", vec![100.0, 110.0])]);
        let r = simple_returns(&prices).unwrap();
        assert!(portfolio_returns(&r, &[0.5, 0.5]).is_err());
    }

    #[test]
    fn mean_and_volatility_skip_nan_entries() {
        let (mean, vol) = mean_and_volatility(&[f64::NAN, 0.1, 0.3]).unwrap();
        assert!((mean - 0.2).abs() < 1e-12);
        assert!((vol - (0.02_f64).sqrt()).abs() < 1e-12);
        assert!(mean_and_volatility(&[f64::NAN, 0.1]).is_none());
    }

    #[test]
    fn single_row_table_is_insufficient() {
        let prices = table(vec![("A", vec![100.0])]);
        let err = simple_returns(&prices).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
