//! CSV ingest and normalization for price tables.
//!
//! The expected layout is one date column first (ISO `YYYY-MM-DD`), then one
//! numeric column per series. Design goals:
//!
//! - **Strict schema** for the header (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (no hidden fallbacks)
//! - **Separation of concerns**: no return arithmetic here

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;

use crate::domain::{Column, SeriesTable};
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: the normalized table plus row-level diagnostics.
#[derive(Debug, Clone)]
pub struct IngestedTable {
    pub table: SeriesTable,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load a price table from CSV.
///
/// Rows with an unparseable date or a wrong field count are skipped and
/// reported in `row_errors`; an empty numeric field becomes NaN so a sparse
/// series does not drop the whole row.
pub fn load_price_table(path: &Path) -> Result<IngestedTable, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::bad_input(format!("Failed to open CSV '{}': {e}", path.display()))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::bad_input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    if headers.len() < 2 {
        return Err(AppError::bad_input(
            "CSV needs a date column plus at least one series column.",
        ));
    }
    let series_names: Vec<String> = headers.iter().skip(1).map(|h| h.to_string()).collect();

    let mut dates = Vec::new();
    let mut series: Vec<Vec<f64>> = vec![Vec::new(); series_names.len()];
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header row and CSV lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("Unreadable row: {e}"),
                });
                continue;
            }
        };

        if record.len() != headers.len() {
            row_errors.push(RowError {
                line,
                message: format!(
                    "Expected {} fields, got {}.",
                    headers.len(),
                    record.len()
                ),
            });
            continue;
        }

        let date = match NaiveDate::parse_from_str(&record[0], "%Y-%m-%d") {
            Ok(d) => d,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("Bad date '{}': {e}", &record[0]),
                });
                continue;
            }
        };

        let mut row_values = Vec::with_capacity(series_names.len());
        let mut row_ok = true;
        for (col, field) in record.iter().skip(1).enumerate() {
            if field.is_empty() {
                row_values.push(f64::NAN);
                continue;
            }
            match field.parse::<f64>() {
                Ok(v) => row_values.push(v),
                Err(e) => {
                    row_errors.push(RowError {
                        line,
                        message: format!(
                            "Bad value '{field}' in column '{}': {e}",
                            series_names[col]
                        ),
                    });
                    row_ok = false;
                    break;
                }
            }
        }
        if !row_ok {
            continue;
        }

        dates.push(date);
        for (col, v) in row_values.into_iter().enumerate() {
            series[col].push(v);
        }
    }

    let rows_used = dates.len();
    if rows_used < 2 {
        return Err(AppError::no_data(format!(
            "CSV '{}' yielded {rows_used} usable rows; need at least 2.",
            path.display()
        )));
    }

    let columns = series_names
        .into_iter()
        .zip(series)
        .map(|(name, values)| Column { name, values })
        .collect();

    Ok(IngestedTable {
        table: SeriesTable::new(dates, columns)?,
        row_errors,
        rows_read,
        rows_used,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(tag: &str, contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("solow-lab-ingest-{}-{tag}.csv", std::process::id()));
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_a_clean_table() {
        let path = write_temp(
            "clean",
            "date,AAA,BBB\n2024-01-31,100.0,50.0\n2024-02-29,110.0,49.0\n2024-03-31,121.0,51.0\n",
        );
        let ingested = load_price_table(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ingested.rows_read, 3);
        assert_eq!(ingested.rows_used, 3);
        assert!(ingested.row_errors.is_empty());
        assert_eq!(ingested.table.column_names(), vec!["AAA", "BBB"]);
        assert_eq!(ingested.table.column("AAA").unwrap().values[2], 121.0);
    }

    #[test]
    fn skips_bad_rows_and_reports_them() {
        let path = write_temp(
            "bad-rows",
            "date,AAA\n2024-01-31,100.0\nnot-a-date,1.0\n2024-02-29,abc\n2024-03-31,105.0\n",
        );
        let ingested = load_price_table(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ingested.rows_read, 4);
        assert_eq!(ingested.rows_used, 2);
        assert_eq!(ingested.row_errors.len(), 2);
    }

    #[test]
    fn empty_fields_become_nan() {
        let path = write_temp("sparse", "date,AAA\n2024-01-31,100.0\n2024-02-29,\n2024-03-31,105.0\n");
        let ingested = load_price_table(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let values = &ingested.table.column("AAA").unwrap().values;
        assert!(values[1].is_nan());
        assert_eq!(ingested.rows_used, 3);
    }

    #[test]
    fn too_few_usable_rows_is_an_error() {
        let path = write_temp("short", "date,AAA\n2024-01-31,100.0\n");
        let err = load_price_table(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert_eq!(err.exit_code(), 3);
    }
}
