//! Export simulated growth paths to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: one row per period, technology-adjusted per-capita quantities.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::GrowthPath;
use crate::error::AppError;

/// Write a growth path to a CSV file.
pub fn write_path_csv(path: &Path, growth_path: &GrowthPath) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::bad_input(format!(
            "Failed to create export CSV '{}': {e}",
            path.display()
        ))
    })?;

    writeln!(file, "period,k_pc,h_pc,y_pc,shocked")
        .map_err(|e| AppError::bad_input(format!("Failed to write export CSV header: {e}")))?;

    for (t, p) in growth_path.points.iter().enumerate() {
        let shocked = growth_path
            .shock
            .map(|s| t >= s.period)
            .unwrap_or(false);
        writeln!(
            file,
            "{t},{:.10},{:.10},{:.10},{shocked}",
            p.k_pc, p.h_pc, p.y_pc
        )
        .map_err(|e| AppError::bad_input(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PathPoint, Shock};

    #[test]
    fn writes_one_row_per_period() {
        let growth_path = GrowthPath {
            points: vec![
                PathPoint {
                    k_pc: 1.0,
                    h_pc: 1.0,
                    y_pc: 1.0,
                },
                PathPoint {
                    k_pc: 1.1,
                    h_pc: 1.05,
                    y_pc: 1.02,
                },
            ],
            shock: Some(Shock {
                period: 1,
                magnitude: 0.05,
            }),
        };

        let mut path = std::env::temp_dir();
        path.push(format!("solow-lab-export-{}.csv", std::process::id()));
        write_path_csv(&path, &growth_path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "period,k_pc,h_pc,y_pc,shocked");
        assert!(lines[1].starts_with("0,") && lines[1].ends_with("false"));
        assert!(lines[2].starts_with("1,") && lines[2].ends_with("true"));
    }
}
