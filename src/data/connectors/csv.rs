use crate::data::Dataset;
use crate::error::{Result, SymregError};
use polars::prelude::*;
use std::path::Path;

pub struct CsvConnector;

impl CsvConnector {
    /// Load CSV file into DataFrame
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
            .finish()
            .map_err(|e| SymregError::Dataset(format!("Failed to read CSV: {}", e)))?;

        Ok(df)
    }

    /// Load a CSV file and pick the x and y columns as a dataset.
    pub fn load_dataset<P: AsRef<Path>>(
        path: P,
        x_column: &str,
        y_column: &str,
    ) -> Result<Dataset> {
        let df = Self::load(&path)?;
        log::info!(
            "Loaded {} rows from {}",
            df.height(),
            path.as_ref().display()
        );
        Self::dataset_from_frame(&df, x_column, y_column)
    }

    pub fn dataset_from_frame(df: &DataFrame, x_column: &str, y_column: &str) -> Result<Dataset> {
        let xs = Self::numeric_column(df, x_column)?;
        let ys = Self::numeric_column(df, y_column)?;
        Dataset::new(xs, ys)
    }

    fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
        let column = df
            .column(name)
            .map_err(|_| SymregError::Dataset(format!("Column '{}' not found", name)))?
            .cast(&DataType::Float64)?;
        let values = column.f64()?;

        if values.null_count() > 0 {
            return Err(SymregError::Dataset(format!(
                "Column '{}' has {} null values",
                name,
                values.null_count()
            )));
        }

        Ok(values.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn test_dataset_from_frame() {
        let df = df! {
            "x" => &[1i64, 2, 3],
            "y" => &[2.0, 4.0, 6.0],
        }
        .unwrap();

        let dataset = CsvConnector::dataset_from_frame(&df, "x", "y").unwrap();
        assert_eq!(dataset.xs(), &[1.0, 2.0, 3.0]);
        assert_eq!(dataset.ys(), &[2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_missing_column() {
        let df = df! {
            "x" => &[1.0, 2.0],
        }
        .unwrap();

        let result = CsvConnector::dataset_from_frame(&df, "x", "target");
        assert!(matches!(result, Err(SymregError::Dataset(_))));
    }

    #[test]
    fn test_load_dataset_from_file() {
        let path = std::env::temp_dir().join(format!("symreg_csv_{}.csv", std::process::id()));
        std::fs::write(&path, "input,output\n-1,1\n0,0\n2,4\n").unwrap();

        let dataset = CsvConnector::load_dataset(&path, "input", "output").unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.xs(), &[-1.0, 0.0, 2.0]);
        assert_eq!(dataset.ys(), &[1.0, 0.0, 4.0]);
    }
}
