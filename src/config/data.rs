use super::traits::ConfigSection;
use crate::error::SymregError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the binary takes its samples from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// CSV file with the samples; the built-in demo data is used when absent.
    pub csv_path: Option<PathBuf>,
    pub x_column: String,
    pub y_column: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: None,
            x_column: "x".to_string(),
            y_column: "y".to_string(),
        }
    }
}

impl ConfigSection for DataConfig {
    fn section_name() -> &'static str {
        "data"
    }

    fn validate(&self) -> Result<(), SymregError> {
        if self.csv_path.is_some() && (self.x_column.is_empty() || self.y_column.is_empty()) {
            return Err(SymregError::Configuration(
                "x_column and y_column must be set when csv_path is given".to_string(),
            ));
        }
        Ok(())
    }
}
