//! CSV Data Loader Module
//! Handles skills CSV loading and column checks using Polars.

use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const SKILL_COLUMN: &str = "Skill";
pub const NAME_COLUMN: &str = "Name";
pub const PROFICIENCY_COLUMN: &str = "Proficiency";

const REQUIRED_COLUMNS: [&str; 3] = [SKILL_COLUMN, NAME_COLUMN, PROFICIENCY_COLUMN];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("No data loaded")]
    NoData,
}

/// Loads the skills table. The table is read once and never written back.
pub struct DataLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Load a CSV file and check that the skill columns are present.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        // Surface access problems as IO errors rather than parser errors
        File::open(file_path).map_err(|source| LoaderError::Io {
            path: file_path.to_path_buf(),
            source,
        })?;
        self.file_path = Some(file_path.to_path_buf());

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        for name in REQUIRED_COLUMNS {
            if df.column(name).is_err() {
                return Err(LoaderError::MissingColumn(name.to_string()));
            }
        }

        debug!(
            path = %file_path.display(),
            rows = df.height(),
            columns = df.width(),
            "loaded skills table"
        );

        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Get list of column names from loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }
}
