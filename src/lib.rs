//! Proficiency Chart - programming proficiency bar chart from a skills CSV
//!
//! Reads the skills table, keeps the "Programming languages" rows and draws
//! them as unboxed horizontal bars, first dataset row at the top.

pub mod charts;
pub mod config;
pub mod data;
pub mod error;

use charts::{BarChart, OutputFormat, StaticChartRenderer};
use config::ChartConfig;
use data::{DataLoader, DataProcessor, LoaderError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use error::{Error, Result};

/// What a pipeline run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub rows_read: usize,
    /// Bar labels top-to-bottom as drawn.
    pub bars: Vec<String>,
}

/// Read `input`, filter to `config.category` and write the chart to `output`.
///
/// Nothing is written unless loading and filtering succeed.
pub fn generate_chart(config: &ChartConfig, input: &Path, output: &Path) -> Result<ChartSummary> {
    config.validate()?;
    let format = OutputFormat::from_path(output)?;

    let mut loader = DataLoader::new();
    loader.load_csv(input)?;
    debug!(columns = ?loader.get_columns(), "dataset columns");
    let df = loader.get_dataframe().ok_or(LoaderError::NoData)?;
    let records = DataProcessor::prepare_records(df, &config.category)?;

    let chart = BarChart::new(config.clone(), records);
    StaticChartRenderer::save(&chart, output)?;

    let bars: Vec<String> = chart.visual_order().into_iter().map(String::from).collect();
    info!(
        output = %output.display(),
        bars = bars.len(),
        "wrote programming proficiency chart"
    );

    Ok(ChartSummary {
        input: loader
            .get_file_path()
            .cloned()
            .unwrap_or_else(|| input.to_path_buf()),
        output: output.to_path_buf(),
        format,
        rows_read: loader.get_row_count(),
        bars,
    })
}
