//! Chart Configuration Module
//! Styling and dataset options with defaults matching the website chart.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Category kept by the filter step.
pub const DEFAULT_CATEGORY: &str = "Programming languages";
pub const DEFAULT_TITLE: &str = "Programming proficiency";
pub const DEFAULT_SUBTITLE: &str = "1 = Beginner, 5 = Intermediate, 10 = Expert";

/// Dataset location relative to the site repository root.
pub const DEFAULT_INPUT: &str = "assets/data/data_science_skills.csv";
pub const DEFAULT_OUTPUT: &str = "programming_proficiency.png";

/// Largest accepted image side in pixels.
pub const MAX_IMAGE_SIDE: u32 = 10_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Chart options. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub category: String,
    pub title: String,
    pub subtitle: String,
    /// Image size in pixels (5 x 5.5 inches at 100 dpi).
    pub width: u32,
    pub height: u32,
    pub title_font_size: u32,
    pub subtitle_font_size: u32,
    pub label_font_size: u32,
    /// Width reserved left of the bars for language names.
    pub label_area_width: u32,
    pub bar_color: [u8; 3],
    /// Lower bound for the right edge of the value axis.
    pub x_max: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            title: DEFAULT_TITLE.to_string(),
            subtitle: DEFAULT_SUBTITLE.to_string(),
            width: 500,
            height: 550,
            title_font_size: 28,
            subtitle_font_size: 15,
            label_font_size: 14,
            label_area_width: 110,
            bar_color: [31, 119, 180],
            x_max: 10.0,
        }
    }
}

impl ChartConfig {
    /// Load a JSON config file and validate it.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: ChartConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.category.trim().is_empty() {
            return Err(ConfigError::Invalid("category must not be empty".into()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "image size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_IMAGE_SIDE || self.height > MAX_IMAGE_SIDE {
            return Err(ConfigError::Invalid(format!(
                "image size {}x{} exceeds {MAX_IMAGE_SIDE} px per side",
                self.width, self.height
            )));
        }
        if self.label_area_width >= self.width {
            return Err(ConfigError::Invalid(
                "label_area_width must be smaller than width".into(),
            ));
        }
        if self.title_font_size == 0 || self.subtitle_font_size == 0 || self.label_font_size == 0
        {
            return Err(ConfigError::Invalid("font sizes must be positive".into()));
        }
        if !(self.x_max.is_finite() && self.x_max > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "x_max must be a positive number, got {}",
                self.x_max
            )));
        }
        Ok(())
    }
}
