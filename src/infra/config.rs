//! Configuration loading from TOML files
//!
//! Config file is selected via the --config command line argument,
//! defaulting to config/gmr.toml. A missing or unreadable file falls back
//! to defaults with a warning.

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DatasetConfig {
    /// Label stamped on report records; defaults to the input file stem
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// File path for the JSONL report
    #[serde(default = "default_report_file")]
    pub file: String,
    /// Upper bound for exact histogram bins; larger counts aggregate into one bin
    #[serde(default = "default_histogram_max")]
    pub histogram_max: u64,
    /// Number of rows echoed in the data preview (0 disables the preview)
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            file: default_report_file(),
            histogram_max: default_histogram_max(),
            preview_rows: default_preview_rows(),
        }
    }
}

fn default_report_file() -> String {
    "report.jsonl".to_string()
}

fn default_histogram_max() -> u64 {
    50
}

fn default_preview_rows() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    dataset_label: Option<String>,
    report_file: String,
    histogram_max: u64,
    preview_rows: usize,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_label: None,
            report_file: default_report_file(),
            histogram_max: default_histogram_max(),
            preview_rows: default_preview_rows(),
            config_file: "default".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(Self {
            dataset_label: toml_config.dataset.label,
            report_file: toml_config.report.file,
            histogram_max: toml_config.report.histogram_max,
            preview_rows: toml_config.report.preview_rows,
            config_file: path.display().to_string(),
        })
    }

    /// Load configuration - tries TOML file first, falls back to defaults
    pub fn load_from_path(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    // Getters for all config fields
    pub fn dataset_label(&self) -> Option<&str> {
        self.dataset_label.as_deref()
    }

    pub fn report_file(&self) -> &str {
        &self.report_file
    }

    pub fn histogram_max(&self) -> u64 {
        self.histogram_max
    }

    pub fn preview_rows(&self) -> usize {
        self.preview_rows
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }
}
