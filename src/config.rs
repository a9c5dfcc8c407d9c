//! Report configuration
//!
//! Defaults reproduce the standard report: top 20 countries, 7-day window,
//! charts under `output/`, report at `covid_report.html`. A TOML file may
//! override any subset of fields; CLI flags override the file.
//!
//! ```toml
//! output_dir = "site/output"
//! report_path = "site/index.html"
//! top_n = 20
//! window_days = 7
//!
//! [analysis]
//! density_points = 100
//! histogram_bins = 10
//! ```

use crate::aggregate::DEFAULT_WINDOW_DAYS;
use crate::rank::DEFAULT_TOP_N;
use crate::regression::AnalysisConfig;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for one report run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory receiving the chart images and the ranking CSV
    pub output_dir: PathBuf,

    /// Path of the generated HTML document
    pub report_path: PathBuf,

    /// Number of countries kept after ranking
    pub top_n: usize,

    /// Number of trailing daily observations averaged per country
    pub window_days: usize,

    pub analysis: AnalysisConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            report_path: PathBuf::from("covid_report.html"),
            top_n: DEFAULT_TOP_N,
            window_days: DEFAULT_WINDOW_DAYS,
            analysis: AnalysisConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            bail!("Config file not found: {}", path_ref.display());
        }

        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read config file {}", path_ref.display()))?;

        let config: ReportConfig = toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path_ref.display()))?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.output_dir.as_os_str().is_empty() {
            return Err("output_dir must not be empty".to_string());
        }

        if self.report_path.as_os_str().is_empty() {
            return Err("report_path must not be empty".to_string());
        }

        if self.top_n < 2 {
            return Err(format!(
                "top_n must be >= 2 for the regression, got {}",
                self.top_n
            ));
        }

        if self.window_days == 0 {
            return Err("window_days must be >= 1, got 0".to_string());
        }

        self.analysis.validate()
    }
}
