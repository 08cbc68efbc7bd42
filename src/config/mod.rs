#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::{ChartSettings, ConfigProvider};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_path, validate_positive_number, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://data.nasa.gov/resource/y77d-th95.json";

/// Full run configuration. Every section may be omitted from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub charts: ChartSettings,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: String,
    /// Unset means the HTTP client's own default.
    pub timeout_seconds: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub summary_json: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            summary_json: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl ConfigProvider for ReportConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn output_dir(&self) -> &Path {
        &self.output.dir
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }

    fn chart_settings(&self) -> &ChartSettings {
        &self.charts
    }
}

impl Validate for ReportConfig {
    fn validate(&self) -> Result<()> {
        validate_url("source.endpoint", &self.source.endpoint)?;
        if let Some(timeout) = self.source.timeout_seconds {
            validate_range("source.timeout_seconds", timeout, 1, 3600)?;
        }

        validate_path("output.dir", &self.output.dir.to_string_lossy())?;
        if let Some(summary) = &self.output.summary_json {
            validate_path("output.summary_json", &summary.to_string_lossy())?;
        }

        let charts = &self.charts;
        validate_range("charts.width", charts.width, 200, 10_000)?;
        validate_range("charts.height", charts.height, 200, 10_000)?;
        validate_range(
            "charts.histogram_mass_cap",
            charts.histogram_mass_cap,
            f64::MIN_POSITIVE,
            f64::MAX,
        )?;
        validate_positive_number("charts.histogram_bins", charts.histogram_bins, 1)?;
        validate_positive_number("charts.year_label_step", charts.year_label_step, 1)?;
        validate_positive_number("charts.kde_points", charts.kde_points, 2)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ReportConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.api_endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.output_dir(), Path::new("."));
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.chart_settings().histogram_bins, 100);
        assert_eq!(config.chart_settings().year_label_step, 5);
        assert_eq!(config.chart_settings().histogram_mass_cap, 100_000.0);
    }

    #[test]
    fn test_invalid_chart_settings_rejected() {
        let mut config = ReportConfig::default();
        config.charts.histogram_bins = 0;
        assert!(config.validate().is_err());

        let mut config = ReportConfig::default();
        config.charts.histogram_mass_cap = -5.0;
        assert!(config.validate().is_err());

        let mut config = ReportConfig::default();
        config.charts.width = 50;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let mut config = ReportConfig::default();
        config.source.endpoint = "file:///tmp/meteorites.json".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_converts_to_duration() {
        let mut config = ReportConfig::default();
        config.source.timeout_seconds = Some(30);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }
}
