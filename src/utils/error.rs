use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("TOML parsing error in {field}: {message}")]
    ConfigParseError { field: String, message: String },

    #[error("Failed to render {chart}: {message}")]
    PlotError { chart: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Rendering,
    Filesystem,
}

impl ReportError {
    /// Wraps a plotters drawing error for the named chart.
    pub fn plot<E: std::fmt::Display>(chart: &str, err: E) -> Self {
        ReportError::PlotError {
            chart: chart.to_string(),
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::ApiError(_) => ErrorCategory::Network,
            ReportError::IoError(_) | ReportError::SerializationError(_) => {
                ErrorCategory::Filesystem
            }
            ReportError::ConfigError { .. }
            | ReportError::InvalidConfigValueError { .. }
            | ReportError::ConfigParseError { .. } => ErrorCategory::Configuration,
            ReportError::PlotError { .. } => ErrorCategory::Rendering,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the dataset endpoint: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Rendering => format!("Chart generation failed: {}", self),
            ErrorCategory::Filesystem => format!("Could not write output: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_error_keeps_chart_name() {
        let err = ReportError::plot("scatter", "backend closed");
        assert_eq!(err.category(), ErrorCategory::Rendering);
        assert_eq!(err.to_string(), "Failed to render scatter: backend closed");
    }

    #[test]
    fn test_user_friendly_message_for_config() {
        let err = ReportError::InvalidConfigValueError {
            field: "charts.histogram_bins".to_string(),
            value: "0".to_string(),
            reason: "Value must be at least 1".to_string(),
        };
        assert!(err
            .user_friendly_message()
            .starts_with("Invalid configuration:"));
    }
}
