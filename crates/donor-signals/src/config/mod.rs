use std::env;
use std::fmt;
use std::path::PathBuf;

use chrono::{Datelike, Local};

use crate::signals::{ThresholdConfig, ThresholdConfigError};

/// Distinguishes runtime behavior for different stages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    /// Production only accepts threshold artifacts that declare their hash.
    pub const fn requires_pinned_thresholds(self) -> bool {
        matches!(self, Self::Production)
    }

    pub const fn default_log_format(self) -> LogFormat {
        match self {
            Self::Production => LogFormat::Json,
            Self::Development | Self::Test => LogFormat::Compact,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub signals: SignalSettings,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let thresholds_path = env::var("SIGNAL_THRESHOLDS_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let as_of_year = match env::var("SIGNAL_AS_OF_YEAR") {
            Ok(value) if !value.trim().is_empty() => Some(
                value
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| ConfigError::InvalidAsOfYear { value })?,
            ),
            _ => None,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = match env::var("APP_LOG_FORMAT") {
            Ok(value) if !value.trim().is_empty() => LogFormat::parse(&value)
                .ok_or(ConfigError::InvalidLogFormat { value })?,
            _ => environment.default_log_format(),
        };

        Ok(Self {
            environment,
            signals: SignalSettings {
                thresholds_path,
                as_of_year,
                require_declared_hash: environment.requires_pinned_thresholds(),
            },
            telemetry: TelemetryConfig {
                log_level,
                format: log_format,
            },
        })
    }
}

/// Where thresholds come from and which year anchors years-operating.
#[derive(Debug, Clone, Default)]
pub struct SignalSettings {
    pub thresholds_path: Option<PathBuf>,
    pub as_of_year: Option<i32>,
    pub require_declared_hash: bool,
}

impl SignalSettings {
    /// Built-in table unless an artifact path is configured.
    pub fn load_thresholds(&self) -> Result<ThresholdConfig, ThresholdConfigError> {
        match &self.thresholds_path {
            Some(path) if self.require_declared_hash => ThresholdConfig::from_path_pinned(path),
            Some(path) => ThresholdConfig::from_path(path),
            None => Ok(ThresholdConfig::default()),
        }
    }

    pub fn reference_year(&self) -> i32 {
        self.as_of_year.unwrap_or_else(|| Local::now().year())
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidAsOfYear { value: String },
    InvalidLogFormat { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidAsOfYear { value } => {
                write!(f, "SIGNAL_AS_OF_YEAR must be an integer year, got '{value}'")
            }
            ConfigError::InvalidLogFormat { value } => {
                write!(f, "APP_LOG_FORMAT must be 'compact' or 'json', got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
