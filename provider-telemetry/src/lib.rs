//! Observability utilities for provider runtimes.

#![warn(missing_docs, clippy::pedantic)]

use std::fmt;
use std::str::FromStr;

use provider_config::EnvSource;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "PROVIDER_LOG_FORMAT";
/// Environment variable holding the log filter directives.
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

const DEFAULT_FILTER: &str = "info";

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line, suited to log aggregation.
    #[default]
    Json,
    /// Human-readable output for local runs.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "text" => Ok(Self::Pretty),
            other => Err(TelemetryError::InvalidFormat(other.to_owned())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Pretty => f.write_str("pretty"),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    format: LogFormat,
    filter: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: DEFAULT_FILTER.to_owned(),
        }
    }
}

impl TelemetryConfig {
    /// Reads the configuration from `PROVIDER_LOG_FORMAT` and `RUST_LOG`.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::InvalidFormat`] for an unknown format name.
    pub fn from_env<E>(env: &E) -> TelemetryResult<Self>
    where
        E: EnvSource + ?Sized,
    {
        let format = match env.var(LOG_FORMAT_ENV) {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };
        let filter = env
            .var(LOG_FILTER_ENV)
            .filter(|filter| !filter.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_owned());
        Ok(Self { format, filter })
    }

    /// Overrides the output format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Overrides the filter directives.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Returns the output format.
    #[must_use]
    pub const fn format(&self) -> LogFormat {
        self.format
    }

    /// Returns the filter directives.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when the filter cannot be parsed
/// and [`TelemetryError::AlreadyInitialized`] when a global subscriber exists.
pub fn init(config: &TelemetryConfig) -> TelemetryResult<()> {
    let filter =
        EnvFilter::try_new(&config.filter).map_err(|err| TelemetryError::InvalidFilter {
            filter: config.filter.clone(),
            reason: err.to_string(),
        })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    let installed = match config.format {
        LogFormat::Json => builder.json().with_current_span(true).try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    installed.map_err(|err| TelemetryError::AlreadyInitialized(err.to_string()))
}

/// Errors raised while configuring telemetry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TelemetryError {
    /// Unknown log format name.
    #[error("unknown log format `{0}`, expected `json` or `pretty`")]
    InvalidFormat(String),
    /// Filter directives failed to parse.
    #[error("invalid log filter `{filter}`: {reason}")]
    InvalidFilter {
        /// The rejected directives.
        filter: String,
        /// Parser message.
        reason: String,
    },
    /// A global subscriber was already installed.
    #[error("tracing subscriber already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Result alias for telemetry setup.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
