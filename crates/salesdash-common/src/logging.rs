//! Structured logging infrastructure.
//!
//! Console output always goes to stderr so that stdout only carries the
//! dashboard report. An optional JSON log file is written through a
//! non-blocking appender whose guard must be kept alive by the caller.

use crate::{Result, SalesDashError};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Console output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, human friendly output.
    Pretty,
    /// Single-line output.
    #[default]
    Compact,
    /// Newline-delimited JSON.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = SalesDashError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(SalesDashError::validation_field(
                format!("unknown log format '{other}' (expected pretty, compact or json)"),
                "logging.format",
            )),
        }
    }
}

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "salesdash_data=trace")
    pub level: String,
    /// Console output style
    pub format: LogFormat,
    /// Optional file path for JSON log output
    pub file_path: Option<PathBuf>,
    /// Whether to log span close events with their timings
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
    /// Whether to colorize console output
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            file_path: None,
            include_spans: false,
            include_targets: true,
            ansi: true,
        }
    }
}

impl LoggingConfig {
    /// Builds the level filter, letting `RUST_LOG` take precedence.
    pub fn env_filter(&self) -> Result<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.level).map_err(|e| {
            SalesDashError::config_with_source(format!("invalid log level '{}'", self.level), e)
        })
    }

    const fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Returns the file appender guard when a log file is configured; dropping
/// it flushes and stops the background writer.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = config.env_filter()?;

    let console_layer = match config.format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_writer(io::stderr)
            .with_ansi(config.ansi)
            .with_target(config.include_targets)
            .with_span_events(config.span_events())
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_writer(io::stderr)
            .with_ansi(config.ansi)
            .with_target(config.include_targets)
            .with_span_events(config.span_events())
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(io::stderr)
            .with_target(config.include_targets)
            .with_span_events(config.span_events())
            .boxed(),
    };

    let (file_layer, guard) = match &config.file_path {
        Some(path) => {
            let (directory, file_name) = split_log_path(path)?;
            std::fs::create_dir_all(&directory)?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(writer)
                .with_ansi(false)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| SalesDashError::config_with_source("failed to install tracing subscriber", e))?;

    Ok(guard)
}

/// Initialize logging with default configuration
pub fn init_default_logging() -> Result<Option<WorkerGuard>> {
    init_logging(&LoggingConfig::default())
}

fn split_log_path(path: &Path) -> Result<(PathBuf, PathBuf)> {
    let file_name = path.file_name().ok_or_else(|| {
        SalesDashError::validation_field(
            format!("log file path '{}' has no file name", path.display()),
            "logging.file",
        )
    })?;
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    Ok((directory, PathBuf::from(file_name)))
}
