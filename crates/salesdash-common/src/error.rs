//! Error types and utilities for the sales dashboard

use thiserror::Error;

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, SalesDashError>;

/// Main error type for dashboard operations
#[derive(Error, Debug)]
pub enum SalesDashError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Sales data loading and parsing errors
    #[error("Data error: {message}")]
    Data {
        message: String,
        line: Option<u64>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Graph generation and plotting errors
    #[error("Graph error: {message}")]
    Graph {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },
}

impl SalesDashError {
    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new data error
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data {
            message: msg.into(),
            line: None,
            source: None,
        }
    }

    /// Create a new data error with source
    pub fn data_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Data {
            message: msg.into(),
            line: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a new data error pointing at a line of the input file
    pub fn data_at_line(
        msg: impl Into<String>,
        line: u64,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Data {
            message: msg.into(),
            line: Some(line),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Line of the input file the error refers to, if any
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::Data { line, .. } => *line,
            _ => None,
        }
    }
}

// Error conversion implementations for external types

/// Convert from csv::Error to SalesDashError
impl From<csv::Error> for SalesDashError {
    fn from(err: csv::Error) -> Self {
        match err.position().map(csv::Position::line) {
            Some(line) => Self::data_at_line(format!("Malformed CSV record at line {line}: {err}"), line, err),
            None => Self::data_with_source("CSV processing failed", err),
        }
    }
}

/// Convert from serde_yaml::Error to SalesDashError
impl From<serde_yaml::Error> for SalesDashError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config_with_source("YAML parsing error", err)
    }
}

/// Convert from toml::de::Error to SalesDashError
impl From<toml::de::Error> for SalesDashError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("TOML parsing error", err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to SalesDashError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for SalesDashError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_line_only_on_data_errors() {
        let source = io::Error::new(io::ErrorKind::InvalidData, "bad float");
        let error = SalesDashError::data_at_line("Malformed CSV record at line 4", 4, source);
        assert_eq!(error.line(), Some(4));
        assert_eq!(error.to_string(), "Data error: Malformed CSV record at line 4");
        assert_eq!(error.source().unwrap().to_string(), "bad float");

        assert_eq!(SalesDashError::data("missing column").line(), None);
        assert_eq!(SalesDashError::validation_field("top_n out of range", "top_n").line(), None);
        assert_eq!(SalesDashError::graph("empty chart").line(), None);
    }

    #[test]
    fn test_validation_field_is_kept() {
        let error = SalesDashError::validation_field("days must be at least 1", "days");
        assert!(matches!(error, SalesDashError::Validation { field: Some(ref f), .. } if f == "days"));
        assert_eq!(error.to_string(), "Validation error: days must be at least 1");
        assert!(error.source().is_none());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: SalesDashError = io_error.into();

        assert!(error.to_string().contains("I/O error"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_csv_error_keeps_line() {
        let data = "a,b\n1,2\n3\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let err = reader
            .records()
            .find_map(std::result::Result::err)
            .expect("ragged row should fail");

        let error: SalesDashError = err.into();
        assert_eq!(error.line(), Some(3));
        assert!(error.to_string().starts_with("Data error"));
    }

    #[test]
    fn test_yaml_error_is_config_error() {
        let err = serde_yaml::from_str::<Vec<u32>>("{not: [a list").unwrap_err();
        let error: SalesDashError = err.into();
        assert!(matches!(error, SalesDashError::Config { .. }));
    }

    #[test]
    fn test_csv_error_without_position() {
        let err = csv::Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        let error: SalesDashError = err.into();
        assert_eq!(error.line(), None);
        assert_eq!(error.to_string(), "Data error: CSV processing failed");
        assert!(error.source().is_some());
    }
}
