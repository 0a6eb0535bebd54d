//! Configuration loading utilities

use crate::{ChartFormat, Config, ConfigValidator};
use salesdash_common::{Result as SalesDashResult, SalesDashError};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "SALESDASH_CONFIG_PATH";

/// Files searched in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["salesdash.yaml", "salesdash.yml", "salesdash.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// File extension is neither YAML nor TOML
    #[error("Unsupported configuration file '{0}' (expected .yaml, .yml or .toml)")]
    UnsupportedFormat(PathBuf),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] SalesDashError),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for SalesDashError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ValidationError(inner) => inner,
            other => Self::config_with_source("failed to load configuration", other),
        }
    }
}

/// Syntax of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.yaml` or `.yml`
    Yaml,
    /// `.toml`
    Toml,
}

impl ConfigFormat {
    /// Detects the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML or TOML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let format =
            ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::parse_str(&content, format)?;
        Self::apply_env_overrides(&mut config)?;
        ConfigValidator::validate(&config)?;

        info!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Parses configuration text without applying overrides or validation.
    pub fn parse_str(content: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
        let config = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        Ok(config)
    }

    /// Load configuration from environment variables and files
    ///
    /// Search order: `SALESDASH_CONFIG_PATH`, then `salesdash.yaml`,
    /// `salesdash.yml` and `salesdash.toml` in the working directory, else
    /// built-in defaults. Environment overrides apply in every case.
    pub fn load() -> SalesDashResult<Config> {
        Self::load_from(None)
    }

    /// Load configuration, preferring an explicit path over the search order.
    pub fn load_from(explicit: Option<&Path>) -> SalesDashResult<Config> {
        if let Some(path) = explicit {
            return Ok(Self::load_config(path)?);
        }

        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            return Ok(Self::load_config(config_path)?);
        }

        if let Some(found) = DEFAULT_CONFIG_FILES.iter().map(Path::new).find(|p| p.exists()) {
            return Ok(Self::load_config(found)?);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SalesDashResult<Config> {
        Ok(Self::load_config(path)?)
    }

    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |var| env::var(var).ok())
    }

    /// Applies `SALESDASH_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("SALESDASH_DATA_PATH") {
            config.data.path = PathBuf::from(path);
        }

        if let Some(dir) = lookup("SALESDASH_OUTPUT_DIR") {
            config.dashboard.output_dir = PathBuf::from(dir);
        }

        if let Some(top_n) = lookup("SALESDASH_TOP_N") {
            config.dashboard.top_n = top_n.trim().parse().map_err(|e| ConfigError::EnvParseError {
                var: "SALESDASH_TOP_N".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Some(seed) = lookup("SALESDASH_SEED") {
            config.generator.seed = Some(seed.trim().parse().map_err(|e| ConfigError::EnvParseError {
                var: "SALESDASH_SEED".to_string(),
                source: Box::new(e),
            })?);
        }

        if let Some(level) = lookup("SALESDASH_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(format) = lookup("SALESDASH_CHART_FORMAT") {
            config.graphs.format = format.parse::<ChartFormat>().map_err(|e| ConfigError::EnvParseError {
                var: "SALESDASH_CHART_FORMAT".to_string(),
                source: e.into(),
            })?;
        }

        Ok(())
    }
}
