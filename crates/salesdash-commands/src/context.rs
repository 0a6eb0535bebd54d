//! Application data shared by all commands.

use anyhow::Context as _;
use salesdash_config::Config;
use salesdash_data::{load_dataset, SalesDataset};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Result type of a command.
pub type CommandResult = anyhow::Result<()>;

/// Application data accessible in all commands.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Application configuration.
    pub config: Arc<Config>,
}

impl AppContext {
    /// Wraps a loaded configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The dataset path, preferring an explicit override.
    pub fn data_path(&self, explicit: Option<&Path>) -> PathBuf {
        explicit.map_or_else(|| self.config.data.path.clone(), Path::to_path_buf)
    }

    /// Loads the dataset at `path`.
    pub fn load(&self, path: &Path) -> anyhow::Result<SalesDataset> {
        load_dataset(path).with_context(|| format!("Failed to load sales data from {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_path_override() {
        let mut config = Config::default();
        config.data.path = PathBuf::from("configured.csv");
        let ctx = AppContext::new(config);

        assert_eq!(ctx.data_path(None), PathBuf::from("configured.csv"));
        assert_eq!(ctx.data_path(Some(Path::new("other.csv"))), PathBuf::from("other.csv"));
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let ctx = AppContext::new(Config::default());
        let err = ctx.load(Path::new("does/not/exist.csv")).unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("Failed to load sales data from does/not/exist.csv"));
        assert!(chain.contains("salesdash generate"));
    }
}
