//! Factory for creating repository instances.

use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::RepositoryConfig;
use super::repositories::{JsonFileRepository, LocalRepository};
use super::repository::{FullRepository, RepositoryError, RepositoryResult};

/// Which backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory store; state lives for the process lifetime only.
    Local,
    /// JSON files under a data directory.
    File,
}

impl FromStr for RepositoryType {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(RepositoryType::Local),
            "file" => Ok(RepositoryType::File),
            other => Err(RepositoryError::Configuration(format!(
                "unknown repository type {other:?} (expected \"local\" or \"file\")"
            ))),
        }
    }
}

/// Creates repository instances for the configured backend.
pub struct RepositoryFactory;

impl RepositoryFactory {
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    pub fn create_file(data_dir: &str) -> RepositoryResult<Arc<dyn FullRepository>> {
        Ok(Arc::new(JsonFileRepository::new(data_dir)?))
    }

    /// Create the backend a configuration file selects.
    pub fn from_config(config: &RepositoryConfig) -> RepositoryResult<Arc<dyn FullRepository>> {
        match config.repository_type()? {
            RepositoryType::Local => Ok(Self::create_local()),
            RepositoryType::File => Self::create_file(&config.file.data_dir),
        }
    }
}
