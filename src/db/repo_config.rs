//! Repository configuration file support.
//!
//! Backend selection is read from a small TOML file:
//!
//! ```toml
//! [repository]
//! type = "file"        # or "local"
//!
//! [file]
//! data_dir = "data"
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::factory::RepositoryType;
use super::repository::RepositoryError;

/// Repository configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySettings,
    #[serde(default)]
    pub file: FileSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
}

/// File-backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            repository: RepositorySettings {
                repo_type: "local".to_string(),
            },
            file: FileSettings::default(),
        }
    }
}

impl RepositoryConfig {
    /// Load repository configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::Configuration(format!(
                "cannot read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, RepositoryError> {
        toml::from_str(content).map_err(|e| RepositoryError::Configuration(e.to_string()))
    }

    /// The selected backend type.
    pub fn repository_type(&self) -> Result<RepositoryType, RepositoryError> {
        RepositoryType::from_str(&self.repository.repo_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_local() {
        let config = RepositoryConfig::default();
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Local);
        assert_eq!(config.file.data_dir, "data");
    }

    #[test]
    fn test_parse_file_backend() {
        let config = RepositoryConfig::from_toml(
            r#"
            [repository]
            type = "file"

            [file]
            data_dir = "/var/lib/airops"
            "#,
        )
        .unwrap();
        assert_eq!(config.repository_type().unwrap(), RepositoryType::File);
        assert_eq!(config.file.data_dir, "/var/lib/airops");
    }

    #[test]
    fn test_file_section_is_optional() {
        let config = RepositoryConfig::from_toml(
            r#"
            [repository]
            type = "local"
            "#,
        )
        .unwrap();
        assert_eq!(config.file.data_dir, "data");
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let config = RepositoryConfig::from_toml(
            r#"
            [repository]
            type = "oracle"
            "#,
        )
        .unwrap();
        assert!(config.repository_type().is_err());
    }
}
