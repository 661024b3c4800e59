//! Application configuration.
//!
//! Read from a TOML file; every key is optional:
//!
//! ```toml
//! [artifacts]
//! scaler = "scaler.json"
//! model = "model.json"
//!
//! [data]
//! dataset = "Student_performance_data.csv"
//!
//! [validation]
//! policy = "strict"
//! ```
//!
//! Relative paths in a file are resolved against the file's directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::features::ValidationPolicy;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "gradecast.toml";

/// Errors while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Locations of the fitted artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    pub scaler: PathBuf,
    pub model: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            scaler: PathBuf::from("scaler.json"),
            model: PathBuf::from("model.json"),
        }
    }
}

/// Dataset used by exploration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub dataset: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("Student_performance_data.csv"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub policy: ValidationPolicy,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub artifacts: ArtifactsConfig,
    pub data: DataConfig,
    pub validation: ValidationConfig,
}

impl AppConfig {
    /// Parse configuration from TOML text. Paths are kept as written.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        Ok(match path.parent() {
            Some(base) => config.resolve_relative_to(base),
            None => config,
        })
    }

    /// Load an explicit file, or [`DEFAULT_CONFIG_FILE`] if it exists, or
    /// fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }

    /// Rebase relative paths onto `base`.
    pub fn resolve_relative_to(mut self, base: &Path) -> Self {
        for path in [
            &mut self.artifacts.scaler,
            &mut self.artifacts.model,
            &mut self.data.dataset,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.artifacts.scaler, PathBuf::from("scaler.json"));
        assert_eq!(config.validation.policy, ValidationPolicy::Strict);
    }

    #[test]
    fn partial_sections() {
        let config = AppConfig::from_toml_str(
            r#"
            [artifacts]
            model = "models/forest.json"

            [validation]
            policy = "lenient"
            "#,
        )
        .unwrap();
        assert_eq!(config.artifacts.model, PathBuf::from("models/forest.json"));
        assert_eq!(config.artifacts.scaler, PathBuf::from("scaler.json"));
        assert_eq!(config.validation.policy, ValidationPolicy::Lenient);
    }

    #[test]
    fn bad_policy_is_parse_error() {
        let err = AppConfig::from_toml_str("[validation]\npolicy = \"loose\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn relative_paths_follow_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradecast.toml");
        std::fs::write(
            &path,
            "[artifacts]\nscaler = \"a/scaler.json\"\nmodel = \"/abs/model.json\"\n",
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.artifacts.scaler, dir.path().join("a/scaler.json"));
        assert_eq!(config.artifacts.model, PathBuf::from("/abs/model.json"));
        assert_eq!(
            config.data.dataset,
            dir.path().join("Student_performance_data.csv")
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AppConfig::from_file("/no/such/gradecast.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
