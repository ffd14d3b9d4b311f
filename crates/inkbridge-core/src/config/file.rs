//! YAML file loading
//!
//! Lookup order: an explicit path (must exist), then the user-level file
//! (`<config_dir>/inkbridge/config.yaml`) if present, then defaults.

use std::fs;
use std::path::{Path, PathBuf};

use super::ProxyConfig;

/// Errors that can occur while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// User-level config path (~/.config/inkbridge/config.yaml on Linux)
pub fn user_config_path() -> PathBuf {
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
    config_dir.join("inkbridge").join("config.yaml")
}

impl ProxyConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ProxyConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Resolve configuration using the standard lookup order
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let user = user_config_path();
        if user.exists() {
            return Self::from_file(user);
        }

        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::CompletionMode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ProxyConfig::from_yaml_str(
            "completion:\n  mode: streamed\nhttp:\n  route: docs\n",
        )
        .unwrap();

        assert_eq!(config.completion.mode, Some(CompletionMode::Streamed));
        assert_eq!(config.completion.model, "inkeep-qa-sonnet-3-5");
        assert_eq!(config.http.route, "docs");
        assert_eq!(config.http.bind, "0.0.0.0:8787");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(ProxyConfig::from_yaml_str("").unwrap(), ProxyConfig::default());
    }

    #[test]
    fn test_invalid_yaml_is_rejected() {
        let err = ProxyConfig::from_yaml_str("completion: [not, a, map]").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let err = ProxyConfig::from_yaml_str("completion:\n  mode: telepathic\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "analytics:\n  enabled: false\n  source: ci").unwrap();

        let config = ProxyConfig::load(Some(file.path())).unwrap();
        assert!(!config.analytics.enabled);
        assert_eq!(config.analytics.source.as_deref(), Some("ci"));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = ProxyConfig::load(Some(Path::new("/nonexistent/inkbridge.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_user_config_path_shape() {
        let path = user_config_path();
        assert!(path.ends_with("inkbridge/config.yaml"));
    }
}
