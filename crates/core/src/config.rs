//! Runtime configuration
//!
//! Configuration is read from a TOML file and then overridden by
//! environment variables. Every field has a default, so a missing file
//! yields a working configuration pointed at a local backend.
//!
//! ```toml
//! [endpoint]
//! url = "http://localhost:4002/graphql"
//!
//! [upload]
//! base_url = "http://localhost:4002"
//! path = "/api/upload"
//!
//! [logging]
//! level = "info"
//!
//! [screen]
//! schema = "schemas/friend.json"
//! page_size = 20
//! ```

use crate::error::{CrudError, CrudResult};
use crate::traits::Validatable;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "SMALLCRUD_CONFIG";
/// Environment variable overriding `endpoint.url`
pub const ENDPOINT_ENV: &str = "SMALLCRUD_ENDPOINT";
/// Environment variable overriding `upload.base_url`
pub const UPLOAD_BASE_ENV: &str = "SMALLCRUD_UPLOAD_BASE";
/// Environment variable overriding `logging.level`
pub const LOG_ENV: &str = "SMALLCRUD_LOG";
/// Config file used when neither a flag nor the environment names one
pub const DEFAULT_CONFIG_FILE: &str = "smallcrud.toml";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CrudConfig {
    pub endpoint: EndpointConfig,
    pub upload: UploadConfig,
    pub logging: LogSettings,
    pub screen: ScreenConfig,
}

/// Backend endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// URL receiving every query and mutation
    pub url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:4002/graphql".to_string(),
        }
    }
}

/// Image upload service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Base URL; uploaded file URLs are resolved against it
    pub base_url: String,
    /// Path of the upload action under `base_url`
    pub path: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4002".to_string(),
            path: "/api/upload".to_string(),
        }
    }
}

impl UploadConfig {
    /// Full URL of the upload action
    pub fn action(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }

    /// URL of an uploaded file given the relative path returned by the server
    pub fn file_url(&self, returned: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            returned.trim_start_matches('/')
        )
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `EnvFilter` directive, e.g. `info` or `smallcrud_gateway=debug`
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Screen settings for the desktop front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Schema file shown on launch; the built-in definition editor when unset
    pub schema: Option<PathBuf>,
    /// Rows per page
    pub page_size: u32,
    /// Window title
    pub title: Option<String>,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            schema: None,
            page_size: 20,
            title: None,
        }
    }
}

impl CrudConfig {
    /// Resolve which config file to read
    ///
    /// An explicit path wins, then `SMALLCRUD_CONFIG`, then `smallcrud.toml`.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Load configuration from a TOML file, then apply environment overrides
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load(explicit: Option<&Path>) -> CrudResult<Self> {
        let path = Self::resolve_path(explicit);
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            tracing::debug!("Config file {} not found, using defaults", path.display());
            Self::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file without applying overrides
    pub fn from_file(path: &Path) -> CrudResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CrudError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Parse TOML text
    pub fn from_toml(content: &str) -> CrudResult<Self> {
        toml::from_str(content).map_err(|e| CrudError::InvalidConfig(e.to_string()))
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENDPOINT_ENV) {
            self.endpoint.url = url;
        }
        if let Some(base) = lookup(UPLOAD_BASE_ENV) {
            self.upload.base_url = base;
        }
        if let Some(level) = lookup(LOG_ENV) {
            self.logging.level = level;
        }
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> CrudResult<String> {
        toml::to_string_pretty(self).map_err(|e| CrudError::InvalidConfig(e.to_string()))
    }
}

impl Validatable for CrudConfig {
    fn validate(&self) -> CrudResult<()> {
        if self.endpoint.url.trim().is_empty() {
            return Err(CrudError::MissingConfig("endpoint.url".to_string()));
        }
        if self.screen.page_size == 0 {
            return Err(CrudError::InvalidConfig(
                "screen.page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = CrudConfig::default();
        assert_eq!(config.endpoint.url, "http://localhost:4002/graphql");
        assert_eq!(config.upload.action(), "http://localhost:4002/api/upload");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.screen.page_size, 20);
        assert!(config.is_valid());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CrudConfig::from_toml(
            r#"
            [endpoint]
            url = "https://api.example.com/graphql"

            [screen]
            schema = "schemas/friend.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.endpoint.url, "https://api.example.com/graphql");
        assert_eq!(
            config.screen.schema,
            Some(PathBuf::from("schemas/friend.json"))
        );
        assert_eq!(config.screen.page_size, 20);
        assert_eq!(config.upload, UploadConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let err = CrudConfig::from_toml("[endpoint\nurl = 1").unwrap_err();
        assert!(matches!(err, CrudError::InvalidConfig(_)));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENDPOINT_ENV, "http://backend:9000/graphql"),
            (LOG_ENV, "debug"),
        ]
        .into_iter()
        .collect();
        let mut config = CrudConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.endpoint.url, "http://backend:9000/graphql");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.upload.base_url, "http://localhost:4002");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("smallcrud.toml");
        std::fs::write(&path, "[screen]\npage_size = 50\n").unwrap();
        let config = CrudConfig::from_file(&path).unwrap();
        assert_eq!(config.screen.page_size, 50);
    }

    #[test]
    fn test_zero_page_size_is_invalid() {
        let mut config = CrudConfig::default();
        config.screen.page_size = 0;
        assert!(!config.is_valid());
    }

    #[test]
    fn test_upload_urls_join_cleanly() {
        let upload = UploadConfig {
            base_url: "http://files/".to_string(),
            path: "/api/upload".to_string(),
        };
        assert_eq!(upload.action(), "http://files/api/upload");
        assert_eq!(
            upload.file_url("uploads/a.png"),
            "http://files/uploads/a.png"
        );
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CrudConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(CrudConfig::from_toml(&text).unwrap(), config);
    }
}
