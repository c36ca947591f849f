//! Configuration management for RW page enhancements.
//!
//! Parses the `[tabs]` section of `rw.toml` with serde and provides
//! auto-discovery of config files in parent directories. Every key is
//! optional; missing keys fall back to the markup conventions documented on
//! [`TabsConfig`].
//!
//! ```toml
//! [tabs]
//! container_class = "tabs"
//! tab_class = "tab"
//! content_class = "tab-content"
//! title_attribute = "data-title"
//! id_attribute = "data-tabs-id"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "rw.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tabbed content configuration.
    pub tabs: TabsConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Markup markers recognized by the tabs enhancement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TabsConfig {
    /// Class flagging a tab group container.
    pub container_class: String,
    /// Class flagging a tab block (direct child of the container).
    pub tab_class: String,
    /// Class of the optional wrapper holding a tab's body.
    pub content_class: String,
    /// Attribute carrying a tab's title.
    pub title_attribute: String,
    /// Attribute carrying a container's stable identifier.
    pub id_attribute: String,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            container_class: "tabs".to_owned(),
            tab_class: "tab".to_owned(),
            content_class: "tab-content".to_owned(),
            title_attribute: "data-title".to_owned(),
            id_attribute: "data-tabs-id".to_owned(),
        }
    }
}

impl TabsConfig {
    /// Validate marker names.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a marker is empty, contains
    /// whitespace, or two class markers coincide.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_name(&self.container_class, "tabs.container_class")?;
        require_name(&self.tab_class, "tabs.tab_class")?;
        require_name(&self.content_class, "tabs.content_class")?;
        require_name(&self.title_attribute, "tabs.title_attribute")?;
        require_name(&self.id_attribute, "tabs.id_attribute")?;

        let classes = [
            ("tabs.container_class", &self.container_class),
            ("tabs.tab_class", &self.tab_class),
            ("tabs.content_class", &self.content_class),
        ];
        for (i, (field, value)) in classes.iter().enumerate() {
            if let Some((other, _)) = classes[i + 1..].iter().find(|(_, v)| v == value) {
                return Err(ConfigError::Validation(format!(
                    "{field} and {other} cannot both be \"{value}\""
                )));
            }
        }

        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a class or attribute name to be a single non-empty token.
fn require_name(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "{field} cannot contain whitespace"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `rw.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if parsing
    /// or validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        let discovered = std::env::current_dir()
            .ok()
            .and_then(|cwd| discover_config(&cwd));
        match discovered {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tabs.validate()
    }
}

/// Search for the config file in `start` and its parents.
fn discover_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|candidate| candidate.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_validation_error(tabs: TabsConfig, expected: &str) {
        let err = tabs.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(
            err.to_string().contains(expected),
            "Expected '{expected}' in: {err}"
        );
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tabs.container_class, "tabs");
        assert_eq!(config.tabs.tab_class, "tab");
        assert_eq!(config.tabs.content_class, "tab-content");
        assert_eq!(config.tabs.title_attribute, "data-title");
        assert_eq!(config.tabs.id_attribute, "data-tabs-id");
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.tabs, TabsConfig::default());
    }

    #[test]
    fn test_parse_partial_tabs_section() {
        let toml = r#"
[tabs]
container_class = "tabset"
title_attribute = "data-label"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.tabs.container_class, "tabset");
        assert_eq!(config.tabs.title_attribute, "data-label");
        assert_eq!(config.tabs.tab_class, "tab");
    }

    #[test]
    fn test_validate_default_passes() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_validate_empty_class() {
        let tabs = TabsConfig {
            tab_class: String::new(),
            ..TabsConfig::default()
        };
        assert_validation_error(tabs, "tabs.tab_class cannot be empty");
    }

    #[test]
    fn test_validate_whitespace_in_attribute() {
        let tabs = TabsConfig {
            id_attribute: "data tabs".to_owned(),
            ..TabsConfig::default()
        };
        assert_validation_error(tabs, "tabs.id_attribute cannot contain whitespace");
    }

    #[test]
    fn test_validate_duplicate_classes() {
        let tabs = TabsConfig {
            content_class: "tab".to_owned(),
            ..TabsConfig::default()
        };
        assert_validation_error(tabs, "tabs.tab_class and tabs.content_class");
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[tabs]\ntab_class = \"pane\"\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.tabs.tab_class, "pane");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[tabs]\ncontainer_class = \"\"\n").unwrap();

        let err = Config::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[tabs\n").unwrap();

        let err = Config::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("docs/guide");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            discover_config(&nested),
            Some(dir.path().join(CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_discover_config_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("docs");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();
        std::fs::write(nested.join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            discover_config(&nested),
            Some(nested.join(CONFIG_FILENAME))
        );
    }
}
