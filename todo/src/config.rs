//! Configuration for the to-do app
//!
//! Values come from environment variables with defaults for everything.
//!
//! | Variable                 | Field               | Default          |
//! |--------------------------|---------------------|------------------|
//! | `TODO_DATA_DIR`          | `data_dir`          | `./todo-data`    |
//! | `TODO_DEFAULT_LIST_NAME` | `default_list_name` | `Default List`   |
//! | `TODO_LOG`               | `log_filter`        | `info`           |
//!
//! # Example
//!
//! ```no_run
//! use todo::config::TodoConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TodoConfig::from_env()?;
//! println!("Data dir: {}", config.data_dir.display());
//! # Ok(())
//! # }
//! ```

use crate::types::DEFAULT_LIST_NAME;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Variable naming the storage directory
pub const DATA_DIR_VAR: &str = "TODO_DATA_DIR";
/// Variable naming lists synthesized when none exist
pub const DEFAULT_LIST_NAME_VAR: &str = "TODO_DEFAULT_LIST_NAME";
/// Variable holding the tracing filter directive
pub const LOG_VAR: &str = "TODO_LOG";

/// Configuration error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    Invalid(String),
}

/// App configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoConfig {
    /// Directory holding one JSON file per storage key
    pub data_dir: PathBuf,
    /// Name of lists synthesized when none exist
    pub default_list_name: String,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./todo-data"),
            default_list_name: DEFAULT_LIST_NAME.to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl TodoConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns error if the resulting configuration is invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value
    ///
    /// # Errors
    ///
    /// Returns error if the resulting configuration is invalid
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(dir) = lookup(DATA_DIR_VAR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(name) = lookup(DEFAULT_LIST_NAME_VAR) {
            config.default_list_name = name.trim().to_string();
        }
        if let Some(filter) = lookup(LOG_VAR) {
            config.log_filter = filter;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data_dir cannot be empty".to_string()));
        }
        if self.default_list_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "default_list_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can unwrap
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = TodoConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, TodoConfig::default());
        assert_eq!(config.default_list_name, "Default List");
    }

    #[test]
    fn variables_override_defaults() {
        let config = TodoConfig::from_lookup(lookup(&[
            (DATA_DIR_VAR, "/var/lib/todo"),
            (DEFAULT_LIST_NAME_VAR, " Inbox "),
            (LOG_VAR, "todo=debug"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/todo"));
        assert_eq!(config.default_list_name, "Inbox");
        assert_eq!(config.log_filter, "todo=debug");
    }

    #[test]
    fn empty_values_are_rejected() {
        assert!(TodoConfig::from_lookup(lookup(&[(DATA_DIR_VAR, "")])).is_err());
        assert!(TodoConfig::from_lookup(lookup(&[(DEFAULT_LIST_NAME_VAR, "   ")])).is_err());
    }

    #[test]
    fn deserializes_partial_documents() {
        let config: TodoConfig = serde_json::from_str(r#"{"log_filter":"warn"}"#).unwrap();
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.data_dir, PathBuf::from("./todo-data"));
    }
}
