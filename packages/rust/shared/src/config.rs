//! Application configuration for mdaggregate.
//!
//! User config lives at `~/.mdaggregate/mdaggregate.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MdAggregateError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "mdaggregate.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".mdaggregate";

/// Output file name used when neither the CLI nor the config names one.
pub const DEFAULT_OUTPUT: &str = "aggregated_markdown.md";

// ---------------------------------------------------------------------------
// Config structs (matching mdaggregate.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Directory to scan.
    #[serde(default = "default_directory")]
    pub directory: String,

    /// Output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Paths (relative to the scanned directory) that are always pruned.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            output: default_output(),
            exclude: Vec::new(),
        }
    }
}

fn default_directory() -> String {
    ".".into()
}
fn default_output() -> String {
    DEFAULT_OUTPUT.into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.mdaggregate/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| MdAggregateError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.mdaggregate/mdaggregate.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from the default location.
/// Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| MdAggregateError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        MdAggregateError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    tracing::debug!(?path, excludes = config.defaults.exclude.len(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("aggregated_markdown.md"));
        assert!(toml_str.contains("directory"));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[defaults]
exclude = ["node_modules", "target"]
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.defaults.exclude, vec!["node_modules", "target"]);
        assert_eq!(config.defaults.output, DEFAULT_OUTPUT);
        assert_eq!(config.defaults.directory, ".");
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config: AppConfig = toml::from_str("").expect("parse");
        assert!(config.defaults.exclude.is_empty());
        assert_eq!(config.defaults.output, DEFAULT_OUTPUT);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdaggregate.toml");
        std::fs::write(&path, "[defaults]\noutput = \"docs.md\"\n").unwrap();

        let config = load_config_from(&path).expect("load");
        assert_eq!(config.defaults.output, "docs.md");
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdaggregate.toml");
        std::fs::write(&path, "[defaults\noutput = ").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, MdAggregateError::Config { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, MdAggregateError::Io { .. }));
    }
}
