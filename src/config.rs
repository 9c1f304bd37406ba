//! Keyword configuration collaborator.
//!
//! Supplies the engine's keyword groups and the media-type site lists from a
//! JSON file. The engine itself never reads configuration — callers build
//! [`KeywordGroup`](crate::keyword::KeywordGroup)s from these lists and pass
//! them into every query explicitly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Parsed configuration file contents. Missing keys default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Ordered keyword list; entries are opaque alias strings
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Media type (e.g. "Print", "Broadcast") to site-name list
    #[serde(default)]
    pub media_types: HashMap<String, Vec<String>>,
}

impl Config {
    /// Loads configuration from a JSON file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read (the message
    /// names the path) or [`ConfigError::Parse`] if it is not valid JSON for
    /// this shape.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Returns the configured keywords in file order.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Returns the keyword at `index`, if configured.
    pub fn keyword_at(&self, index: usize) -> Option<&str> {
        self.keywords.get(index).map(String::as_str)
    }

    /// Returns the sites configured for a media type; empty if the type is
    /// unknown.
    pub fn sites_by_type(&self, media_type: &str) -> &[String] {
        self.media_types
            .get(media_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the configured media type names.
    pub fn media_type_names(&self) -> Vec<&str> {
        self.media_types.keys().map(String::as_str).collect()
    }
}

/// Errors from configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration file could not be read
    Io(String),
    /// Configuration file is not valid JSON for the expected shape
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Failed to read config: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Failed to parse config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"{
                "keywords": ["Acme", "ACM", "Zenith"],
                "media_types": {
                    "Print": ["Daily Courier"],
                    "Broadcast": ["Channel 9", "Channel 10"]
                }
            }"#,
        );
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.keywords(), ["Acme", "ACM", "Zenith"]);
        assert_eq!(config.keyword_at(0), Some("Acme"));
        assert_eq!(config.keyword_at(5), None);
        assert_eq!(config.sites_by_type("Broadcast"), ["Channel 9", "Channel 10"]);
        assert_eq!(config.sites_by_type("Blog"), Vec::<String>::new().as_slice());
    }

    #[test]
    fn test_load_missing_keys_default_empty() {
        let file = write_config("{}");
        let config = Config::load(file.path()).unwrap();
        assert!(config.keywords().is_empty());
        assert!(config.media_type_names().is_empty());
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let result = Config::load("/nonexistent/config.json");
        match result.unwrap_err() {
            ConfigError::Io(msg) => assert!(msg.contains("/nonexistent/config.json")),
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_invalid_json() {
        let file = write_config("not json");
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
