use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading connect options.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("Failed to read options file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse options file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Options recognized by `connect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectOptions {
    /// Skip parent-driven renders when own props are shallow-equal (default: true).
    pub pure: bool,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self { pure: true }
    }
}

/// Options may sit at the top level or under a `[connect]` table.
#[derive(Deserialize)]
struct OptionsDocument {
    connect: Option<ConnectOptions>,
    #[serde(flatten)]
    top_level: ConnectOptions,
}

impl ConnectOptions {
    /// Options with the purity gate disabled.
    pub fn impure() -> Self {
        Self { pure: false }
    }

    pub fn with_pure(mut self, pure: bool) -> Self {
        self.pure = pure;
        self
    }

    /// Parses options from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let document: OptionsDocument = toml::from_str(content)?;
        Ok(document.connect.unwrap_or(document.top_level))
    }

    /// Loads options from a TOML file.
    ///
    /// - If the file doesn't exist, returns `ConnectOptions::default()`.
    /// - Otherwise reads and parses it.
    pub fn load_from(path: &Path) -> Result<Self, OptionsError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| OptionsError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_toml_str(&content).map_err(|e| OptionsError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_by_default() {
        assert!(ConnectOptions::default().pure);
        assert!(!ConnectOptions::impure().pure);
    }

    #[test]
    fn parses_top_level_key() {
        let options = ConnectOptions::from_toml_str("pure = false").unwrap();
        assert!(!options.pure);
    }

    #[test]
    fn parses_connect_table() {
        let options = ConnectOptions::from_toml_str("[connect]\npure = false\n").unwrap();
        assert!(!options.pure);
    }

    #[test]
    fn empty_document_uses_defaults() {
        assert_eq!(ConnectOptions::from_toml_str("").unwrap(), ConnectOptions::default());
    }

    #[test]
    fn rejects_wrong_type() {
        assert!(ConnectOptions::from_toml_str("pure = \"yes\"").is_err());
    }
}
