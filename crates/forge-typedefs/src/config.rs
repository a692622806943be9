//! Generator configuration
//!
//! ```toml
//! suppressWarnings = true
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options for a generation session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Do not report missing documentation or unresolved external types
    #[serde(rename = "suppressWarnings", alias = "suppress_warnings", default)]
    pub suppress_warnings: bool,
}

impl GeneratorConfig {
    /// Create the default configuration (warnings reported)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set warning suppression
    pub fn suppress_warnings(mut self, suppress: bool) -> Self {
        self.suppress_warnings = suppress;
        self
    }

    /// Parse from a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read from a TOML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        assert!(!GeneratorConfig::new().suppress_warnings);
        assert_eq!(GeneratorConfig::from_toml_str("").unwrap(), GeneratorConfig::default());
    }

    #[test]
    fn test_from_toml() {
        let config = GeneratorConfig::from_toml_str("suppressWarnings = true").unwrap();
        assert!(config.suppress_warnings);

        let config = GeneratorConfig::from_toml_str("suppress_warnings = true").unwrap();
        assert!(config.suppress_warnings);
    }

    #[test]
    fn test_rejects_unknown_options() {
        let result = GeneratorConfig::from_toml_str("emitGlue = true");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "suppressWarnings = false").unwrap();

        let config = GeneratorConfig::from_path(file.path()).unwrap();
        assert_eq!(config, GeneratorConfig::new().suppress_warnings(false));
    }
}
