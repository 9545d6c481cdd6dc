//! Generator configuration, loaded from TOML.
//!
//! ```toml
//! external_url_base = "https://example.com/token/"
//! asset_dir = "assets"
//! image_size = 320
//! pretty_json = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Prefix for `external_url`; the token ID is appended.
    pub external_url_base: String,
    /// Directory holding SVG fragments, if rendering from disk.
    pub asset_dir: Option<PathBuf>,
    /// Rendered image width and height in pixels.
    pub image_size: u32,
    /// Pretty-print metadata JSON.
    pub pretty_json: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            external_url_base: "https://example.com/token/".to_owned(),
            asset_dir: None,
            image_size: 320,
            pretty_json: true,
        }
    }
}

impl GeneratorConfig {
    /// Read and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        if self.image_size == 0 {
            errors.push("image_size must be greater than zero".to_owned());
        }
        if self.external_url_base.trim().is_empty() {
            errors.push("external_url_base must not be empty".to_owned());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    pub fn external_url(&self, token: impl std::fmt::Display) -> String {
        format!("{}{}", self.external_url_base, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(
            GeneratorConfig::from_toml_str("").unwrap(),
            GeneratorConfig::default()
        );
    }

    #[test]
    fn partial_file_overrides_fields() {
        let c = GeneratorConfig::from_toml_str(
            "external_url_base = \"https://monsters.test/t/\"\nimage_size = 64\n",
        )
        .unwrap();
        assert_eq!(c.image_size, 64);
        assert!(c.pretty_json);
        assert_eq!(c.external_url(7), "https://monsters.test/t/7");
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        assert!(matches!(
            GeneratorConfig::from_toml_str("colour = 1"),
            Err(ConfigError::Parse(_))
        ));
        let err = GeneratorConfig::from_toml_str("image_size = 0\nexternal_url_base = \" \"")
            .unwrap_err();
        match err {
            ConfigError::Validation(errs) => assert_eq!(errs.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "asset_dir = \"art\"\npretty_json = false").unwrap();
        let c = GeneratorConfig::load(file.path()).unwrap();
        assert_eq!(c.asset_dir, Some(PathBuf::from("art")));
        assert!(!c.pretty_json);

        assert!(matches!(
            GeneratorConfig::load("/nonexistent/monstergen.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
