//! Showcase configuration, read from TOML
//!
//! Every field has a default, so a partial file (or none at all) is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assets::FileTextureSource;

/// Looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "vitrine.toml";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    /// Directory containing `textures/`
    pub asset_root: PathBuf,
    pub texture_resolution: String,
    pub texture_extension: String,
    pub window_width: u32,
    pub window_height: u32,
    pub vsync: bool,
    /// Bytes read between byte-progress reports
    pub fetch_chunk_bytes: usize,
    pub entrance_animation: bool,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("."),
            texture_resolution: "1K".to_string(),
            texture_extension: "jpg".to_string(),
            window_width: 1200,
            window_height: 800,
            vsync: true,
            fetch_chunk_bytes: FileTextureSource::DEFAULT_CHUNK_BYTES,
            entrance_animation: true,
        }
    }
}

impl ShowcaseConfig {
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Loads `path`, or [`DEFAULT_CONFIG_FILE`] if present, or falls back to defaults
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            log::info!("Loading configuration from {}", path.display());
            return Self::load_from_file(path);
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            log::info!("Loading configuration from {}", DEFAULT_CONFIG_FILE);
            Self::load_from_file(default_path)
        } else {
            log::info!("No {} found, using default configuration", DEFAULT_CONFIG_FILE);
            Ok(Self::default())
        }
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(ShowcaseConfig::from_toml("").unwrap(), ShowcaseConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = ShowcaseConfig::from_toml(
            r#"
            asset_root = "public"
            texture_resolution = "2K"
            vsync = false
            "#,
        )
        .unwrap();

        assert_eq!(config.asset_root, PathBuf::from("public"));
        assert_eq!(config.texture_resolution, "2K");
        assert!(!config.vsync);
        assert_eq!(config.texture_extension, "jpg");
        assert_eq!(config.window_width, 1200);
        assert!(config.entrance_animation);
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let result = ShowcaseConfig::from_toml("window_width = \"wide\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_explicit_file_is_an_io_error() {
        let result = ShowcaseConfig::resolve(Some(Path::new("/nonexistent/vitrine.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_serialized_config_reads_back() {
        let config = ShowcaseConfig {
            fetch_chunk_bytes: 4096,
            ..ShowcaseConfig::default()
        };
        let text = config.to_toml().unwrap();
        assert_eq!(ShowcaseConfig::from_toml(&text).unwrap(), config);
    }
}
