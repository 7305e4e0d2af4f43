//! TOML configuration. Every section and key is optional.
//!
//! ```toml
//! [ddl]
//! quote_identifiers = true
//!
//! [drag]
//! release_on_leave = false
//!
//! [render]
//! min_width = 1024
//! ```

use crate::ddl::DdlOptions;
use crate::drag::DragConfig;
use crate::svg::RenderConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ddl: DdlOptions,
    #[serde(default)]
    pub drag: DragConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

impl AppConfig {
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }
        log::info!(path = path.display().to_string(); "Loading configuration");
        Self::from_toml(&fs::read_to_string(path)?)
    }

    /// Load `path` when given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::debug!("No configuration file given, using defaults");
                Ok(Self::default())
            }
        }
    }
}
