use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::logging::LoggingConfig;

/// Default paths for each command plus logging settings.
///
/// Every path is optional: a path given on the command line always wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub strip: StripConfig,
    pub crop: CropConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripConfig {
    /// Image rewritten in place.
    pub target: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    pub source: Option<PathBuf>,
    pub destination: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl Config {
    /// Parse a TOML file, or JSON when the content starts with `{`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config_error = |reason: String| Error::Config {
            path: path.to_path_buf(),
            reason,
        };

        let content = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;

        if content.trim_start().starts_with('{') {
            serde_json::from_str(&content).map_err(|e| config_error(e.to_string()))
        } else {
            toml::from_str(&content).map_err(|e| config_error(e.to_string()))
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P, format: ConfigFormat) -> Result<()> {
        let path = path.as_ref();
        let config_error = |reason: String| Error::Config {
            path: path.to_path_buf(),
            reason,
        };

        let content = match format {
            ConfigFormat::Json => {
                serde_json::to_string_pretty(self).map_err(|e| config_error(e.to_string()))?
            }
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| config_error(e.to_string()))?
            }
        };

        fs::write(path, content).map_err(|e| config_error(e.to_string()))
    }

    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Err(e) = self.logging.validate() {
            errors.push(e);
        }

        let empty = |p: &Option<PathBuf>| p.as_ref().is_some_and(|p| p.as_os_str().is_empty());
        if empty(&self.strip.target) {
            errors.push("strip.target must not be empty".to_string());
        }
        if empty(&self.crop.source) {
            errors.push("crop.source must not be empty".to_string());
        }
        if empty(&self.crop.destination) {
            errors.push("crop.destination must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Load and validate the config at `path`, or fall back to defaults when no
/// path is given.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let config = Config::load_from_file(path)?;
    config.validate().map_err(|errors| Error::Config {
        path: path.to_path_buf(),
        reason: errors.join("; "),
    })?;

    Ok(config)
}
