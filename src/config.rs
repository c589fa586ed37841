//! Configuration loading
//!
//! Values are resolved in priority order:
//! 1. Command-line flags (or their environment variables)
//! 2. TOML file passed with `--config`
//! 3. `<config_dir>/image-uploader/config.toml`
//! 4. Compiled defaults

use crate::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:1000";
pub const DEFAULT_UPLOAD_PATH: &str = "image_posting";
pub const DEFAULT_FIELD_NAME: &str = "images";
pub const DEFAULT_DISPLAY_NAME_LEN: usize = 25;

/// Extensions offered by the file picker and used when scanning folders.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub upload_path: String,
    pub field_name: String,
    pub display_name_len: usize,
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            upload_path: DEFAULT_UPLOAD_PATH.to_string(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
            display_name_len: DEFAULT_DISPLAY_NAME_LEN,
            request_timeout_secs: None,
        }
    }
}

/// Overrides taken from the command line.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = match &overrides.config_file {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        if let Some(base_url) = &overrides.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(secs) = overrides.request_timeout_secs {
            config.request_timeout_secs = Some(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::Config("base_url must not be empty".to_string()));
        }
        if self.field_name.trim().is_empty() {
            return Err(Error::Config("field_name must not be empty".to_string()));
        }
        if self.display_name_len == 0 {
            return Err(Error::Config(
                "display_name_len must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Full URL of the ingestion endpoint.
    pub fn upload_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.upload_path.trim_start_matches('/')
        )
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("image-uploader").join("config.toml"))
}
