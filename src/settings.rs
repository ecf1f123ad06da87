use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::api::client::DEFAULT_CONTACTS_PATH;

pub const API_URL_ENV: &str = "CONTACTOS_API_URL";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("no API URL configured")]
    MissingApiUrl,

    #[error("invalid API URL {url:?}: {source}")]
    InvalidApiUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("no config directory available")]
    NoConfigDir,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode settings: {0}")]
    Encode(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub api_url: String,
    pub contacts_path: String,
    pub timeout_secs: u64,
    /// Reload the list when the editor is dismissed without saving.
    pub reload_on_cancel: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            contacts_path: DEFAULT_CONTACTS_PATH.to_string(),
            timeout_secs: 10,
            reload_on_cancel: true,
        }
    }
}

impl Settings {
    pub fn path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("contactos.toml"))
    }

    /// Settings from the user's config file, with the environment override
    /// applied. Falls back to defaults when the file is missing or invalid.
    pub fn load() -> Self {
        let mut settings = Self::path().map(|p| Self::load_from(&p)).unwrap_or_default();
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                settings.api_url = url.trim().to_string();
            }
        }
        settings
    }

    pub fn load_from(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => return Self::default(),
        };
        match toml::from_str::<Settings>(&text) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("ignoring invalid settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        !self.api_url.trim().is_empty()
    }

    pub fn api_url(&self) -> Result<Url, SettingsError> {
        let raw = crate::utils::normalize_url(&self.api_url);
        if raw.is_empty() {
            return Err(SettingsError::MissingApiUrl);
        }
        Url::parse(&raw).map_err(|source| SettingsError::InvalidApiUrl { url: raw, source })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}
