use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};

use serde::Deserialize;
use thiserror::Error;

const SETTINGS_DIR_NAME: &str = "photo-pairs";
const SETTINGS_FILE_NAME: &str = "settings.json";
pub const ACCESS_KEY_ENV: &str = "PHOTO_PAIRS_ACCESS_KEY";

pub const DEFAULT_ENDPOINT: &str = "https://api.unsplash.com/search/photos";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_THEMES: [&str; 7] = [
    "dogs",
    "cats",
    "cars",
    "motorcycles",
    "beach",
    "california",
    "new-york",
];

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub access_key: Option<String>,
    pub endpoint: String,
    pub timeout_secs: u64,
    pub themes: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            access_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            themes: DEFAULT_THEMES.iter().map(|theme| theme.to_string()).collect(),
        }
    }
}

impl Settings {
    pub fn from_json(raw: &str, path: &Path) -> Result<Self, SettingsError> {
        serde_json::from_str(raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Missing file means defaults; anything else unreadable is an error.
    pub fn read_from(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(raw) => Self::from_json(&raw, path),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn with_access_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|key| !key.trim().is_empty()) {
            self.access_key = Some(key.trim().to_string());
        }
        self
    }

    pub fn access_key(&self) -> Option<&str> {
        self.access_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn themes(&self) -> Vec<String> {
        let themes: Vec<String> = self
            .themes
            .iter()
            .map(|theme| theme.trim().to_string())
            .filter(|theme| !theme.is_empty())
            .collect();
        if themes.is_empty() {
            Self::default().themes
        } else {
            themes
        }
    }
}

pub fn settings_path() -> PathBuf {
    glib::user_config_dir()
        .join(SETTINGS_DIR_NAME)
        .join(SETTINGS_FILE_NAME)
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    let settings = Settings::read_from(&path).unwrap_or_else(|err| {
        log::warn!("{err}; using default settings");
        Settings::default()
    });
    let settings = settings.with_access_key_override(env::var(ACCESS_KEY_ENV).ok());
    if settings.access_key().is_none() {
        log::info!(
            "no access key in {} or ${}; the bundled photo set will be used",
            path.display(),
            ACCESS_KEY_ENV
        );
    }
    settings
}
