//! Configuration management.
//!
//! deckup needs three values to reach the store: the endpoint URL, an
//! access key, and the id of the user who will own imported decks.
//!
//! Each value is resolved independently, highest priority first:
//! 1. Environment variable (`DECKUP_STORE_URL`, `DECKUP_STORE_KEY`, `DECKUP_USER_ID`)
//! 2. Config file (`$DECKUP_CONFIG`, else `~/.deckup/config.json`)
//!
//! There are no built-in defaults; a value missing from both is an error.

use crate::error::{Error, Result};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const STORE_URL_ENV: &str = "DECKUP_STORE_URL";
pub const STORE_KEY_ENV: &str = "DECKUP_STORE_KEY";
pub const USER_ID_ENV: &str = "DECKUP_USER_ID";
pub const CONFIG_PATH_ENV: &str = "DECKUP_CONFIG";

/// Values read from the config file or the environment.
///
/// Every field is optional; [`StoreConfig::resolve`] decides what is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub store_url: Option<String>,
    #[serde(default)]
    pub store_key: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl ConfigFile {
    /// Read overrides from the process environment. Empty values are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            store_url: env_value(STORE_URL_ENV),
            store_key: env_value(STORE_KEY_ENV),
            user_id: env_value(USER_ID_ENV),
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Fully resolved store settings.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Base URL of the store, without a trailing slash.
    pub url: String,
    /// Access key sent with every request.
    pub key: String,
    /// Owner recorded on every deck this tool creates.
    pub user_id: String,
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}

impl StoreConfig {
    /// Load from the environment and the default config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the config file is unreadable or a value
    /// is missing from both sources.
    pub fn load() -> Result<Self> {
        let file = match config_path() {
            Some(path) => load_config_file(&path)?,
            None => ConfigFile::default(),
        };
        Self::resolve(ConfigFile::from_env(), file)
    }

    /// Merge environment overrides over file values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first missing value.
    pub fn resolve(env: ConfigFile, file: ConfigFile) -> Result<Self> {
        let pick = |env: Option<String>, file: Option<String>, name: &str| {
            env.or(file.filter(|v| !v.trim().is_empty()))
                .ok_or_else(|| Error::Config(format!("{name} is not set")))
        };

        let url = pick(env.store_url, file.store_url, STORE_URL_ENV)?;
        let key = pick(env.store_key, file.store_key, STORE_KEY_ENV)?;
        let user_id = pick(env.user_id, file.user_id, USER_ID_ENV)?;

        Ok(Self {
            url: url.trim().trim_end_matches('/').to_string(),
            key: key.trim().to_string(),
            user_id: user_id.trim().to_string(),
        })
    }
}

/// Get the config file path.
///
/// `DECKUP_CONFIG` wins; otherwise `~/.deckup/config.json`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = env_value(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }

    directories::BaseDirs::new().map(|b| b.home_dir().join(".deckup").join("config.json"))
}

/// Load a config file. A missing file is treated as empty.
///
/// # Errors
///
/// Returns [`Error::Config`] if the file exists but cannot be read or parsed.
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {e}", path.display()))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse config file {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(url: &str, key: &str, user: &str) -> ConfigFile {
        let some = |s: &str| (!s.is_empty()).then(|| s.to_string());
        ConfigFile {
            store_url: some(url),
            store_key: some(key),
            user_id: some(user),
        }
    }

    #[test]
    fn test_env_overrides_file() {
        let env = values("https://env.example", "", "");
        let file = values("https://file.example/", "file-key", "user-1");

        let config = StoreConfig::resolve(env, file).unwrap();
        assert_eq!(config.url, "https://env.example");
        assert_eq!(config.key, "file-key");
        assert_eq!(config.user_id, "user-1");
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let file = values("https://x.supabase.co/", "k", "u");
        let config = StoreConfig::resolve(ConfigFile::default(), file).unwrap();
        assert_eq!(config.url, "https://x.supabase.co");
    }

    #[test]
    fn test_missing_value_names_env_var() {
        let file = values("https://x.supabase.co", "k", "");
        let err = StoreConfig::resolve(ConfigFile::default(), file).unwrap_err();

        assert!(matches!(&err, Error::Config(msg) if msg.contains(USER_ID_ENV)));
    }

    #[test]
    fn test_blank_file_value_is_missing() {
        let mut file = values("https://x.supabase.co", "k", "u");
        file.store_key = Some("   ".into());
        let err = StoreConfig::resolve(ConfigFile::default(), file).unwrap_err();

        assert!(matches!(&err, Error::Config(msg) if msg.contains(STORE_KEY_ENV)));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = StoreConfig::resolve(
            ConfigFile::default(),
            values("https://x.supabase.co", "very-secret", "u"),
        )
        .unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"store_url": "https://x.supabase.co", "store_key": "k", "user_id": "u"}"#,
        )
        .unwrap();

        let file = load_config_file(&path).unwrap();
        assert_eq!(file, values("https://x.supabase.co", "k", "u"));
    }

    #[test]
    fn test_load_config_file_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = load_config_file(&dir.path().join("absent.json")).unwrap();
        assert_eq!(file, ConfigFile::default());
    }

    #[test]
    fn test_load_config_file_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("parse")));
    }
}
