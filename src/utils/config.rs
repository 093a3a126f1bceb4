use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::db::SessionSettings;
use crate::utils::credential_store;

const APP_DIR: &str = "sqlcell";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings file: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("no configuration directory is available on this system")]
    NoConfigDir,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SettingsError + '_ {
    move |source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Application preferences, independent of any connection.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub timer_seconds: u64,
    pub auto_commit: bool,
    pub use_keyring: bool,
    pub default_max_rows: i32,
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            timer_seconds: 1,
            auto_commit: true,
            use_keyring: true,
            default_max_rows: crate::db::DEFAULT_MAX_ROWS,
        }
    }

    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push(APP_DIR);
            path
        })
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|mut path| {
            path.push("config.json");
            path
        })
    }

    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::new(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::new();
        }
        let parsed = fs::read_to_string(path)
            .map_err(io_error(path))
            .and_then(|content| serde_json::from_str(&content).map_err(SettingsError::from));
        match parsed {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "ignoring unreadable application config");
                Self::new()
            }
        }
    }

    pub fn timer_budget(&self) -> Duration {
        Duration::from_secs(self.timer_seconds.max(1))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Persists the session parameters between runs.
pub trait SettingsStore {
    fn load(&self) -> Result<Option<SessionSettings>, SettingsError>;
    fn save(&self, settings: &SessionSettings) -> Result<(), SettingsError>;
    fn clear(&self) -> Result<(), SettingsError>;
}

/// Session parameters as a JSON file; the password lives in the OS keyring.
pub struct JsonSettingsStore {
    path: PathBuf,
    use_keyring: bool,
}

impl JsonSettingsStore {
    pub fn new(path: PathBuf, use_keyring: bool) -> Self {
        Self { path, use_keyring }
    }

    pub fn default_path() -> Result<PathBuf, SettingsError> {
        AppConfig::config_dir()
            .map(|mut path| {
                path.push("session.json");
                path
            })
            .ok_or(SettingsError::NoConfigDir)
    }

    fn read(&self) -> Result<Option<SessionSettings>, SettingsError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(io_error(&self.path))?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> Result<Option<SessionSettings>, SettingsError> {
        let Some(mut settings) = self.read()? else {
            return Ok(None);
        };
        if self.use_keyring {
            match credential_store::get_password(&settings.credential_key()) {
                Ok(Some(password)) => settings.password = password,
                Ok(None) => {}
                Err(err) => warn!(error = %err, "could not read password from keyring"),
            }
        }
        Ok(Some(settings))
    }

    fn save(&self, settings: &SessionSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }
        let content = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, content).map_err(io_error(&self.path))?;

        if self.use_keyring {
            if let Err(err) =
                credential_store::store_password(&settings.credential_key(), &settings.password)
            {
                warn!(error = %err, "password was not saved to the keyring");
            }
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), SettingsError> {
        if self.use_keyring {
            if let Ok(Some(previous)) = self.read() {
                if let Err(err) = credential_store::delete_password(&previous.credential_key()) {
                    warn!(error = %err, "password was not removed from the keyring");
                }
            }
        }
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(&self.path)(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_in(dir: &tempfile::TempDir) -> JsonSettingsStore {
        JsonSettingsStore::new(dir.path().join("nested").join("session.json"), false)
    }

    #[test]
    fn load_without_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_keeps_everything_but_the_password() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let settings = SessionSettings {
            database: "SALES".to_string(),
            host: "db.example.com".to_string(),
            port: 1522,
            uid: "SCOTT".to_string(),
            password: "tiger".to_string(),
            max_rows: 25,
            ..SessionSettings::default()
        };

        store.save(&settings).unwrap();
        let loaded = store.load().unwrap().unwrap();

        assert_eq!(loaded.database, "SALES");
        assert_eq!(loaded.host, "db.example.com");
        assert_eq!(loaded.port, 1522);
        assert_eq!(loaded.uid, "SCOTT");
        assert_eq!(loaded.max_rows, 25);
        assert_eq!(loaded.password, "");

        let raw = fs::read_to_string(dir.path().join("nested").join("session.json")).unwrap();
        assert!(!raw.contains("tiger"));
    }

    #[test]
    fn clear_removes_file_and_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&SessionSettings::default()).unwrap();

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn app_config_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "timer_seconds": 3 }"#).unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.timer_seconds, 3);
        assert!(config.auto_commit);
        assert_eq!(config.default_max_rows, 10);
    }

    #[test]
    fn unreadable_app_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        assert_eq!(AppConfig::load_from(&path), AppConfig::new());
    }
}
