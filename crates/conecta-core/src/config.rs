//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use conecta_session::ProfileFailurePolicy;

use crate::error::CoreError;
use crate::Result;

pub const API_URL_ENV: &str = "CONECTA_API_URL";
pub const DATABASE_PATH_ENV: &str = "CONECTA_DB_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the credential database
    pub database_path: PathBuf,
    /// Root of the citizen-services REST API
    pub api_base_url: String,
    /// Transport timeout applied to every request
    pub request_timeout_secs: u64,
    /// Whether a failed profile fetch after a refresh ends the session
    pub profile_failure_policy: ProfileFailurePolicy,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("conecta.db"),
            api_base_url: "http://192.168.1.41:8000".to_string(),
            request_timeout_secs: 15,
            profile_failure_policy: ProfileFailurePolicy::default(),
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Conecta"))
            .unwrap_or_else(|| PathBuf::from(".conecta"))
    }

    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;

        config.validate()?;

        tracing::debug!(path = %path.display(), "Loaded configuration");

        Ok(config)
    }

    /// Apply `CONECTA_API_URL` and `CONECTA_DB_PATH` overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_base_url = url;
            }
        }
        if let Ok(path) = std::env::var(DATABASE_PATH_ENV) {
            if !path.trim().is_empty() {
                self.database_path = PathBuf::from(path);
            }
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(CoreError::Config("api_base_url is empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::Config(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Platform data directory lookup
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(any(target_os = "linux", target_os = "android"))]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(
            target_os = "windows",
            target_os = "macos",
            target_os = "linux",
            target_os = "android"
        )))]
        {
            None
        }
    }
}
