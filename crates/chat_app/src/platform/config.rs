use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use chat_client::{resolve_base_url, ClientSettings, DEFAULT_ORIGIN};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub(crate) const CONFIG_FILENAME: &str = "chat_app.ron";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] io::Error),
    #[error("could not parse config: {0}")]
    Parse(String),
}

/// Settings read from `chat_app.ron`; every field may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub backend_url: Option<String>,
    pub origin: String,
    pub timeout_ms: u64,
    pub max_response_bytes: u64,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            backend_url: None,
            origin: DEFAULT_ORIGIN.to_string(),
            timeout_ms: client.request_timeout.as_millis() as u64,
            max_response_bytes: client.max_response_bytes,
            log_destination: LogDestination::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Builds client settings; a non-blank environment override beats `backend_url`.
    pub(crate) fn client_settings(&self, env_override: Option<&str>) -> ClientSettings {
        let override_url = env_override
            .filter(|url| !url.trim().is_empty())
            .or(self.backend_url.as_deref());
        ClientSettings {
            base_url: resolve_base_url(override_url, &self.origin),
            request_timeout: Duration::from_millis(self.timeout_ms),
            max_response_bytes: self.max_response_bytes,
            ..ClientSettings::default()
        }
    }
}

/// Reads `chat_app.ron` from `dir`. A missing file is `Ok(None)`.
pub(crate) fn load_config(dir: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(ConfigError::Io(err)),
    };
    ron::from_str(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"(backend_url: Some("https://chat.example.com/"), timeout_ms: 1500, log_destination: Both)"#,
        )
        .unwrap();

        let config = load_config(dir.path()).unwrap().expect("config");
        assert_eq!(config.backend_url.as_deref(), Some("https://chat.example.com/"));
        assert_eq!(config.timeout_ms, 1500);
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.origin, DEFAULT_ORIGIN);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "(timeout_ms: \"soon\")").unwrap();

        assert!(matches!(
            load_config(dir.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn environment_override_beats_config() {
        let config = AppConfig {
            backend_url: Some("https://configured.example.com".to_string()),
            ..AppConfig::default()
        };

        let settings = config.client_settings(Some("https://env.example.com//"));
        assert_eq!(settings.base_url, "https://env.example.com");

        let settings = config.client_settings(Some("  "));
        assert_eq!(settings.base_url, "https://configured.example.com");
    }

    #[test]
    fn defaults_resolve_to_same_origin_api() {
        let settings = AppConfig::default().client_settings(None);
        assert_eq!(settings.base_url, "http://localhost:3000/api");
        assert_eq!(settings.request_timeout, Duration::from_millis(20_000));
    }
}
