use std::time::Duration;

/// Environment variable that overrides the backend base URL.
pub const BACKEND_URL_ENV: &str = "CHAT_BACKEND_URL";
/// Origin the same-origin `/api` fallback is resolved against.
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: resolve_base_url(None, DEFAULT_ORIGIN),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_millis(20_000),
            max_response_bytes: 5 * 1024 * 1024,
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Picks the backend base URL.
///
/// A non-blank override wins (trailing slashes stripped); otherwise the
/// `/api` path under `origin`.
pub fn resolve_base_url(override_url: Option<&str>, origin: &str) -> String {
    match override_url.map(str::trim) {
        Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
        _ => format!("{}/api", origin.trim().trim_end_matches('/')),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_and_loses_trailing_slashes() {
        assert_eq!(
            resolve_base_url(Some(" https://chat.example.com/v1/// "), DEFAULT_ORIGIN),
            "https://chat.example.com/v1"
        );
    }

    #[test]
    fn blank_override_falls_back_to_same_origin_api() {
        assert_eq!(
            resolve_base_url(Some("   "), "http://localhost:3000/"),
            "http://localhost:3000/api"
        );
        assert_eq!(
            resolve_base_url(None, "https://app.example.com"),
            "https://app.example.com/api"
        );
    }

    #[test]
    fn default_timeout_is_twenty_seconds() {
        let settings = ClientSettings::default();
        assert_eq!(settings.request_timeout, Duration::from_millis(20_000));
        assert_eq!(settings.base_url, "http://localhost:3000/api");
    }
}
