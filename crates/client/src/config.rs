//! Client configuration

use erbuilds_shared::DEFAULT_CATALOG_BASE_URL;

use crate::application::services::notification_service::DEFAULT_POLL_INTERVAL_MS;
use crate::application::services::suggestion_service::DEFAULT_DEBOUNCE_MS;

pub const DEFAULT_SITE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 15_000;

/// Client configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the ER Builds site
    pub site_url: String,
    /// Base URL of the item catalog API
    pub catalog_url: String,
    /// Per-request timeout (native only)
    pub request_timeout_ms: u64,
    /// Delay between the last keystroke and a suggestion lookup
    pub debounce_ms: u64,
    /// Unread notification poll interval
    pub notification_poll_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            site_url: DEFAULT_SITE_URL.to_string(),
            catalog_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            notification_poll_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file is read first on native builds. The browser has no
    /// environment, so wasm builds get the defaults.
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };
        let millis = |key: &str, default: u64| match lookup(key) {
            None => default,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(key, value = %raw, default, "Invalid number, using default");
                default
            }),
        };

        Self {
            site_url: text("ERBUILDS_SITE_URL", defaults.site_url),
            catalog_url: text("ERBUILDS_CATALOG_URL", defaults.catalog_url),
            request_timeout_ms: millis("ERBUILDS_REQUEST_TIMEOUT_MS", defaults.request_timeout_ms),
            debounce_ms: millis("ERBUILDS_DEBOUNCE_MS", defaults.debounce_ms),
            notification_poll_ms: millis(
                "ERBUILDS_NOTIFICATION_POLL_MS",
                defaults.notification_poll_ms,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(ClientConfig::from_lookup(lookup(&[])), ClientConfig::default());
        let config = ClientConfig::default();
        assert_eq!(config.catalog_url, "https://eldenring.fanapis.com/api");
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.notification_poll_ms, 30_000);
    }

    #[test]
    fn values_are_read_and_trimmed() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("ERBUILDS_SITE_URL", "https://erbuilds.example/ "),
            ("ERBUILDS_DEBOUNCE_MS", "150"),
        ]));
        assert_eq!(config.site_url, "https://erbuilds.example");
        assert_eq!(config.debounce_ms, 150);
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let config = ClientConfig::from_lookup(lookup(&[("ERBUILDS_REQUEST_TIMEOUT_MS", "soon")]));
        assert_eq!(config.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
    }
}
