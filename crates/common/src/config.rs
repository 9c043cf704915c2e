use std::time::Duration;

use crate::error::{HeraldError, Result};

/// Review API endpoint queried for homework status changes.
pub const DEFAULT_PRACTICUM_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Telegram Bot API base URL.
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Pause between two polls, in seconds.
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;

const DEFAULT_LOG_FILE: &str = "homework_bot.log";
const DEFAULT_LOG_MAX_FILES: usize = 5;

/// Environment keys that must be present and non-empty.
const REQUIRED_KEYS: [&str; 3] = ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

/// Application configuration, built once at startup and handed to every
/// component that needs it.
#[derive(Clone)]
pub struct AppConfig {
    /// OAuth token for the review API
    pub practicum_token: String,

    /// Telegram bot token
    pub telegram_token: String,

    /// Chat that receives every notification
    pub telegram_chat_id: String,

    pub practicum_endpoint: String,

    pub telegram_api_url: String,

    /// Pause between polls (default: 600s)
    pub retry_period: Duration,

    /// Base path of the rotating log file
    pub log_file: String,

    /// Number of rotated log files kept on disk (default: 5)
    pub log_max_files: usize,
}

impl AppConfig {
    /// Load configuration from `.env` (if present) and environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Empty values count as missing. Every missing required key is listed
    /// in the returned error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let missing: Vec<&str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| get(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(HeraldError::Config(format!(
                "Отсутствуют одна или несколько переменных окружения: {}",
                missing.join(", ")
            )));
        }

        let retry_period_secs = match get("RETRY_PERIOD_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                HeraldError::Config("RETRY_PERIOD_SECS must be a valid u64".to_string())
            })?,
            None => DEFAULT_RETRY_PERIOD_SECS,
        };

        let log_max_files = match get("LOG_MAX_FILES") {
            Some(raw) => raw.parse::<usize>().map_err(|_| {
                HeraldError::Config("LOG_MAX_FILES must be a valid usize".to_string())
            })?,
            None => DEFAULT_LOG_MAX_FILES,
        };

        Ok(Self {
            practicum_token: get("PRACTICUM_TOKEN").unwrap_or_default(),
            telegram_token: get("TELEGRAM_TOKEN").unwrap_or_default(),
            telegram_chat_id: get("TELEGRAM_CHAT_ID").unwrap_or_default(),
            practicum_endpoint: get("PRACTICUM_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_PRACTICUM_ENDPOINT.to_string()),
            telegram_api_url: get("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            retry_period: Duration::from_secs(retry_period_secs),
            log_file: get("LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
            log_max_files,
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("practicum_endpoint", &self.practicum_endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("retry_period", &self.retry_period)
            .field("log_file", &self.log_file)
            .field("log_max_files", &self.log_max_files)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            ("PRACTICUM_TOKEN", "practicum-secret"),
            ("TELEGRAM_TOKEN", "telegram-secret"),
            ("TELEGRAM_CHAT_ID", "12345"),
        ]
    }

    #[test]
    fn test_defaults_applied() {
        let config = AppConfig::from_lookup(lookup_from(&required())).unwrap();
        assert_eq!(config.practicum_endpoint, DEFAULT_PRACTICUM_ENDPOINT);
        assert_eq!(config.telegram_api_url, DEFAULT_TELEGRAM_API_URL);
        assert_eq!(config.retry_period, Duration::from_secs(600));
        assert_eq!(config.log_max_files, 5);
        assert_eq!(config.telegram_chat_id, "12345");
    }

    #[test]
    fn test_each_missing_credential_is_fatal() {
        for skipped in REQUIRED_KEYS {
            let pairs: Vec<_> = required()
                .into_iter()
                .filter(|(k, _)| *k != skipped)
                .collect();
            let err = AppConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
            assert!(matches!(err, HeraldError::Config(_)));
            assert!(err.to_string().contains(skipped), "{err}");
        }
    }

    #[test]
    fn test_empty_credential_counts_as_missing() {
        let mut pairs = required();
        pairs[1] = ("TELEGRAM_TOKEN", "  ");
        let err = AppConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(err.to_string().contains("TELEGRAM_TOKEN"));
    }

    #[test]
    fn test_all_missing_keys_reported() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        let text = err.to_string();
        for key in REQUIRED_KEYS {
            assert!(text.contains(key));
        }
    }

    #[test]
    fn test_overrides_parsed() {
        let mut pairs = required();
        pairs.push(("RETRY_PERIOD_SECS", "30"));
        pairs.push(("PRACTICUM_ENDPOINT", "http://127.0.0.1:9000/statuses/"));
        let config = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.retry_period, Duration::from_secs(30));
        assert_eq!(config.practicum_endpoint, "http://127.0.0.1:9000/statuses/");
    }

    #[test]
    fn test_invalid_retry_period_rejected() {
        let mut pairs = required();
        pairs.push(("RETRY_PERIOD_SECS", "ten minutes"));
        let err = AppConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(err.to_string().contains("RETRY_PERIOD_SECS"));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let config = AppConfig::from_lookup(lookup_from(&required())).unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("practicum-secret"));
        assert!(!printed.contains("telegram-secret"));
        assert!(printed.contains("12345"));
    }
}
