//! Environment-sourced bot configuration.
//!
//! All three tokens are mandatory; absence of any is a fatal startup error.
//! The poll interval and HTTP timeout have defaults but can be overridden so
//! the timeout is never left to the HTTP client's implicit behaviour.

use std::env;
use std::time::Duration;

use crate::error::BotError;

pub const ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration for the poller and both HTTP collaborators.
#[derive(Debug, Clone)]
pub struct Config {
    /// OAuth token for the homework-review API.
    pub practicum_token: String,
    /// Bot token for the Telegram API.
    pub telegram_token: String,
    /// Chat the notifications go to.
    pub telegram_chat_id: String,
    /// Fixed sleep between poll cycles.
    pub poll_interval: Duration,
    /// Timeout applied to every outbound HTTP request.
    pub http_timeout: Duration,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Fails with `BotError::Config` naming the first offending variable.
    pub fn from_env() -> Result<Self, BotError> {
        Ok(Self {
            practicum_token: required("PRACTICUM_TOKEN")?,
            telegram_token: required("TELEGRAM_TOKEN")?,
            telegram_chat_id: required("TELEGRAM_CHAT_ID")?,
            poll_interval: duration_or("POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS)?,
            http_timeout: duration_or("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?,
        })
    }
}

fn required(name: &str) -> Result<String, BotError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(BotError::Config(format!(
            "environment variable {name} is not set"
        ))),
    }
}

fn duration_or(name: &str, default_secs: u64) -> Result<Duration, BotError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| BotError::Config(format!("{name} must be a whole number of seconds"))),
        Err(_) => Ok(Duration::from_secs(default_secs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var tests mutate process state, so each one uses its own
    // variable names to stay independent of test ordering.

    #[test]
    fn missing_variable_is_a_config_error() {
        let err = required("STATUSBOT_TEST_UNSET_VAR").unwrap_err();
        assert!(matches!(err, BotError::Config(_)));
        assert!(err.to_string().contains("STATUSBOT_TEST_UNSET_VAR"));
    }

    #[test]
    fn empty_variable_counts_as_missing() {
        unsafe { env::set_var("STATUSBOT_TEST_EMPTY_VAR", "") };
        let err = required("STATUSBOT_TEST_EMPTY_VAR").unwrap_err();
        assert!(matches!(err, BotError::Config(_)));
    }

    #[test]
    fn interval_defaults_when_unset() {
        let interval = duration_or("STATUSBOT_TEST_NO_INTERVAL", 600).unwrap();
        assert_eq!(interval, Duration::from_secs(600));
    }

    #[test]
    fn malformed_interval_is_a_config_error() {
        unsafe { env::set_var("STATUSBOT_TEST_BAD_INTERVAL", "soon") };
        let err = duration_or("STATUSBOT_TEST_BAD_INTERVAL", 600).unwrap_err();
        assert!(matches!(err, BotError::Config(_)));
    }
}
