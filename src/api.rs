//! # Review API Client
//!
//! Fetches homework status events from the Practicum review API and checks
//! the response against the documented shape. The API is loosely typed in
//! practice, so validation works on `serde_json::Value` rather than derived
//! structs: every deviation maps to `BotError::Shape` with a message naming
//! what was wrong.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::config::Config;
use crate::error::BotError;

/// Abstract source of review events. Lets the poller run against a scripted
/// in-memory source in tests.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch all events since `checkpoint` (a Unix timestamp).
    async fn fetch(&self, checkpoint: i64) -> Result<Value, BotError>;
}

/// A validated API response: the homework batch plus the server clock value
/// the next query window starts from.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub homeworks: Vec<Value>,
    pub current_date: i64,
}

/// HTTP client for the review API.
pub struct ReviewApi {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl ReviewApi {
    pub fn new(config: &Config, endpoint: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            token: config.practicum_token.clone(),
        })
    }
}

#[async_trait]
impl StatusSource for ReviewApi {
    async fn fetch(&self, checkpoint: i64) -> Result<Value, BotError> {
        let response = self
            .http
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", checkpoint)])
            .send()
            .await
            .map_err(BotError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BotError::Upstream(status));
        }

        response.json().await.map_err(BotError::Transport)
    }
}

/// Check a raw API response against the documented shape.
///
/// An empty `homeworks` array is valid and means "no new events".
pub fn validate(response: &Value) -> Result<Batch, BotError> {
    let object = response
        .as_object()
        .ok_or_else(|| BotError::shape("response is not a JSON object"))?;

    let homeworks = object
        .get("homeworks")
        .ok_or_else(|| BotError::shape("response has no homeworks key"))?
        .as_array()
        .ok_or_else(|| BotError::shape("homeworks is not an array"))?;

    if let Some(bad) = homeworks.iter().find(|entry| !entry.is_object()) {
        return Err(BotError::shape(format!(
            "homeworks entry is not an object: {bad}"
        )));
    }

    let current_date = object
        .get("current_date")
        .and_then(Value::as_i64)
        .ok_or_else(|| BotError::shape("response has no integer current_date"))?;

    Ok(Batch {
        homeworks: homeworks.clone(),
        current_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn well_formed_response_passes() {
        let response = json!({
            "homeworks": [{"homework_name": "hw1", "status": "approved"}],
            "current_date": 1700000100,
        });
        let batch = validate(&response).unwrap();
        assert_eq!(batch.homeworks.len(), 1);
        assert_eq!(batch.current_date, 1700000100);
    }

    #[test]
    fn empty_homeworks_is_valid() {
        let response = json!({"homeworks": [], "current_date": 1700000200});
        let batch = validate(&response).unwrap();
        assert!(batch.homeworks.is_empty());
        assert_eq!(batch.current_date, 1700000200);
    }

    #[test]
    fn non_object_response_fails() {
        assert!(matches!(
            validate(&json!(["homeworks"])),
            Err(BotError::Shape(_))
        ));
    }

    #[test]
    fn missing_homeworks_key_fails() {
        let response = json!({"current_date": 1700000000});
        assert!(matches!(validate(&response), Err(BotError::Shape(_))));
    }

    #[test]
    fn homeworks_must_be_an_array() {
        let response = json!({"homeworks": {"homework_name": "hw1"}, "current_date": 1});
        assert!(matches!(validate(&response), Err(BotError::Shape(_))));
    }

    #[test]
    fn homeworks_entries_must_be_objects() {
        let response = json!({"homeworks": ["approved"], "current_date": 1});
        assert!(matches!(validate(&response), Err(BotError::Shape(_))));
    }

    #[test]
    fn missing_current_date_fails() {
        let response = json!({"homeworks": []});
        assert!(matches!(validate(&response), Err(BotError::Shape(_))));
    }

    #[test]
    fn non_integer_current_date_fails() {
        let response = json!({"homeworks": [], "current_date": "today"});
        assert!(matches!(validate(&response), Err(BotError::Shape(_))));
    }
}
