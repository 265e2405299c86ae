//! # Telegram Notifier
//!
//! Implements the `Notifier` trait over the Telegram Bot HTTP API. This is
//! the bridge between the poller's generic notification interface and the
//! `sendMessage` wire format.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::BotError;

/// Abstract interface for the outbound messaging collaborator.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `text` to the configured chat.
    async fn send(&self, text: &str) -> Result<(), BotError>;
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct SendMessageResponse {
    ok: bool,
    description: Option<String>,
}

pub struct TelegramNotifier {
    http: reqwest::Client,
    url: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        Ok(Self {
            http,
            url: format!(
                "https://api.telegram.org/bot{}/sendMessage",
                config.telegram_token
            ),
            chat_id: config.telegram_chat_id.clone(),
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), BotError> {
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
        };

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Notify(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Telegram puts the reason in the body; include it when present.
            let body: Option<SendMessageResponse> = response.json().await.ok();
            let reason = body
                .and_then(|b| b.description)
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(BotError::Notify(reason));
        }

        let body: SendMessageResponse = response
            .json()
            .await
            .map_err(|e| BotError::Notify(e.to_string()))?;
        if !body.ok {
            return Err(BotError::Notify(
                body.description
                    .unwrap_or_else(|| "telegram reported ok=false".to_string()),
            ));
        }

        Ok(())
    }
}
