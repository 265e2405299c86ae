//! # Error Taxonomy
//!
//! One tagged enum for everything that can go wrong during a poll cycle.
//! Only `Config` is fatal; the rest are handled at the loop boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    /// A required setting is missing or unusable. Raised only at startup.
    #[error("missing or invalid configuration: {0}")]
    Config(String),

    /// The request to the status API could not be sent or timed out.
    #[error("request to the status API failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The status API answered with a non-200 status code.
    #[error("status API returned HTTP {0}")]
    Upstream(reqwest::StatusCode),

    /// The status API answered 200 but the body does not match the
    /// documented shape.
    #[error("malformed status API response: {0}")]
    Shape(String),

    /// The messaging collaborator rejected or failed a send. Logged and
    /// swallowed by the loop, never surfaced through the channel itself.
    #[error("failed to deliver notification: {0}")]
    Notify(String),
}

impl BotError {
    pub fn shape(detail: impl Into<String>) -> Self {
        Self::Shape(detail.into())
    }
}
