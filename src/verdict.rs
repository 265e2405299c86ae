//! Homework verdict codes and notification text.
//!
//! The review API reports one of three fixed verdict codes per homework;
//! anything else in the `status` field is treated as a malformed record.

use serde_json::Value;

use crate::error::BotError;

/// Review outcome for a single homework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    /// Parse a verdict code from the API's `status` field.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Verdict::Approved),
            "reviewing" => Some(Verdict::Reviewing),
            "rejected" => Some(Verdict::Rejected),
            _ => None,
        }
    }

    /// Human-readable verdict text shown to the user.
    pub fn text(self) -> &'static str {
        match self {
            Verdict::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Verdict::Reviewing => "Работа взята на проверку ревьюером.",
            Verdict::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// Build the notification text for one homework record.
///
/// Fails with `BotError::Shape` if `homework_name` or `status` is missing or
/// if `status` is not one of the documented verdict codes.
pub fn describe(record: &Value) -> Result<String, BotError> {
    let name = record
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or_else(|| BotError::shape("homework record has no homework_name"))?;

    let code = record
        .get("status")
        .and_then(Value::as_str)
        .ok_or_else(|| BotError::shape("homework record has no status"))?;

    let verdict = Verdict::from_code(code)
        .ok_or_else(|| BotError::shape(format!("undocumented homework status {code:?}")))?;

    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {}",
        verdict.text()
    ))
}
