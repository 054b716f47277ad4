//! Conversions between `Duration` and the `m:ss` text used for display.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseDurationError {
    #[error("expected `m:ss`, got {0:?}")]
    Malformed(String),
    #[error("seconds must be below 60 in {0:?}")]
    SecondsOutOfRange(String),
}

/// Parse `m:ss` (e.g. `3:45`) into a `Duration`.
pub fn parse_duration(text: &str) -> Result<Duration, ParseDurationError> {
    let trimmed = text.trim();
    let malformed = || ParseDurationError::Malformed(text.to_string());

    let (minutes, seconds) = trimmed.split_once(':').ok_or_else(malformed)?;
    let minutes: u64 = minutes.parse().map_err(|_| malformed())?;
    let seconds: u64 = seconds.parse().map_err(|_| malformed())?;
    if seconds >= 60 {
        return Err(ParseDurationError::SecondsOutOfRange(text.to_string()));
    }

    let total = minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(malformed)?;
    Ok(Duration::from_secs(total))
}

/// Format as `m:ss`, dropping fractional seconds.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
