//! Channel domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::quotes::Quote;
use crate::videos::Video;

/// Domain model representing a stock channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub ticker: String,
    pub company_name: String,
    pub channel_number: i32,
    pub created_at: NaiveDateTime,
}

/// Input model for seeding a channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewChannel {
    pub ticker: String,
    pub company_name: String,
    pub channel_number: i32,
}

/// Outcome of a registry initialization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelInitResult {
    pub message: String,
    /// Channels inserted by this call (zero when already seeded)
    pub created: usize,
    /// Channels present after the call
    pub total: i64,
}

/// A channel together with its top videos and current quote
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelOverview {
    pub channel: Channel,
    pub videos: Vec<Video>,
    pub current_video: Option<Video>,
    pub stock_data: Option<Quote>,
}

/// Upper-cases and trims a ticker taken from a request.
pub fn normalize_ticker(raw: &str) -> Result<String> {
    let ticker = raw.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(ValidationError::MissingField("ticker".to_string()).into());
    }
    if ticker.len() > 12 || !ticker.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-') {
        return Err(ValidationError::InvalidInput(format!("Invalid ticker '{}'", raw)).into());
    }
    Ok(ticker)
}
