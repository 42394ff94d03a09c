//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlotError {
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    /// The request date does not have the `YYYY-MM-DD` shape.
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    /// The request date has the right shape but names no calendar day.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Remote calendar failure. Never escapes the resolver.
    #[error("Calendar unavailable: {0}")]
    Upstream(String),
}

impl SlotError {
    /// True for errors caused by the caller's input rather than by a defect
    /// in configuration or an upstream service.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SlotError::InvalidDateFormat(_) | SlotError::InvalidDate(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SlotError>;
