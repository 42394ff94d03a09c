//! File-backed inputs for the CLI.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slot_engine::busy::{parse_events_json, CalendarEvent};
use slot_engine::calendar::CalendarSource;
use slot_engine::error::SlotError;
use slot_engine::{BookedSlot, BookingSnapshot};

/// Calendar events read from a JSON file at fetch time.
///
/// A missing or malformed file is reported as an upstream failure, so the
/// resolver treats it exactly like an unreachable calendar service.
pub struct JsonFileCalendar {
    path: PathBuf,
}

impl JsonFileCalendar {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CalendarSource for JsonFileCalendar {
    async fn fetch_events(
        &self,
        _window_start: DateTime<Utc>,
        _window_end: DateTime<Utc>,
    ) -> slot_engine::error::Result<Vec<CalendarEvent>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SlotError::Upstream(format!("{}: {}", self.path.display(), e)))?;
        parse_events_json(&content)
    }
}

/// Load bookings from a JSON array of `{"date": ..., "time": ...}` objects.
pub fn load_bookings(path: Option<&str>) -> Result<BookingSnapshot> {
    let Some(path) = path else {
        return Ok(BookingSnapshot::empty());
    };
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))?;
    let slots: Vec<BookedSlot> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse bookings: {}", path))?;
    Ok(BookingSnapshot::new(slots))
}
