//! Availability resolution for a single date.
//!
//! Candidate slots come from the weekly template. Slots held by local bookings
//! or blocked by the remote calendar are removed; the rest keep their
//! generation order.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::booking::BookingSnapshot;
use crate::calendar::{fetch_busy_slots, CalendarSource, FetchOptions};
use crate::config::EngineSettings;
use crate::error::{Result, SlotError};
use crate::slots::window_slots;

/// Free slots for one date, ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub date: String,
    pub slots: Vec<String>,
}

/// Validate a `YYYY-MM-DD` request date.
///
/// # Errors
/// `SlotError::InvalidDateFormat` when the shape is wrong,
/// `SlotError::InvalidDate` when the shape is right but the day does not exist.
pub fn parse_request_date(date: &str) -> Result<NaiveDate> {
    let bytes = date.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(SlotError::InvalidDateFormat(date.to_string()));
    }

    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| SlotError::InvalidDate(date.to_string()))
}

/// Compute the free slots for `date`.
///
/// The weekday comes from the date's components alone. Closed days return
/// immediately without touching the calendar, and so do open days whose
/// window produces no candidates. Calendar failures never surface here.
///
/// # Errors
/// Only validation errors from [`parse_request_date`].
pub async fn resolve(
    date: &str,
    settings: &EngineSettings,
    bookings: &BookingSnapshot,
    calendar: &dyn CalendarSource,
) -> Result<AvailabilityResult> {
    let day = parse_request_date(date)?;
    let weekday = day.weekday();

    let Some(window) = settings.schedule.window_for(weekday) else {
        debug!(date, ?weekday, "closed");
        return Ok(AvailabilityResult {
            date: date.to_string(),
            slots: Vec::new(),
        });
    };

    let candidates = window_slots(&window, settings.slot_interval_minutes);
    let reserved = bookings.reserved_times(date);

    let busy = if candidates.is_empty() {
        Default::default()
    } else {
        let options = FetchOptions {
            business_tz: settings.business_tz,
            interval_minutes: settings.slot_interval_minutes,
            policy: settings.dst_policy,
            timeout: settings.calendar_timeout,
        };
        fetch_busy_slots(calendar, &candidates, day, options).await
    };

    let total = candidates.len();
    let slots: Vec<String> = candidates
        .into_iter()
        .filter(|slot| !reserved.contains(slot.as_str()) && !busy.contains(slot))
        .collect();

    debug!(
        date,
        candidates = total,
        reserved = reserved.len(),
        busy = busy.len(),
        free = slots.len(),
        "resolved availability"
    );

    Ok(AvailabilityResult {
        date: date.to_string(),
        slots,
    })
}

/// Settings plus a calendar source, shareable across concurrent requests.
#[derive(Clone)]
pub struct Resolver {
    settings: Arc<EngineSettings>,
    calendar: Arc<dyn CalendarSource>,
}

impl Resolver {
    pub fn new(settings: EngineSettings, calendar: Arc<dyn CalendarSource>) -> Self {
        Self {
            settings: Arc::new(settings),
            calendar,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Resolve `date` against a snapshot the caller took beforehand.
    pub async fn resolve(&self, date: &str, bookings: &BookingSnapshot) -> Result<AvailabilityResult> {
        resolve(date, &self.settings, bookings, self.calendar.as_ref()).await
    }
}
