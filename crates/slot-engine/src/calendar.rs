//! Remote calendar access as an injected capability.
//!
//! The resolver never talks to the network directly; it is handed a
//! [`CalendarSource`]. Whatever the source does, [`fetch_busy_slots`] turns
//! failures and timeouts into an empty busy set so availability degrades to
//! "ignore the external calendar" instead of failing the request.

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::busy::{extract_busy_slots, CalendarEvent};
use crate::dst::DstPolicy;
use crate::error::{Result, SlotError};
use crate::normalize::day_bounds_utc;

/// Anything that can list calendar events overlapping a UTC range.
#[async_trait]
pub trait CalendarSource: Send + Sync {
    async fn fetch_events(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>>;
}

/// No remote calendar configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCalendar;

#[async_trait]
impl CalendarSource for NoCalendar {
    async fn fetch_events(
        &self,
        _window_start: DateTime<Utc>,
        _window_end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>> {
        Ok(Vec::new())
    }
}

/// A fixed list of events, returned regardless of the requested range.
/// The busy extractor clamps to the reference day, so extra events are harmless.
#[derive(Debug, Clone, Default)]
pub struct StaticCalendar {
    events: Vec<CalendarEvent>,
}

impl StaticCalendar {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl CalendarSource for StaticCalendar {
    async fn fetch_events(
        &self,
        _window_start: DateTime<Utc>,
        _window_end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>> {
        Ok(self.events.clone())
    }
}

/// Always fails with [`SlotError::Upstream`].
#[derive(Debug, Clone)]
pub struct FailingCalendar {
    reason: String,
}

impl FailingCalendar {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl CalendarSource for FailingCalendar {
    async fn fetch_events(
        &self,
        _window_start: DateTime<Utc>,
        _window_end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>> {
        Err(SlotError::Upstream(self.reason.clone()))
    }
}

/// Parameters shared by every busy-slot lookup.
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub business_tz: Tz,
    pub interval_minutes: u32,
    pub policy: DstPolicy,
    pub timeout: Duration,
}

/// Fetch the reference day's events and return the candidate slots they block.
///
/// Never fails: errors, timeouts and an unrepresentable day window all yield
/// an empty set.
pub async fn fetch_busy_slots(
    source: &dyn CalendarSource,
    candidates: &[String],
    reference: NaiveDate,
    options: FetchOptions,
) -> BTreeSet<String> {
    let Some((window_start, window_end)) = day_bounds_utc(reference, options.business_tz) else {
        warn!(%reference, "cannot place reference day in {}; ignoring calendar", options.business_tz.name());
        return BTreeSet::new();
    };

    let events = match tokio::time::timeout(options.timeout, source.fetch_events(window_start, window_end)).await {
        Ok(Ok(events)) => events,
        Ok(Err(e)) => {
            warn!(%reference, error = %e, "calendar fetch failed; continuing without it");
            return BTreeSet::new();
        }
        Err(_) => {
            warn!(%reference, timeout_ms = options.timeout.as_millis() as u64, "calendar fetch timed out; continuing without it");
            return BTreeSet::new();
        }
    };

    debug!(%reference, events = events.len(), "fetched calendar events");
    extract_busy_slots(
        &events,
        candidates,
        reference,
        options.business_tz,
        options.interval_minutes,
        options.policy,
    )
}
