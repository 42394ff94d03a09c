//! Turn remote calendar events into the set of slot labels they block.
//!
//! Each event is normalized to minute offsets on the reference day, clamped to
//! that day, and tested against every candidate slot with half-open interval
//! overlap. Events that cannot be normalized are skipped, never treated as
//! blocking the whole day.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dst::DstPolicy;
use crate::error::{Result, SlotError};
use crate::normalize::{normalize_boundary, EventBoundary};
use crate::schedule::MINUTES_PER_DAY;
use crate::slots::label_minutes;

/// A remote calendar event as listed by the calendar provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub start: EventBoundary,
    #[serde(default)]
    pub end: EventBoundary,
}

impl CalendarEvent {
    pub fn new(start: EventBoundary, end: EventBoundary) -> Self {
        Self {
            start,
            end,
            ..Self::default()
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.status.as_deref() == Some("cancelled")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EventPayload {
    List(Vec<CalendarEvent>),
    Page { items: Vec<CalendarEvent> },
}

/// Parse events from JSON: either a bare array or a provider page with an
/// `items` array.
///
/// # Errors
/// Returns `SlotError::Upstream` when the payload matches neither shape,
/// including objects without `items` such as provider error documents.
pub fn parse_events_json(json: &str) -> Result<Vec<CalendarEvent>> {
    match serde_json::from_str(json) {
        Ok(EventPayload::List(events)) | Ok(EventPayload::Page { items: events }) => Ok(events),
        Err(e) => Err(SlotError::Upstream(format!("malformed event payload: {}", e))),
    }
}

/// Half-open minute range `[start, end)` relative to the reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyInterval {
    pub start: i64,
    pub end: i64,
}

impl BusyInterval {
    /// Two half-open ranges overlap iff each starts before the other ends.
    /// Touching ranges do not overlap.
    pub fn overlaps(&self, start: i64, end: i64) -> bool {
        start < self.end && end > self.start
    }
}

/// Normalize and clamp an event to the reference day.
///
/// Returns `None` for cancelled events, events with an unknown boundary, and
/// events with nothing left after clamping.
pub fn busy_interval(
    event: &CalendarEvent,
    reference: NaiveDate,
    business_tz: Tz,
    policy: DstPolicy,
) -> Option<BusyInterval> {
    if event.is_cancelled() {
        return None;
    }

    let start = normalize_boundary(&event.start, reference, business_tz, policy)?;
    let end = normalize_boundary(&event.end, reference, business_tz, policy)?;

    let start = start.clamp(0, MINUTES_PER_DAY);
    let end = end.clamp(0, MINUTES_PER_DAY);

    (start < end).then_some(BusyInterval { start, end })
}

/// Collect the candidate slots blocked by any event.
///
/// `candidates` are labels from the slot generator; each covers
/// `interval_minutes` from its start.
pub fn extract_busy_slots(
    events: &[CalendarEvent],
    candidates: &[String],
    reference: NaiveDate,
    business_tz: Tz,
    interval_minutes: u32,
    policy: DstPolicy,
) -> BTreeSet<String> {
    let width = i64::from(interval_minutes);
    let slots: Vec<(&String, i64)> = candidates
        .iter()
        .filter_map(|label| label_minutes(label).map(|m| (label, i64::from(m))))
        .collect();

    let mut busy = BTreeSet::new();
    for event in events {
        let Some(interval) = busy_interval(event, reference, business_tz, policy) else {
            debug!(
                event_id = event.id.as_deref().unwrap_or("-"),
                "skipping calendar event without a usable range on {}", reference
            );
            continue;
        };

        for (label, start) in &slots {
            if interval.overlaps(*start, start + width) {
                busy.insert(label.to_string());
            }
        }
    }

    busy
}
