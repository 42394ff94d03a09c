//! Normalize calendar event boundaries into minute offsets from a reference day.
//!
//! An offset of 0 is midnight at the start of the reference day in the business
//! time zone; 1440 is the following midnight. Offsets may be negative or exceed
//! a day for events that span several days.
//!
//! Day differences are taken between calendar dates, never by dividing elapsed
//! hours, so a 23- or 25-hour DST day still counts as exactly one day.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::dst::{localize, DstPolicy};
use crate::schedule::MINUTES_PER_DAY;

/// One end of a calendar event, in the shape Google Calendar emits.
///
/// All-day events carry `date`; timed events carry `dateTime` and optionally
/// `timeZone`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBoundary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventBoundary {
    pub fn all_day(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            ..Self::default()
        }
    }

    pub fn at(date_time: impl Into<String>) -> Self {
        Self {
            date_time: Some(date_time.into()),
            ..Self::default()
        }
    }

    pub fn at_in_zone(date_time: impl Into<String>, time_zone: impl Into<String>) -> Self {
        Self {
            date_time: Some(date_time.into()),
            time_zone: Some(time_zone.into()),
            ..Self::default()
        }
    }
}

/// Calendar date with no zone attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateParts {
    pub fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl<D: Datelike> From<&D> for DateParts {
    fn from(d: &D) -> Self {
        Self {
            year: d.year(),
            month: d.month(),
            day: d.day(),
        }
    }
}

/// Signed number of calendar days from `reference` to `date`.
pub fn day_offset(date: DateParts, reference: DateParts) -> Option<i64> {
    Some(
        date.to_naive()?
            .signed_duration_since(reference.to_naive()?)
            .num_days(),
    )
}

/// Minutes from the reference day's local midnight to `boundary`.
///
/// Returns `None` when the boundary has neither a usable `dateTime` nor a
/// usable `date`. Callers skip such events.
pub fn normalize_boundary(
    boundary: &EventBoundary,
    reference: NaiveDate,
    business_tz: Tz,
    policy: DstPolicy,
) -> Option<i64> {
    if let Some(raw) = boundary.date_time.as_deref() {
        let zone = boundary
            .time_zone
            .as_deref()
            .and_then(|z| z.parse::<Tz>().ok())
            .unwrap_or(business_tz);
        let local = parse_date_time(raw, zone, policy)?.with_timezone(&business_tz);
        let days = day_offset(DateParts::from(&local), DateParts::from(&reference))?;
        let minutes = i64::from(local.hour() * 60 + local.minute());
        return Some(days * MINUTES_PER_DAY + minutes);
    }

    let date = NaiveDate::parse_from_str(boundary.date.as_deref()?.trim(), "%Y-%m-%d").ok()?;
    Some(day_offset(DateParts::from(&date), DateParts::from(&reference))? * MINUTES_PER_DAY)
}

/// Parse a `dateTime` value. Strings with an offset are absolute; strings
/// without one are read as wall-clock time in `zone`.
pub fn parse_date_time(raw: &str, zone: Tz, policy: DstPolicy) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Some(dt) = parse_with_offset(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())?;
    localize(naive, &zone, policy).map(|dt| dt.with_timezone(&Utc))
}

fn parse_with_offset(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    // Seconds-less forms such as `2024-06-03T10:00+02:00` or `2024-06-03T10:00Z`.
    let owned;
    let candidate = match raw.strip_suffix('Z').or_else(|| raw.strip_suffix('z')) {
        Some(stripped) => {
            owned = format!("{stripped}+00:00");
            owned.as_str()
        }
        None => raw,
    };
    DateTime::parse_from_str(candidate, "%Y-%m-%dT%H:%M%:z").ok()
}

/// UTC instants of the reference day's local midnight and the next one.
///
/// A midnight that falls in a DST gap resolves to the first valid instant
/// after it, whatever policy applies to event times.
pub fn day_bounds_utc(reference: NaiveDate, tz: Tz) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let midnight = |date: NaiveDate| localize(date.and_hms_opt(0, 0, 0)?, &tz, DstPolicy::ShiftForward);
    let start = midnight(reference)?;
    let end = midnight(reference.succ_opt()?)?;
    Some((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}
