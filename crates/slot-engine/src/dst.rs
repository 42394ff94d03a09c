//! DST policies for placing local wall-clock times on the timeline.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Policy for local times that fall into a DST gap (e.g., 02:30 on a
/// spring-forward night). Ambiguous times in a fall-back overlap always
/// resolve to the earlier instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Treat a nonexistent local time as unknown.
    Skip,
    /// Move a nonexistent local time forward past the gap.
    #[default]
    ShiftForward,
}

/// Resolve a naive local datetime in `tz` according to `policy`.
pub fn localize<Z: TimeZone>(naive: NaiveDateTime, tz: &Z, policy: DstPolicy) -> Option<DateTime<Z>> {
    if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
        return Some(dt);
    }

    match policy {
        DstPolicy::Skip => None,
        // Gaps are at most an hour in practice; probe in quarter hours so
        // half-hour zones land on the first valid instant too.
        DstPolicy::ShiftForward => (1..=8)
            .map(|q| naive + Duration::minutes(15 * q))
            .find_map(|shifted| tz.from_local_datetime(&shifted).earliest()),
    }
}
