//! Fixed-width slot labels for an opening window.
//!
//! Labels are `HH:MM` wall-clock strings in the business-local day. There is no
//! wraparound across midnight: a window whose close is not after its open yields
//! nothing.

use crate::error::Result;
use crate::schedule::{ClockTime, OpenWindow};

pub const DEFAULT_SLOT_INTERVAL_MINUTES: u32 = 30;

/// Generate slot labels from `open` up to, but not including, `close`.
///
/// # Errors
/// Returns `SlotError::InvalidTimeFormat` if either bound is not `HH:MM`.
pub fn generate_slots(open: &str, close: &str, interval_minutes: u32) -> Result<Vec<String>> {
    let window = OpenWindow::parse(open, close)?;
    Ok(window_slots(&window, interval_minutes))
}

/// Generate slot labels for an already-parsed window.
pub fn window_slots(window: &OpenWindow, interval_minutes: u32) -> Vec<String> {
    if window.is_empty() || interval_minutes == 0 {
        return Vec::new();
    }

    (window.open.minutes()..window.close.minutes())
        .step_by(interval_minutes as usize)
        .map(format_minutes)
        .collect()
}

/// Format minutes since midnight as a zero-padded `HH:MM` label.
pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Minutes since midnight for a label produced by this module.
pub fn label_minutes(label: &str) -> Option<u32> {
    ClockTime::parse(label).ok().map(ClockTime::minutes)
}

/// Number of labels [`window_slots`] produces: `ceil((close - open) / interval)`.
pub fn slot_count(window: &OpenWindow, interval_minutes: u32) -> usize {
    if window.is_empty() || interval_minutes == 0 {
        return 0;
    }
    let span = window.close.minutes() - window.open.minutes();
    span.div_ceil(interval_minutes) as usize
}
