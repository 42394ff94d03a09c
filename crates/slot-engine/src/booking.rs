//! Read-only view of locally recorded bookings.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A `(date, time)` pair already held by an appointment request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookedSlot {
    pub date: String,
    pub time: String,
}

impl BookedSlot {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
        }
    }
}

/// Owned copy of the booking collection taken before a resolution starts.
/// Later appends to the store do not reach an existing snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingSnapshot {
    slots: Vec<BookedSlot>,
}

impl BookingSnapshot {
    pub fn new(slots: Vec<BookedSlot>) -> Self {
        Self { slots }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Times booked on `date`, compared as exact strings.
    pub fn reserved_times(&self, date: &str) -> HashSet<&str> {
        self.slots
            .iter()
            .filter(|b| b.date == date)
            .map(|b| b.time.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl FromIterator<BookedSlot> for BookingSnapshot {
    fn from_iter<I: IntoIterator<Item = BookedSlot>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
