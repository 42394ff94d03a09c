//! Weekly opening-hours template.
//!
//! A [`WeeklySchedule`] holds at most one [`OpenWindow`] per weekday. A missing
//! window means the business is closed that day and no slots are ever offered.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

pub const MINUTES_PER_DAY: i64 = 1440;

/// A wall-clock time of day, stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u32);

impl ClockTime {
    /// The end of the day, usable as a closing time.
    pub const MIDNIGHT: ClockTime = ClockTime(MINUTES_PER_DAY as u32);

    /// Build from hour and minute. Accepts 00:00..=23:59 plus `24:00`.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        match (hour, minute) {
            (24, 0) => Some(Self::MIDNIGHT),
            (h, m) if h < 24 && m < 60 => Some(ClockTime(h * 60 + m)),
            _ => None,
        }
    }

    /// Parse an `HH:MM` string. Single-digit hours (`8:30`) are accepted.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || SlotError::InvalidTimeFormat(s.to_string());

        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        if h.is_empty() || m.len() != 2 {
            return Err(invalid());
        }
        let hour: u32 = h.parse().map_err(|_| invalid())?;
        let minute: u32 = m.parse().map_err(|_| invalid())?;

        Self::from_hm(hour, minute).ok_or_else(invalid)
    }

    pub fn minutes(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for ClockTime {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        ClockTime::parse(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = SlotError;

    fn try_from(value: String) -> Result<Self> {
        ClockTime::parse(&value)
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

/// Opening hours for a single day. Slots start at `open` and end before `close`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenWindow {
    pub open: ClockTime,
    pub close: ClockTime,
}

impl OpenWindow {
    pub fn new(open: ClockTime, close: ClockTime) -> Self {
        Self { open, close }
    }

    /// Parse both ends from `HH:MM` strings.
    pub fn parse(open: &str, close: &str) -> Result<Self> {
        Ok(Self::new(ClockTime::parse(open)?, ClockTime::parse(close)?))
    }

    /// A window whose close does not come after its open yields no slots.
    pub fn is_empty(&self) -> bool {
        self.open >= self.close
    }
}

/// One optional window per weekday. Field names double as TOML keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    #[serde(default)]
    pub sunday: Option<OpenWindow>,
    #[serde(default)]
    pub monday: Option<OpenWindow>,
    #[serde(default)]
    pub tuesday: Option<OpenWindow>,
    #[serde(default)]
    pub wednesday: Option<OpenWindow>,
    #[serde(default)]
    pub thursday: Option<OpenWindow>,
    #[serde(default)]
    pub friday: Option<OpenWindow>,
    #[serde(default)]
    pub saturday: Option<OpenWindow>,
}

impl WeeklySchedule {
    /// A schedule with every day closed.
    pub fn closed() -> Self {
        Self {
            sunday: None,
            monday: None,
            tuesday: None,
            wednesday: None,
            thursday: None,
            friday: None,
            saturday: None,
        }
    }

    pub fn window_for(&self, weekday: Weekday) -> Option<OpenWindow> {
        match weekday {
            Weekday::Sun => self.sunday,
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
        }
    }

    /// Look up by index, 0 = Sunday through 6 = Saturday. Anything else is closed.
    pub fn window_for_index(&self, index: u32) -> Option<OpenWindow> {
        let weekday = match index {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            6 => Weekday::Sat,
            _ => return None,
        };
        self.window_for(weekday)
    }

    pub fn set(&mut self, weekday: Weekday, window: Option<OpenWindow>) {
        let slot = match weekday {
            Weekday::Sun => &mut self.sunday,
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
        };
        *slot = window;
    }

    /// Iterate Sunday-first, matching the 0..=6 index convention.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, Option<OpenWindow>)> + '_ {
        [
            Weekday::Sun,
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ]
        .into_iter()
        .map(move |day| (day, self.window_for(day)))
    }
}

impl Default for WeeklySchedule {
    /// Sunday closed, weekdays 08:30-16:00, Saturday 09:00-13:00.
    fn default() -> Self {
        let weekday = OpenWindow::new(ClockTime(8 * 60 + 30), ClockTime(16 * 60));
        Self {
            sunday: None,
            monday: Some(weekday),
            tuesday: Some(weekday),
            wednesday: Some(weekday),
            thursday: Some(weekday),
            friday: Some(weekday),
            saturday: Some(OpenWindow::new(ClockTime(9 * 60), ClockTime(13 * 60))),
        }
    }
}
