//! Engine configuration loaded from TOML.
//!
//! ```toml
//! slot_interval_minutes = 30
//! time_zone = "Europe/Budapest"
//! calendar_timeout_ms = 5000
//! dst_policy = "shift_forward"
//!
//! [schedule]
//! monday = { open = "08:30", close = "16:00" }
//! saturday = { open = "09:00", close = "13:00" }
//! ```
//!
//! Days left out of `[schedule]` are closed. Omitting the table entirely uses
//! [`WeeklySchedule::default`]. Every defect is reported by [`AvailabilityConfig::validate`]
//! so it can be caught at startup rather than on a request.

use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dst::DstPolicy;
use crate::error::{Result, SlotError};
use crate::schedule::{WeeklySchedule, MINUTES_PER_DAY};
use crate::slots::DEFAULT_SLOT_INTERVAL_MINUTES;

pub const DEFAULT_TIME_ZONE: &str = "Europe/Budapest";
pub const DEFAULT_CALENDAR_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityConfig {
    #[serde(default = "default_slot_interval")]
    pub slot_interval_minutes: u32,
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    #[serde(default = "default_calendar_timeout")]
    pub calendar_timeout_ms: u64,
    #[serde(default)]
    pub dst_policy: DstPolicy,
    #[serde(default)]
    pub schedule: WeeklySchedule,
}

fn default_slot_interval() -> u32 {
    DEFAULT_SLOT_INTERVAL_MINUTES
}

fn default_time_zone() -> String {
    DEFAULT_TIME_ZONE.to_string()
}

fn default_calendar_timeout() -> u64 {
    DEFAULT_CALENDAR_TIMEOUT_MS
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            slot_interval_minutes: default_slot_interval(),
            time_zone: default_time_zone(),
            calendar_timeout_ms: default_calendar_timeout(),
            dst_policy: DstPolicy::default(),
            schedule: WeeklySchedule::default(),
        }
    }
}

impl AvailabilityConfig {
    /// Parse from TOML text. Malformed `HH:MM` values fail here.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| SlotError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SlotError::Configuration(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Check everything that would otherwise surface at request time and
    /// produce the settings the resolver runs on.
    ///
    /// # Errors
    /// `SlotError::InvalidTimezone` for an unknown IANA zone,
    /// `SlotError::Configuration` for an interval outside 1..=1440 minutes.
    pub fn validate(&self) -> Result<EngineSettings> {
        let business_tz: Tz = self
            .time_zone
            .parse()
            .map_err(|_| SlotError::InvalidTimezone(self.time_zone.clone()))?;

        if self.slot_interval_minutes == 0 || i64::from(self.slot_interval_minutes) > MINUTES_PER_DAY {
            return Err(SlotError::Configuration(format!(
                "slot_interval_minutes must be between 1 and {}, got {}",
                MINUTES_PER_DAY, self.slot_interval_minutes
            )));
        }

        for (day, window) in self.schedule.iter() {
            if let Some(w) = window.filter(|w| w.is_empty()) {
                warn!(?day, open = %w.open, close = %w.close, "opening window closes before it opens; no slots will be offered");
            }
        }

        Ok(EngineSettings {
            schedule: self.schedule.clone(),
            business_tz,
            slot_interval_minutes: self.slot_interval_minutes,
            dst_policy: self.dst_policy,
            calendar_timeout: Duration::from_millis(self.calendar_timeout_ms),
        })
    }
}

/// Validated configuration consumed by the resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub schedule: WeeklySchedule,
    pub business_tz: Tz,
    pub slot_interval_minutes: u32,
    pub dst_policy: DstPolicy,
    pub calendar_timeout: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            schedule: WeeklySchedule::default(),
            business_tz: chrono_tz::Europe::Budapest,
            slot_interval_minutes: DEFAULT_SLOT_INTERVAL_MINUTES,
            dst_policy: DstPolicy::default(),
            calendar_timeout: Duration::from_millis(DEFAULT_CALENDAR_TIMEOUT_MS),
        }
    }
}
