//! # slot-engine
//!
//! Appointment slot availability for a single business day.
//!
//! Merges three sources of truth: a fixed weekly opening-hours template, the
//! bookings already recorded locally, and the busy intervals of a remote
//! calendar. The remote calendar is injected as a [`CalendarSource`] and any
//! failure there degrades to "no extra busy time" rather than an error.
//!
//! ## Modules
//!
//! - [`schedule`] — Weekly open/close windows and `HH:MM` parsing
//! - [`slots`] — Fixed-width slot labels for a window
//! - [`dst`] — DST gap/overlap policies for local wall-clock times
//! - [`normalize`] — Event boundaries → minute offsets from a reference day
//! - [`busy`] — Events → blocked slot labels
//! - [`calendar`] — Calendar source abstraction with fail-open fetching
//! - [`booking`] — Read-only booking snapshots
//! - [`config`] — TOML configuration and startup validation
//! - [`resolver`] — Date → free slots
//! - [`messages`] — Localized validation messages
//! - [`error`] — Error types

pub mod booking;
pub mod busy;
pub mod calendar;
pub mod config;
pub mod dst;
pub mod error;
pub mod messages;
pub mod normalize;
pub mod resolver;
pub mod schedule;
pub mod slots;

pub use booking::{BookedSlot, BookingSnapshot};
pub use busy::{extract_busy_slots, BusyInterval, CalendarEvent};
pub use calendar::{CalendarSource, FailingCalendar, NoCalendar, StaticCalendar};
pub use config::{AvailabilityConfig, EngineSettings};
pub use error::SlotError;
pub use messages::{user_message, Locale};
pub use normalize::{normalize_boundary, EventBoundary};
pub use resolver::{resolve, AvailabilityResult, Resolver};
pub use schedule::{ClockTime, OpenWindow, WeeklySchedule};
pub use slots::generate_slots;
