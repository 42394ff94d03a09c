//! # slot-server
//!
//! axum HTTP API in front of [`slot_engine`]:
//!
//! - `GET /api/availability?date=YYYY-MM-DD` — free slots for a date
//! - `POST /api/appointments` — record an appointment request
//! - `GET /health` — liveness and stored booking count
//!
//! Bookings live in an in-memory [`store::BookingStore`]. The remote calendar
//! is a [`gcal::GoogleCalendarSource`] when configured, otherwise nothing.

pub mod config;
pub mod dto;
pub mod error;
pub mod gcal;
pub mod handlers;
pub mod router;
pub mod state;
pub mod store;

use std::sync::Arc;

use slot_engine::calendar::{CalendarSource, NoCalendar};
use tracing::{info, warn};

pub use config::ServerConfig;
pub use error::ServerError;
pub use router::create_router;
pub use state::AppState;

use crate::config::ServerSettings;
use crate::gcal::GoogleCalendarSource;
use crate::store::BookingStore;

/// Pick the calendar source from config. A configured calendar whose API key
/// variable is unset is disabled with a warning rather than failing startup.
pub fn calendar_from_settings(
    settings: &ServerSettings,
    lookup_env: impl Fn(&str) -> Option<String>,
) -> Arc<dyn CalendarSource> {
    let Some(google) = &settings.google else {
        info!("no remote calendar configured");
        return Arc::new(NoCalendar);
    };

    match lookup_env(&google.api_key_env) {
        Some(key) if !key.is_empty() => {
            info!(calendar = %google.calendar_id, "using Google Calendar for busy times");
            Arc::new(GoogleCalendarSource::new(
                google.base_url.clone(),
                google.calendar_id.clone(),
                key,
            ))
        }
        _ => {
            warn!(
                env = %google.api_key_env,
                "calendar API key not set; availability ignores the remote calendar"
            );
            Arc::new(NoCalendar)
        }
    }
}

/// Validate the config and assemble the shared state.
pub fn build_state(
    config: &ServerConfig,
    lookup_env: impl Fn(&str) -> Option<String>,
) -> Result<AppState, ServerError> {
    let settings = config.availability.validate()?;
    let calendar = calendar_from_settings(&config.server, lookup_env);
    Ok(AppState::new(
        slot_engine::Resolver::new(settings, calendar),
        Arc::new(BookingStore::new()),
        config.server.locale,
    ))
}
