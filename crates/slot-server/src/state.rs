//! Application state for the HTTP server.

use std::sync::Arc;

use slot_engine::{Locale, Resolver};

use crate::store::BookingStore;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Resolver,
    pub bookings: Arc<BookingStore>,
    /// Language of validation messages.
    pub locale: Locale,
}

impl AppState {
    pub fn new(resolver: Resolver, bookings: Arc<BookingStore>, locale: Locale) -> Self {
        Self {
            resolver,
            bookings,
            locale,
        }
    }
}
