//! Request and response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slot_engine::BookedSlot;

/// `{success: true}` or `{success: false, error}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub bookings: usize,
}

/// Appointment form submission. Every field is optional on the wire so that
/// missing ones can be reported together.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub treatment: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl AppointmentRequest {
    /// Names of required fields that are absent or blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("fullName", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("date", &self.date),
            ("time", &self.time),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect()
    }
}

/// A recorded appointment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub treatment: Option<String>,
    pub date: String,
    pub time: String,
    pub note: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl BookingRequest {
    /// Build from a request that passed [`AppointmentRequest::missing_fields`].
    pub fn accept(request: AppointmentRequest, id: String, received_at: DateTime<Utc>) -> Self {
        Self {
            id,
            full_name: request.full_name.unwrap_or_default(),
            email: request.email.unwrap_or_default(),
            phone: request.phone.unwrap_or_default(),
            treatment: request.treatment,
            date: request.date.unwrap_or_default(),
            time: request.time.unwrap_or_default(),
            note: request.note,
            received_at,
        }
    }

    pub fn slot(&self) -> BookedSlot {
        BookedSlot::new(self.date.clone(), self.time.clone())
    }
}
