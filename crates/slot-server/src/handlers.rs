//! HTTP handlers for the REST API.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use chrono::Utc;
use slot_engine::{user_message, AvailabilityResult, SlotError};
use tracing::{debug, info};
use uuid::Uuid;

use super::dto::{ApiResponse, AppointmentRequest, AvailabilityQuery, BookingRequest, HealthResponse};
use super::error::AppError;
use super::state::AppState;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        bookings: state.bookings.len(),
    }))
}

/// GET /api/availability?date=YYYY-MM-DD
///
/// Free slots for the date. Calendar outages are absorbed by the resolver and
/// never turn into an error here.
pub async fn get_availability(
    State(state): State<AppState>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> HandlerResult<AvailabilityResult> {
    let Query(query) = query.map_err(|e| {
        debug!(error = %e, "rejected availability query");
        let err = SlotError::InvalidDateFormat(e.body_text());
        AppError::BadRequest(user_message(&err, state.locale).to_string())
    })?;
    let date = query.date.unwrap_or_default();
    let snapshot = state.bookings.snapshot();

    match state.resolver.resolve(&date, &snapshot).await {
        Ok(result) => Ok(Json(result)),
        Err(e) if e.is_validation() => Err(AppError::BadRequest(
            user_message(&e, state.locale).to_string(),
        )),
        Err(e) => Err(AppError::Internal(e.to_string())),
    }
}

/// POST /api/appointments
///
/// Record an appointment request. Delivery of the notification email is left
/// to whatever consumes the store.
pub async fn create_appointment(
    State(state): State<AppState>,
    body: Result<Json<AppointmentRequest>, JsonRejection>,
) -> HandlerResult<ApiResponse> {
    let Json(request) = body.map_err(|e| {
        debug!(error = %e, "rejected appointment body");
        AppError::BadRequest("Invalid request body".to_string())
    })?;

    let missing = request.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let booking = BookingRequest::accept(request, Uuid::new_v4().to_string(), Utc::now());
    info!(
        id = %booking.id,
        date = %booking.date,
        time = %booking.time,
        "appointment request received"
    );
    state.bookings.append(booking);

    Ok(Json(ApiResponse::ok()))
}
