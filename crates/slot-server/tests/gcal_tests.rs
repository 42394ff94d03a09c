//! Tests for the Google Calendar client against a local stand-in API.

use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use slot_engine::calendar::{fetch_busy_slots, CalendarSource, FetchOptions};
use slot_engine::dst::DstPolicy;
use slot_engine::slots::generate_slots;
use slot_server::gcal::GoogleCalendarSource;

// ── Helpers ─────────────────────────────────────────────────────────────────

/// Serve `router` on an ephemeral port and return its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Two pages of events; rejects requests without the expected key.
async fn list_events(
    Path(calendar_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    if params.get("key").map(String::as_str) != Some("secret") {
        return Err(StatusCode::FORBIDDEN);
    }
    if calendar_id != "clinic@example.com" || params.get("singleEvents").map(String::as_str) != Some("true") {
        return Err(StatusCode::NOT_FOUND);
    }

    let page = match params.get("pageToken").map(String::as_str) {
        None => json!({
            "items": [{
                "id": "first",
                "start": { "dateTime": "2024-06-03T10:00:00+02:00" },
                "end": { "dateTime": "2024-06-03T10:45:00+02:00" }
            }],
            "nextPageToken": "p2"
        }),
        Some("p2") => json!({
            "items": [{
                "id": "second",
                "start": { "dateTime": "2024-06-03T14:00:00", "timeZone": "Europe/Budapest" },
                "end": { "dateTime": "2024-06-03T14:30:00", "timeZone": "Europe/Budapest" }
            }]
        }),
        Some(_) => return Err(StatusCode::BAD_REQUEST),
    };
    Ok(Json(page))
}

fn fake_api() -> Router {
    Router::new().route("/calendars/{calendar_id}/events", get(list_events))
}

fn options() -> FetchOptions {
    FetchOptions {
        business_tz: chrono_tz::Europe::Budapest,
        interval_minutes: 30,
        policy: DstPolicy::ShiftForward,
        timeout: std::time::Duration::from_secs(5),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn follows_pages_and_collects_events() {
    let base = serve(fake_api()).await;
    let source = GoogleCalendarSource::new(base, "clinic@example.com", "secret");

    let events = source
        .fetch_events(
            Utc.with_ymd_and_hms(2024, 6, 2, 22, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 3, 22, 0, 0).unwrap(),
        )
        .await
        .unwrap();

    let ids: Vec<_> = events.iter().filter_map(|e| e.id.as_deref()).collect();
    assert_eq!(ids, vec!["first", "second"]);
}

#[tokio::test]
async fn busy_slots_from_remote_calendar() {
    let base = serve(fake_api()).await;
    let source = GoogleCalendarSource::new(base, "clinic@example.com", "secret");
    let candidates = generate_slots("08:30", "16:00", 30).unwrap();
    let day = chrono::NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();

    let busy = fetch_busy_slots(&source, &candidates, day, options()).await;
    let busy: Vec<&str> = busy.iter().map(String::as_str).collect();
    assert_eq!(busy, vec!["10:00", "10:30", "14:00"]);
}

#[tokio::test]
async fn non_success_status_is_upstream_error() {
    let base = serve(fake_api()).await;
    let source = GoogleCalendarSource::new(base, "clinic@example.com", "wrong-key");

    let err = source
        .fetch_events(
            Utc.with_ymd_and_hms(2024, 6, 2, 22, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 3, 22, 0, 0).unwrap(),
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("403"));
}

#[tokio::test]
async fn unreachable_api_degrades_to_no_busy_slots() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = GoogleCalendarSource::new(format!("http://{}", addr), "clinic@example.com", "secret");
    let candidates = generate_slots("08:30", "16:00", 30).unwrap();
    let day = chrono::NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();

    assert!(fetch_busy_slots(&source, &candidates, day, options()).await.is_empty());
}

#[tokio::test]
async fn malformed_payload_degrades_to_no_busy_slots() {
    let router = Router::new().route(
        "/calendars/{calendar_id}/events",
        get(|| async { "this is not json" }),
    );
    let base = serve(router).await;
    let source = GoogleCalendarSource::new(base, "clinic@example.com", "secret");
    let candidates = generate_slots("08:30", "16:00", 30).unwrap();
    let day = chrono::NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();

    assert!(fetch_busy_slots(&source, &candidates, day, options()).await.is_empty());
}

#[tokio::test]
async fn page_without_items_is_upstream_error() {
    let router = Router::new().route(
        "/calendars/{calendar_id}/events",
        get(|| async { Json(json!({ "error": { "code": 429, "message": "Rate Limit Exceeded" } })) }),
    );
    let base = serve(router).await;
    let source = GoogleCalendarSource::new(base, "clinic@example.com", "secret");

    let err = source
        .fetch_events(
            Utc.with_ymd_and_hms(2024, 6, 2, 22, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 3, 22, 0, 0).unwrap(),
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("malformed event payload"));
}
