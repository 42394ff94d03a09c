//! Tests for TOML configuration loading and startup validation.

use std::time::Duration;

use chrono::Weekday;
use slot_engine::config::AvailabilityConfig;
use slot_engine::dst::DstPolicy;
use slot_engine::error::SlotError;
use slot_engine::schedule::{OpenWindow, WeeklySchedule};

#[test]
fn empty_document_uses_defaults() {
    let config = AvailabilityConfig::from_toml_str("").unwrap();
    assert_eq!(config, AvailabilityConfig::default());

    let settings = config.validate().unwrap();
    assert_eq!(settings.slot_interval_minutes, 30);
    assert_eq!(settings.business_tz, chrono_tz::Europe::Budapest);
    assert_eq!(settings.calendar_timeout, Duration::from_millis(5000));
    assert_eq!(settings.schedule, WeeklySchedule::default());
}

#[test]
fn explicit_schedule_closes_unlisted_days() {
    let config = AvailabilityConfig::from_toml_str(
        r#"
        slot_interval_minutes = 15
        time_zone = "America/New_York"
        dst_policy = "skip"

        [schedule]
        tuesday = { open = "10:00", close = "14:00" }
        "#,
    )
    .unwrap();
    let settings = config.validate().unwrap();

    assert_eq!(settings.slot_interval_minutes, 15);
    assert_eq!(settings.business_tz, chrono_tz::America::New_York);
    assert_eq!(settings.dst_policy, DstPolicy::Skip);
    assert_eq!(
        settings.schedule.window_for(Weekday::Tue),
        Some(OpenWindow::parse("10:00", "14:00").unwrap())
    );
    assert_eq!(settings.schedule.window_for(Weekday::Mon), None);
}

#[test]
fn malformed_schedule_time_fails_at_load() {
    let err = AvailabilityConfig::from_toml_str(
        r#"
        [schedule]
        monday = { open = "8h30", close = "16:00" }
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, SlotError::Configuration(msg) if msg.contains("8h30")));
}

#[test]
fn unknown_time_zone_fails_validation() {
    let config = AvailabilityConfig {
        time_zone: "Europe/Atlantis".to_string(),
        ..AvailabilityConfig::default()
    };
    assert_eq!(
        config.validate().unwrap_err(),
        SlotError::InvalidTimezone("Europe/Atlantis".to_string())
    );
}

#[test]
fn zero_interval_fails_validation() {
    let config = AvailabilityConfig::from_toml_str("slot_interval_minutes = 0").unwrap();
    assert!(matches!(config.validate(), Err(SlotError::Configuration(_))));
}

#[test]
fn inverted_window_is_accepted() {
    let config = AvailabilityConfig::from_toml_str(
        r#"
        [schedule]
        friday = { open = "16:00", close = "08:00" }
        "#,
    )
    .unwrap();
    let settings = config.validate().unwrap();
    assert!(settings.schedule.friday.unwrap().is_empty());
}

#[test]
fn missing_file_is_a_configuration_error() {
    let err = AvailabilityConfig::from_file("/nonexistent/availability.toml").unwrap_err();
    assert!(matches!(err, SlotError::Configuration(_)));
    assert!(!err.is_validation());
}
