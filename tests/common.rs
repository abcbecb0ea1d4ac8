// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging setup, race start times and course builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `pacer`

use chrono::{DateTime, FixedOffset, TimeZone};
use pacer::models::{Course, Waypoint};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Tolerance for floating point comparisons of minutes and paces
pub const EPSILON: f64 = 1e-9;

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Race start on 2025-06-21 at `hour:minute` in UTC
pub fn race_start(hour: u32, minute: u32) -> DateTime<FixedOffset> {
    race_start_with_offset(hour, minute, 0)
}

/// Race start on 2025-06-21 at `hour:minute` local time, `offset_hours` east of UTC
pub fn race_start_with_offset(hour: u32, minute: u32, offset_hours: i32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(offset_hours * 3600)
        .unwrap()
        .with_ymd_and_hms(2025, 6, 21, hour, minute, 0)
        .unwrap()
}

/// Flat 100 km course with a single aid station at halfway
pub fn hundred_km_course() -> Course {
    Course::new("River 100K", 100.0).with_waypoint(Waypoint::aid_station("as1", "Halfway", 50.0))
}

/// Flat course with aid stations at each of `distances_km`
pub fn flat_course(total_km: f64, distances_km: &[f64]) -> Course {
    distances_km
        .iter()
        .enumerate()
        .fold(Course::new("Flat Course", total_km), |course, (index, km)| {
            course.with_waypoint(Waypoint::aid_station(
                format!("as{}", index + 1),
                format!("Aid {}", index + 1),
                *km,
            ))
        })
}

/// Assert two floats agree within [`EPSILON`]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}
