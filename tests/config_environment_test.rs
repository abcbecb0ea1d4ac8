// ABOUTME: Integration tests for prediction configuration loading and validation
// ABOUTME: Exercises PACER_* environment overrides, parse failures and range checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{assert_close, init_test_logging};
use pacer::config::{ConfigError, PredictionConfig, TerrainModel};
use pacer::errors::{AppError, ErrorCode};
use serial_test::serial;
use std::env;

const OVERRIDES: &[&str] = &[
    "PACER_HALF_LIFE_DAYS",
    "PACER_RIEGEL_EXPONENT",
    "PACER_MAX_PACE_MIN_KM",
    "PACER_MAX_STEEP_CLIMB_PACE_MIN_KM",
    "PACER_DEFAULT_FLAT_PACE_MIN_KM",
    "PACER_DEFAULT_CLIMBING_PACE_MIN_KM",
    "PACER_DEFAULT_DESCENDING_PACE_MIN_KM",
    "PACER_DEFAULT_FATIGUE_FACTOR",
    "PACER_TERRAIN_MODEL",
    "PACER_USE_DECAY_CURVE",
    "PACER_NIGHT_START_HOUR",
    "PACER_NIGHT_END_HOUR",
    "PACER_DANGER_BUFFER_MINUTES",
    "PACER_WARNING_BUFFER_MINUTES",
    "PACER_ENDPOINT_TOLERANCE_KM",
];

fn clear_overrides() {
    for name in OVERRIDES {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_load_without_overrides_matches_defaults() {
    init_test_logging();
    clear_overrides();

    let config = PredictionConfig::load().unwrap();

    assert_close(config.profile.half_life_days, 90.0);
    assert_close(config.pacing.extrapolation.riegel_exponent, 1.15);
    assert_eq!(config.terrain.model, TerrainModel::GradientBands);
    assert!(config.fatigue.use_decay_curve);
    assert_eq!(config.nighttime.night_start_hour, 21);
    assert_eq!(config.nighttime.night_end_hour, 6);
    assert_close(config.cutoffs.danger_buffer_minutes, 15.0);
    assert_close(config.cutoffs.warning_buffer_minutes, 30.0);
    assert_close(config.waypoints.endpoint_tolerance_km, 0.1);
}

#[test]
#[serial]
fn test_environment_overrides_are_applied() {
    init_test_logging();
    clear_overrides();
    env::set_var("PACER_HALF_LIFE_DAYS", "60");
    env::set_var("PACER_RIEGEL_EXPONENT", "1.06");
    env::set_var("PACER_TERRAIN_MODEL", "Minetti");
    env::set_var("PACER_USE_DECAY_CURVE", "false");
    env::set_var("PACER_NIGHT_START_HOUR", "20");
    env::set_var("PACER_DEFAULT_FLAT_PACE_MIN_KM", "7.25");

    let config = PredictionConfig::load();
    clear_overrides();
    let config = config.unwrap();

    assert_close(config.profile.half_life_days, 60.0);
    assert_close(config.pacing.extrapolation.riegel_exponent, 1.06);
    assert_eq!(config.terrain.model, TerrainModel::Minetti);
    assert!(!config.fatigue.use_decay_curve);
    assert_eq!(config.nighttime.night_start_hour, 20);
    assert_close(config.pacing.fallback.flat_pace_min_km, 7.25);
}

#[test]
#[serial]
fn test_unparseable_override_is_rejected() {
    init_test_logging();
    clear_overrides();
    env::set_var("PACER_HALF_LIFE_DAYS", "ninety");

    let result = PredictionConfig::load();
    clear_overrides();

    match result {
        Err(ConfigError::Parse(message)) => assert!(message.contains("PACER_HALF_LIFE_DAYS")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_unknown_terrain_model_is_rejected() {
    init_test_logging();
    clear_overrides();
    env::set_var("PACER_TERRAIN_MODEL", "contour");

    let result = PredictionConfig::load();
    clear_overrides();

    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
#[serial]
fn test_override_failing_validation_is_rejected() {
    init_test_logging();
    clear_overrides();
    env::set_var("PACER_RIEGEL_EXPONENT", "2.5");

    let result = PredictionConfig::load();
    clear_overrides();

    assert!(matches!(result, Err(ConfigError::ValueOutOfRange(_))));
}

#[test]
#[serial]
fn test_inverted_cutoff_buffers_from_environment() {
    init_test_logging();
    clear_overrides();
    env::set_var("PACER_DANGER_BUFFER_MINUTES", "40");

    let result = PredictionConfig::load();
    clear_overrides();

    assert!(matches!(result, Err(ConfigError::InvalidRange(_))));
}

#[test]
fn test_validation_rejects_out_of_range_values() {
    let mut config = PredictionConfig::default();
    config.profile.half_life_days = 0.0;
    assert!(config.validate().is_err());

    let mut config = PredictionConfig::default();
    config.pacing.limits.max_pace_min_km = 30.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidRange(_))
    ));

    let mut config = PredictionConfig::default();
    config.pacing.fallback.fatigue_factor = 0.9;
    assert!(config.validate().is_err());

    let mut config = PredictionConfig::default();
    config.terrain.moderate_gradient_pct = 6.0;
    assert!(config.validate().is_err());

    let mut config = PredictionConfig::default();
    config.nighttime.night_end_hour = 22;
    assert!(config.validate().is_err());

    let mut config = PredictionConfig::default();
    config.stops.up_to_50_km_minutes = 20.0;
    assert!(config.validate().is_err());

    let mut config = PredictionConfig::default();
    config.waypoints.endpoint_tolerance_km = -0.1;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_error_converts_to_app_error() {
    let error = AppError::from(ConfigError::InvalidRange(
        "danger_buffer_minutes must be < warning_buffer_minutes",
    ));

    assert_eq!(error.code, ErrorCode::ConfigInvalid);
    assert!(error.message.contains("danger_buffer_minutes"));
    assert!(error.source.is_some());
}

#[test]
fn test_config_round_trips_through_json() {
    let mut config = PredictionConfig::default();
    config.terrain.model = TerrainModel::Minetti;

    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["terrain"]["model"], "minetti");

    let restored: PredictionConfig = serde_json::from_value(json).unwrap();
    assert_eq!(restored.terrain.model, TerrainModel::Minetti);
    assert!(restored.validate().is_ok());
}
