// ABOUTME: Integration tests for logging configuration
// ABOUTME: Validates environment parsing, defaults and the configuration summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pacer::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;

const LOGGING_VARS: &[&str] = &[
    "RUST_LOG",
    "LOG_FORMAT",
    "ENVIRONMENT",
    "SERVICE_NAME",
    "SERVICE_VERSION",
    "LOG_INCLUDE_LOCATION",
    "LOG_INCLUDE_THREAD",
    "LOG_INCLUDE_SPANS",
];

fn clear_logging_vars() {
    for name in LOGGING_VARS {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    clear_logging_vars();
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("SERVICE_NAME", "pacer-test");

    let config = LoggingConfig::from_env();
    clear_logging_vars();

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.environment, "production");
    assert_eq!(config.service_name, "pacer-test");
    // Production turns on every detail
    assert!(config.include_location);
    assert!(config.include_thread);
    assert!(config.include_spans);
}

#[test]
#[serial]
fn test_logging_config_development_defaults() {
    clear_logging_vars();
    env::set_var("LOG_FORMAT", "compact");

    let config = LoggingConfig::from_env();
    clear_logging_vars();

    assert_eq!(config.level, "info");
    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.environment, "development");
    assert_eq!(config.service_name, "pacer");
    assert!(!config.include_location);
    assert!(!config.include_spans);
}

#[test]
#[serial]
fn test_unknown_log_format_falls_back_to_pretty() {
    clear_logging_vars();
    env::set_var("LOG_FORMAT", "xml");

    let config = LoggingConfig::from_env();
    clear_logging_vars();

    assert_eq!(config.format, LogFormat::Pretty);
}

#[test]
fn test_default_logging_config() {
    let config = LoggingConfig::default();

    assert_eq!(config.level, "info");
    assert_eq!(config.format, LogFormat::Pretty);
    assert_eq!(config.service_name, "pacer");
    assert_eq!(config.service_version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_logging_summary_structure() {
    let config = LoggingConfig {
        level: "warn".into(),
        format: LogFormat::Json,
        include_spans: true,
        ..LoggingConfig::default()
    };

    let summary = config.summary();

    assert_eq!(summary["service"]["name"], "pacer");
    assert_eq!(summary["logging"]["level"], "warn");
    assert_eq!(summary["logging"]["format"], "Json");
    assert_eq!(summary["logging"]["features"]["spans"], true);
    assert_eq!(summary["logging"]["features"]["location"], false);
}
