// ABOUTME: Main library entry point for the pacer race arrival prediction service
// ABOUTME: Re-exports the engine and provides repositories, the service facade and logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pacer
//!
//! Predicts an ultra-distance athlete's arrival time at every waypoint of a
//! race course, with cutoff risk for each.
//!
//! ## Architecture
//!
//! - **`pacer-core`**: data models, default constants and errors
//! - **`pacer-intelligence`**: the synchronous engine (profile aggregation,
//!   pace extrapolation, factor models, segment prediction)
//! - **repositories**: async collaborator contracts for history, profiles and courses
//! - **service**: [`PacingService`] tying the repositories to the engine
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::{FixedOffset, TimeZone};
//! use pacer::models::{Course, PerformanceProfile, PlanOptions, Waypoint};
//! use pacer::{predict, PredictionConfig};
//!
//! let course = Course::new("River 100K", 100.0)
//!     .with_waypoint(Waypoint::aid_station("as1", "Halfway", 50.0));
//! let profile = PerformanceProfile::from_paces(6.0, 10.0, 5.0, 1.05);
//! let start = FixedOffset::east_opt(0)
//!     .and_then(|utc| utc.with_ymd_and_hms(2025, 6, 21, 6, 0, 0).single());
//! if let Some(start) = start {
//!     let prediction = predict(
//!         &course,
//!         &profile,
//!         &PlanOptions::starting_at(start),
//!         &PredictionConfig::default(),
//!     );
//!     println!("Finish in {:.0} minutes", prediction.total_minutes);
//! }
//! ```

/// Structured logging setup
pub mod logging;

/// Collaborator contracts and the in-memory implementation
pub mod repositories;

/// Service facade over the engine
pub mod service;

pub use pacer_core::{constants, errors, models};
pub use pacer_intelligence::{
    config, factors, pace_extrapolation, predict, profile_aggregator, rebuild_profile,
    rebuild_profiles_parallel, recency, segment_predictor, waypoints, PredictionConfig,
};
pub use repositories::{ActivityAnalysisSource, CourseSource, InMemoryRepository, ProfileStore};
pub use service::PacingService;
