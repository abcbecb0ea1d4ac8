// ABOUTME: Performance modeling and arrival prediction engine for ultra-distance races
// ABOUTME: Profile aggregation, pace extrapolation, pace factor models and the segment predictor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pacer Intelligence
//!
//! Pure, synchronous algorithms over in-memory records. Nothing here performs
//! I/O or holds shared state, so profile rebuilds and predictions for
//! different athletes can run in parallel without coordination.
//!
//! ```text
//! ActivityAnalysis[] -> ProfileAggregator -> PerformanceProfile
//! PerformanceProfile + Course + PlanOptions -> SegmentPredictor -> RacePrediction
//! ```
//!
//! Missing data never raises: every gap resolves to a documented default.

/// Engine configuration and environment overrides
pub mod config;
/// Terrain, fatigue and nighttime pace multipliers
pub mod factors;
/// Distance-table lookup and Riegel extrapolation
pub mod pace_extrapolation;
/// Activity history aggregation into performance profiles
pub mod profile_aggregator;
/// Exponential recency weighting
pub mod recency;
/// Course walk producing arrival predictions
pub mod segment_predictor;
/// Waypoint sequence normalisation
pub mod waypoints;

pub use config::{ConfigError, PredictionConfig, TerrainModel};
pub use factors::{FatigueFactorModel, NighttimeFactorModel, TerrainFactorModel, TerrainPaces};
pub use pace_extrapolation::{
    format_duration_minutes, format_pace, riegel_time, EstimateKind, PaceEstimate,
    PaceExtrapolator, RaceTimePrediction,
};
pub use profile_aggregator::{rebuild_profile, rebuild_profiles_parallel, ProfileAggregator};
pub use recency::RecencyWeighter;
pub use segment_predictor::{classify_buffer, SegmentPredictor};
pub use waypoints::{NormalizedCourse, WaypointNormalizer};

use pacer_core::models::{Course, PerformanceProfile, PlanOptions, RacePrediction};

/// Predict arrivals for `course` with the given profile and plan
#[must_use]
pub fn predict(
    course: &Course,
    profile: &PerformanceProfile,
    plan: &PlanOptions,
    config: &PredictionConfig,
) -> RacePrediction {
    SegmentPredictor::new(config).predict(course, profile, plan)
}
