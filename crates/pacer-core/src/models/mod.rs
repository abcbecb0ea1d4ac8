// ABOUTME: Core data models for the race prediction engine
// ABOUTME: Re-exports activity analyses, profiles, courses and prediction outputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Data flows one direction: [`ActivityAnalysis`] records are aggregated into a
//! [`PerformanceProfile`], which the predictor combines with a [`Course`] and
//! [`PlanOptions`] to produce a [`RacePrediction`].

use uuid::Uuid;

/// Analyzed activity records from the external analysis worker
pub mod activity;
/// Course geometry and plan options
pub mod course;
/// Prediction output records
pub mod prediction;
/// Aggregated performance profile
pub mod profile;

pub use activity::{
    ActivityAnalysis, DistanceBucketPace, GradientCategory, GradientPaces, PaceDecayCurve,
    PaceDecayProfile, PROGRESS_BUCKETS,
};
pub use course::{Course, Cutoff, PlanOptions, Waypoint};
pub use prediction::{AidStationPrediction, CutoffStatus, PaceFactors, PaceSource, RacePrediction};
pub use profile::{DistancePaceRow, PerformanceProfile};

/// Identifier of an athlete in the surrounding service
pub type AthleteId = Uuid;

/// Identifier of a race in the surrounding service
pub type RaceId = Uuid;
