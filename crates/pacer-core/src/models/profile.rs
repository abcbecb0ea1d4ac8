// ABOUTME: Aggregated athlete performance profile consumed by the race predictor
// ABOUTME: PerformanceProfile, DistancePaceRow and default-resolution helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::activity::{GradientCategory, GradientPaces, PaceDecayCurve};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the absolute-distance pace table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistancePaceRow {
    /// Bucket midpoint (km)
    pub distance_km: f64,
    /// Weighted mean of actual pace (min/km)
    pub pace_min_km: f64,
    /// Weighted mean of grade-adjusted pace (min/km)
    pub gap_min_km: f64,
    /// Sum of the recency weights behind this row
    pub sample_weight: f64,
}

/// An athlete's pacing characteristics, rebuilt wholesale from their history
///
/// Fields nothing contributed to are `None` (or empty) rather than zero so the
/// predictor can fall back to documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceProfile {
    /// Flat pace (min/km)
    #[serde(default)]
    pub flat_pace_min_km: Option<f64>,
    /// Combined pace over the three uphill buckets (min/km)
    #[serde(default)]
    pub climbing_pace_min_km: Option<f64>,
    /// Combined pace over the three downhill buckets (min/km)
    #[serde(default)]
    pub descending_pace_min_km: Option<f64>,
    /// Scalar fatigue factor
    #[serde(default)]
    pub fatigue_factor: Option<f64>,
    /// Weighted mean pace of every gradient bucket
    #[serde(default)]
    pub gradient_paces: GradientPaces,
    /// Number of activities that reported each gradient bucket
    #[serde(default)]
    pub gradient_sample_sizes: BTreeMap<GradientCategory, usize>,
    /// Weighted mean of overall grade-adjusted pace (min/km)
    #[serde(default)]
    pub overall_gap_min_km: Option<f64>,
    /// Pace decay by progress decile
    #[serde(default)]
    pub pace_decay_by_progress: Option<PaceDecayCurve>,
    /// Pace by absolute distance, ascending
    #[serde(default)]
    pub distance_pace_table: Vec<DistancePaceRow>,
    /// Number of analyzed activities aggregated
    #[serde(default)]
    pub activities_analyzed: usize,
    /// Sum of the analyzed activities' distances (km)
    #[serde(default)]
    pub total_distance_km: f64,
    /// When the profile was rebuilt
    pub generated_at: DateTime<Utc>,
}

impl PerformanceProfile {
    /// Profile for an athlete without analyzed activities
    #[must_use]
    pub fn empty(generated_at: DateTime<Utc>) -> Self {
        Self {
            flat_pace_min_km: None,
            climbing_pace_min_km: None,
            descending_pace_min_km: None,
            fatigue_factor: None,
            gradient_paces: GradientPaces::default(),
            gradient_sample_sizes: BTreeMap::new(),
            overall_gap_min_km: None,
            pace_decay_by_progress: None,
            distance_pace_table: Vec::new(),
            activities_analyzed: 0,
            total_distance_km: 0.0,
            generated_at,
        }
    }

    /// Profile built from the four headline values only
    #[must_use]
    pub fn from_paces(
        flat_pace_min_km: f64,
        climbing_pace_min_km: f64,
        descending_pace_min_km: f64,
        fatigue_factor: f64,
    ) -> Self {
        Self {
            flat_pace_min_km: Some(flat_pace_min_km),
            climbing_pace_min_km: Some(climbing_pace_min_km),
            descending_pace_min_km: Some(descending_pace_min_km),
            fatigue_factor: Some(fatigue_factor),
            ..Self::empty(Utc::now())
        }
    }
}

impl Default for PerformanceProfile {
    fn default() -> Self {
        Self::empty(Utc::now())
    }
}
