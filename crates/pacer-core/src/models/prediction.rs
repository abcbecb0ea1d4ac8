// ABOUTME: Prediction output records: per-waypoint arrivals and the race summary
// ABOUTME: CutoffStatus, PaceSource, PaceFactors, AidStationPrediction, RacePrediction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Risk of missing a cutoff, by remaining buffer
///
/// Variants are ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum CutoffStatus {
    /// Buffer of 30 minutes or more, or no cutoff
    #[default]
    Safe,
    /// Buffer between 15 and 30 minutes
    Warning,
    /// Buffer under 15 minutes
    Danger,
    /// Predicted arrival after the cutoff
    Missed,
}

impl fmt::Display for CutoffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "safe"),
            Self::Warning => write!(f, "warning"),
            Self::Danger => write!(f, "danger"),
            Self::Missed => write!(f, "missed"),
        }
    }
}

impl FromStr for CutoffStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "safe" => Ok(Self::Safe),
            "warning" => Ok(Self::Warning),
            "danger" => Ok(Self::Danger),
            "missed" => Ok(Self::Missed),
            _ => Err(format!("Unknown cutoff status: {s}")),
        }
    }
}

/// Where a segment's base pace came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceSource {
    /// Nearest row of the athlete's distance table
    DistanceLookup,
    /// Power-law projection beyond the athlete's longest distance
    RiegelExtrapolation,
    /// Flat pace chosen in the plan
    PlanOverride,
    /// Flat pace from the profile (or its default)
    ProfileFlat,
}

impl PaceSource {
    /// Whether the pace already encodes fatigue
    #[must_use]
    pub const fn encodes_fatigue(self) -> bool {
        matches!(self, Self::DistanceLookup | Self::RiegelExtrapolation)
    }
}

/// Multipliers applied to the base pace of a segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaceFactors {
    /// Base pace before adjustment (min/km)
    pub base_pace_min_km: f64,
    /// Terrain multiplier
    pub terrain: f64,
    /// Fatigue multiplier
    pub fatigue: f64,
    /// Nighttime multiplier
    pub nighttime: f64,
}

/// Predicted arrival at one waypoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AidStationPrediction {
    /// Waypoint identifier
    pub waypoint_id: String,
    /// Waypoint name
    pub waypoint_name: String,
    /// Cumulative distance (km)
    pub distance_km: f64,
    /// Synthesized start or finish
    pub is_virtual: bool,
    /// Elapsed minutes at arrival
    pub predicted_arrival_minutes: f64,
    /// Clock time at arrival
    pub predicted_arrival_time: DateTime<FixedOffset>,
    /// Resolved cutoff
    pub cutoff_time: Option<DateTime<FixedOffset>>,
    /// Cutoff minus arrival, may be negative
    pub buffer_minutes: Option<f64>,
    /// Cutoff risk
    pub status: CutoffStatus,
    /// Contributing factors
    pub factors: PaceFactors,
    /// Length of the segment ending here (km)
    pub segment_distance_km: f64,
    /// Final pace over the segment (min/km)
    pub segment_pace_min_km: f64,
    /// Base pace times terrain factor (min/km)
    pub grade_adjusted_pace_min_km: f64,
    /// Whether the segment started at night
    pub is_nighttime: bool,
    /// Where the base pace came from
    pub pace_source: PaceSource,
    /// Minutes spent at the station after arrival
    pub stop_minutes: f64,
}

/// Complete output of one prediction run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RacePrediction {
    /// One entry per normalized waypoint, in course order
    pub predictions: Vec<AidStationPrediction>,
    /// Elapsed minutes at the last waypoint
    pub total_minutes: f64,
    /// Start time plus total minutes
    pub finish_time: DateTime<FixedOffset>,
    /// Minutes spent stopped at aid stations
    pub total_stop_minutes: f64,
}

impl RacePrediction {
    /// Prediction for a course with nothing to walk
    #[must_use]
    pub const fn empty(start_time: DateTime<FixedOffset>) -> Self {
        Self {
            predictions: Vec::new(),
            total_minutes: 0.0,
            finish_time: start_time,
            total_stop_minutes: 0.0,
        }
    }

    /// Most severe status along the course
    #[must_use]
    pub fn worst_status(&self) -> CutoffStatus {
        self.predictions
            .iter()
            .map(|prediction| prediction.status)
            .max()
            .unwrap_or_default()
    }

    /// Waypoints whose cutoff is predicted to be missed
    pub fn missed_cutoffs(&self) -> impl Iterator<Item = &AidStationPrediction> {
        self.predictions
            .iter()
            .filter(|prediction| prediction.status == CutoffStatus::Missed)
    }
}
