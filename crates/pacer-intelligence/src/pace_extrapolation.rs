// ABOUTME: Distance-table pace lookup with Riegel power-law extrapolation beyond it
// ABOUTME: Also provides whole-race Riegel time prediction and time/pace formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Pace Extrapolation
//!
//! Resolves a pace for an absolute distance from the athlete's distance table.
//!
//! - Inside the observed range the nearest row's grade-adjusted pace is used.
//! - Past the longest row, Riegel's power law projects the last row forward:
//!   `pace = pace_last × (d / d_last)^(f − 1)`.
//!
//! Both kinds of estimate already include the athlete's fatigue at that
//! distance, which is why the predictor does not apply a fatigue multiplier
//! on top of them.

use crate::config::ExtrapolationConfig;
use pacer_core::constants::riegel;
use pacer_core::models::DistancePaceRow;
use serde::{Deserialize, Serialize};

/// How a pace estimate was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateKind {
    /// Nearest row of the table
    Lookup,
    /// Projected past the last row
    Extrapolated,
}

/// A pace resolved from the distance table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaceEstimate {
    /// Grade-adjusted pace (min/km)
    pub pace_min_km: f64,
    /// Lookup or extrapolation
    pub kind: EstimateKind,
    /// Distance of the table row the estimate is based on (km)
    pub reference_distance_km: f64,
}

/// Looks up or projects pace for a target distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaceExtrapolator {
    riegel_exponent: f64,
}

impl PaceExtrapolator {
    /// Create an extrapolator with Riegel exponent `f`
    #[must_use]
    pub const fn new(riegel_exponent: f64) -> Self {
        Self { riegel_exponent }
    }

    /// Create an extrapolator from configuration
    #[must_use]
    pub const fn from_config(config: &ExtrapolationConfig) -> Self {
        Self::new(config.riegel_exponent)
    }

    /// Configured Riegel exponent
    #[must_use]
    pub const fn riegel_exponent(&self) -> f64 {
        self.riegel_exponent
    }

    /// Pace estimate for `target_km`, or `None` when the table is empty
    ///
    /// `table` must be sorted ascending by distance, as produced by the
    /// profile aggregator.
    #[must_use]
    pub fn estimate(&self, table: &[DistancePaceRow], target_km: f64) -> Option<PaceEstimate> {
        let first = table.first()?;
        let last = table.last()?;

        if target_km > last.distance_km && last.distance_km > 0.0 {
            let ratio = target_km / last.distance_km;
            return Some(PaceEstimate {
                pace_min_km: last.gap_min_km * ratio.powf(self.riegel_exponent - 1.0),
                kind: EstimateKind::Extrapolated,
                reference_distance_km: last.distance_km,
            });
        }

        // Strict comparison keeps the earlier row on ties
        let nearest = table.iter().fold(first, |best, row| {
            if (row.distance_km - target_km).abs() < (best.distance_km - target_km).abs() {
                row
            } else {
                best
            }
        });

        Some(PaceEstimate {
            pace_min_km: nearest.gap_min_km,
            kind: EstimateKind::Lookup,
            reference_distance_km: nearest.distance_km,
        })
    }
}

impl Default for PaceExtrapolator {
    fn default() -> Self {
        Self::new(riegel::DEFAULT_EXPONENT)
    }
}

/// Whole-race time predicted from one known performance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceTimePrediction {
    /// Predicted finishing time (minutes)
    pub predicted_time_minutes: f64,
    /// Predicted time as `HH:MM:SS`
    pub predicted_time_formatted: String,
    /// Average pace over the target distance (min/km)
    pub predicted_pace_min_km: f64,
    /// Pace as `M:SS /km`
    pub predicted_pace_formatted: String,
    /// Exponent the prediction used
    pub exponent_used: f64,
}

/// Predict a race time with Riegel's formula: `T2 = T1 × (D2 / D1)^f`
///
/// Returns `None` if any distance or time is non-positive or non-finite.
#[must_use]
pub fn riegel_time(
    known_distance_km: f64,
    known_time_minutes: f64,
    target_distance_km: f64,
    exponent: f64,
) -> Option<RaceTimePrediction> {
    let all_valid = [known_distance_km, known_time_minutes, target_distance_km]
        .iter()
        .all(|value| value.is_finite() && *value > 0.0);
    if !all_valid || !exponent.is_finite() {
        return None;
    }

    let predicted_time_minutes =
        known_time_minutes * (target_distance_km / known_distance_km).powf(exponent);
    let predicted_pace_min_km = predicted_time_minutes / target_distance_km;

    Some(RaceTimePrediction {
        predicted_time_minutes,
        predicted_time_formatted: format_duration_minutes(predicted_time_minutes),
        predicted_pace_min_km,
        predicted_pace_formatted: format_pace(predicted_pace_min_km),
        exponent_used: exponent,
    })
}

/// Format minutes as `HH:MM:SS`
#[must_use]
pub fn format_duration_minutes(minutes: f64) -> String {
    if !minutes.is_finite() || minutes <= 0.0 {
        return "00:00:00".to_owned();
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total_seconds = (minutes * 60.0).round() as u64;
    let hours = total_seconds / 3600;
    let mins = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{mins:02}:{secs:02}")
}

/// Format a pace in min/km as `M:SS /km`
#[must_use]
pub fn format_pace(pace_min_km: f64) -> String {
    if !pace_min_km.is_finite() || pace_min_km <= 0.0 {
        return "N/A".to_owned();
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total_seconds = (pace_min_km * 60.0).round() as u64;
    format!("{}:{:02} /km", total_seconds / 60, total_seconds % 60)
}
