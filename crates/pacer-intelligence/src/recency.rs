// ABOUTME: Exponential recency weighting of historical activities
// ABOUTME: weight = exp(-age_days / half_life_days), always in (0, 1]
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use pacer_core::constants::recency;

/// Seconds per day, for fractional ages
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Weights a data point by how long ago it was recorded
///
/// Old activities are diminished, never discarded: the weight approaches zero
/// but does not reach it for any finite age.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecencyWeighter {
    half_life_days: f64,
}

impl RecencyWeighter {
    /// Create a weighter; a non-positive or non-finite half-life uses the default
    #[must_use]
    pub fn new(half_life_days: f64) -> Self {
        let half_life_days = if half_life_days.is_finite() && half_life_days > 0.0 {
            half_life_days
        } else {
            recency::DEFAULT_HALF_LIFE_DAYS
        };
        Self { half_life_days }
    }

    /// Configured half-life in days
    #[must_use]
    pub const fn half_life_days(&self) -> f64 {
        self.half_life_days
    }

    /// Weight of a data point `age_days` old
    ///
    /// Future dates (negative ages) and non-finite ages count as age 0.
    #[must_use]
    pub fn weight(&self, age_days: f64) -> f64 {
        let age = if age_days.is_finite() {
            age_days.max(0.0)
        } else {
            0.0
        };
        let weight = (-age / self.half_life_days).exp();
        // exp underflows to 0.0 for extreme ages
        weight.max(f64::MIN_POSITIVE)
    }

    /// Weight of an activity recorded at `recorded_at`, as seen from `as_of`
    ///
    /// An activity without a date is treated as current.
    #[must_use]
    pub fn weight_for(&self, recorded_at: Option<DateTime<Utc>>, as_of: DateTime<Utc>) -> f64 {
        recorded_at.map_or(1.0, |recorded_at| {
            let age_seconds = as_of.signed_duration_since(recorded_at).num_seconds();
            self.weight(age_seconds as f64 / SECONDS_PER_DAY)
        })
    }
}

impl Default for RecencyWeighter {
    fn default() -> Self {
        Self::new(recency::DEFAULT_HALF_LIFE_DAYS)
    }
}
