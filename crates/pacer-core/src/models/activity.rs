// ABOUTME: Analyzed activity records produced by the external analysis worker
// ABOUTME: GradientCategory, GradientPaces, DistanceBucketPace, PaceDecayCurve, ActivityAnalysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Terrain classification of an analyzed stretch of an activity
///
/// The analysis worker buckets every stretch by its gradient and reports an
/// average pace per bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientCategory {
    /// Between -1% and 1%
    Flat,
    /// Between 1% and 3%
    GentleUphill,
    /// Between 3% and 8%
    Uphill,
    /// Above 8%
    SteepUphill,
    /// Between -3% and -1%
    GentleDownhill,
    /// Between -8% and -3%
    Downhill,
    /// Below -8%
    SteepDownhill,
}

impl GradientCategory {
    /// Every category, in reporting order
    pub const ALL: [Self; 7] = [
        Self::Flat,
        Self::GentleUphill,
        Self::Uphill,
        Self::SteepUphill,
        Self::GentleDownhill,
        Self::Downhill,
        Self::SteepDownhill,
    ];

    /// Whether this bucket contributes to the climbing pace
    #[must_use]
    pub const fn is_uphill(self) -> bool {
        matches!(self, Self::GentleUphill | Self::Uphill | Self::SteepUphill)
    }

    /// Whether this bucket contributes to the descending pace
    #[must_use]
    pub const fn is_downhill(self) -> bool {
        matches!(
            self,
            Self::GentleDownhill | Self::Downhill | Self::SteepDownhill
        )
    }

    /// Wire name of the bucket
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::GentleUphill => "gentle_uphill",
            Self::Uphill => "uphill",
            Self::SteepUphill => "steep_uphill",
            Self::GentleDownhill => "gentle_downhill",
            Self::Downhill => "downhill",
            Self::SteepDownhill => "steep_downhill",
        }
    }
}

impl fmt::Display for GradientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GradientCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("Unknown gradient category: {s}"))
    }
}

/// Pace (min/km) per gradient bucket; a bucket the activity never visited is `None`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientPaces {
    /// Flat pace
    pub flat: Option<f64>,
    /// Gentle uphill pace
    pub gentle_uphill: Option<f64>,
    /// Uphill pace
    pub uphill: Option<f64>,
    /// Steep uphill pace
    pub steep_uphill: Option<f64>,
    /// Gentle downhill pace
    pub gentle_downhill: Option<f64>,
    /// Downhill pace
    pub downhill: Option<f64>,
    /// Steep downhill pace
    pub steep_downhill: Option<f64>,
}

impl GradientPaces {
    /// Pace recorded for a bucket
    #[must_use]
    pub const fn get(&self, category: GradientCategory) -> Option<f64> {
        match category {
            GradientCategory::Flat => self.flat,
            GradientCategory::GentleUphill => self.gentle_uphill,
            GradientCategory::Uphill => self.uphill,
            GradientCategory::SteepUphill => self.steep_uphill,
            GradientCategory::GentleDownhill => self.gentle_downhill,
            GradientCategory::Downhill => self.downhill,
            GradientCategory::SteepDownhill => self.steep_downhill,
        }
    }

    /// Replace the pace of a bucket
    pub fn set(&mut self, category: GradientCategory, pace: Option<f64>) {
        let slot = match category {
            GradientCategory::Flat => &mut self.flat,
            GradientCategory::GentleUphill => &mut self.gentle_uphill,
            GradientCategory::Uphill => &mut self.uphill,
            GradientCategory::SteepUphill => &mut self.steep_uphill,
            GradientCategory::GentleDownhill => &mut self.gentle_downhill,
            GradientCategory::Downhill => &mut self.downhill,
            GradientCategory::SteepDownhill => &mut self.steep_downhill,
        };
        *slot = pace;
    }

    /// Iterate over buckets that carry a pace
    pub fn iter(&self) -> impl Iterator<Item = (GradientCategory, f64)> + '_ {
        GradientCategory::ALL
            .into_iter()
            .filter_map(|category| self.get(category).map(|pace| (category, pace)))
    }
}

/// Pace over one fixed-length (5 km) stretch of an activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceBucketPace {
    /// Start of the stretch from the activity start (km)
    pub start_km: f64,
    /// End of the stretch from the activity start (km)
    pub end_km: f64,
    /// Pace actually run (min/km)
    #[serde(default)]
    pub actual_pace_min_km: Option<f64>,
    /// Grade-adjusted pace (min/km)
    #[serde(default)]
    pub grade_adjusted_pace_min_km: Option<f64>,
}

/// Number of progress buckets in a decay curve
pub const PROGRESS_BUCKETS: usize = 10;

/// Pace multipliers by race-progress decile (`0-10`, `10-20`, ..., `90-100`)
///
/// Multipliers are relative to the athlete's fastest decile, so the curve can
/// contain values below 1.0 early in a run. Serialized as a map keyed by the
/// bucket label; unknown labels, `null` and non-positive values are dropped
/// when reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Option<f64>>", into = "BTreeMap<String, f64>")]
pub struct PaceDecayCurve {
    multipliers: [Option<f64>; PROGRESS_BUCKETS],
}

impl PaceDecayCurve {
    /// Label of a bucket, e.g. `30-40`
    #[must_use]
    pub fn bucket_label(index: usize) -> String {
        format!("{}-{}", index * 10, (index + 1) * 10)
    }

    /// Bucket holding a progress percentage: `min(floor(progress / 10), 9)`
    #[must_use]
    pub fn bucket_index(progress_pct: f64) -> usize {
        if !progress_pct.is_finite() || progress_pct <= 0.0 {
            return 0;
        }
        ((progress_pct / 10.0).floor() as usize).min(PROGRESS_BUCKETS - 1)
    }

    /// Multiplier for a bucket
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.multipliers.get(index).copied().flatten()
    }

    /// Set a bucket; invalid multipliers clear it
    pub fn set(&mut self, index: usize, multiplier: f64) {
        if let Some(slot) = self.multipliers.get_mut(index) {
            *slot = (multiplier.is_finite() && multiplier > 0.0).then_some(multiplier);
        }
    }

    /// Smallest multiplier across all populated buckets
    #[must_use]
    pub fn min_multiplier(&self) -> Option<f64> {
        self.iter().map(|(_, multiplier)| multiplier).reduce(f64::min)
    }

    /// Whether no bucket is populated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.multipliers.iter().all(Option::is_none)
    }

    /// Populated buckets in progress order
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.multipliers
            .iter()
            .enumerate()
            .filter_map(|(index, multiplier)| multiplier.map(|value| (index, value)))
    }
}

impl From<BTreeMap<String, Option<f64>>> for PaceDecayCurve {
    fn from(raw: BTreeMap<String, Option<f64>>) -> Self {
        let mut curve = Self::default();
        for (label, multiplier) in raw {
            match (0..PROGRESS_BUCKETS).find(|&index| Self::bucket_label(index) == label) {
                Some(index) => {
                    if let Some(multiplier) = multiplier {
                        curve.set(index, multiplier);
                    }
                }
                None => warn!(label = %label, "Ignoring unknown pace decay bucket"),
            }
        }
        curve
    }
}

impl From<PaceDecayCurve> for BTreeMap<String, f64> {
    fn from(curve: PaceDecayCurve) -> Self {
        curve
            .iter()
            .map(|(index, multiplier)| (PaceDecayCurve::bucket_label(index), multiplier))
            .collect()
    }
}

/// Normalized pace decay of a single activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaceDecayProfile {
    /// Multipliers by progress decile
    pub curve: PaceDecayCurve,
    /// Total distance of the activity the curve was measured on (km)
    pub activity_distance_km: f64,
}

/// Summary of one analyzed activity
///
/// Produced by the external analysis worker and read-only to this engine.
/// Every metric is optional: a field the worker could not compute is absent,
/// never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityAnalysis {
    /// Identifier of the source activity
    pub activity_id: String,
    /// When the activity was recorded
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
    /// Total distance (km)
    #[serde(default)]
    pub total_distance_km: Option<f64>,
    /// Overall grade-adjusted pace (min/km)
    #[serde(default)]
    pub grade_adjusted_pace_min_km: Option<f64>,
    /// Average pace per gradient bucket
    #[serde(default)]
    pub pace_by_gradient: GradientPaces,
    /// Paces per 5 km stretch
    #[serde(default)]
    pub distance_buckets: Vec<DistanceBucketPace>,
    /// Pace decay by progress decile
    #[serde(default)]
    pub pace_decay: Option<PaceDecayProfile>,
    /// Scalar fatigue factor
    #[serde(default)]
    pub fatigue_factor: Option<f64>,
}

impl ActivityAnalysis {
    /// Create an analysis with no metrics
    pub fn new(activity_id: impl Into<String>) -> Self {
        Self {
            activity_id: activity_id.into(),
            recorded_at: None,
            total_distance_km: None,
            grade_adjusted_pace_min_km: None,
            pace_by_gradient: GradientPaces::default(),
            distance_buckets: Vec::new(),
            pace_decay: None,
            fatigue_factor: None,
        }
    }

    /// Set the recording date
    #[must_use]
    pub fn recorded_at(mut self, recorded_at: DateTime<Utc>) -> Self {
        self.recorded_at = Some(recorded_at);
        self
    }

    /// Set the total distance
    #[must_use]
    pub fn total_distance_km(mut self, distance_km: f64) -> Self {
        self.total_distance_km = Some(distance_km);
        self
    }

    /// Set the pace of one gradient bucket
    #[must_use]
    pub fn gradient_pace(mut self, category: GradientCategory, pace_min_km: f64) -> Self {
        self.pace_by_gradient.set(category, Some(pace_min_km));
        self
    }

    /// Append a 5 km stretch
    #[must_use]
    pub fn distance_bucket(mut self, start_km: f64, end_km: f64, pace: f64, gap: f64) -> Self {
        self.distance_buckets.push(DistanceBucketPace {
            start_km,
            end_km,
            actual_pace_min_km: Some(pace),
            grade_adjusted_pace_min_km: Some(gap),
        });
        self
    }

    /// Attach a decay curve
    #[must_use]
    pub fn pace_decay(mut self, curve: PaceDecayCurve, activity_distance_km: f64) -> Self {
        self.pace_decay = Some(PaceDecayProfile {
            curve,
            activity_distance_km,
        });
        self
    }

    /// Set the scalar fatigue factor
    #[must_use]
    pub fn fatigue_factor(mut self, fatigue_factor: f64) -> Self {
        self.fatigue_factor = Some(fatigue_factor);
        self
    }
}
