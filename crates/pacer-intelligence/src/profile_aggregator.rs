// ABOUTME: Aggregates analyzed activities into a recency-weighted performance profile
// ABOUTME: Gradient-bucket paces, an absolute distance pace table and a progress decay curve
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Profile Aggregation
//!
//! Turns an athlete's full history of [`ActivityAnalysis`] records into one
//! [`PerformanceProfile`]. The profile is rebuilt wholesale on every call;
//! there is no incremental merge.
//!
//! Every output is a weighted mean over the activities that reported it:
//!
//! - gradient buckets and the headline paces use the recency weight
//! - distance table rows use the recency weight, keyed by `(start_km, end_km)`
//! - the decay curve uses `recency × log10(activity_km + 1)` so long runs
//!   shape it more than short ones
//!
//! An output nothing contributed to is left `None` (or empty) so the predictor
//! can fall back to its defaults. Non-finite and non-positive values are
//! skipped, not averaged in as zero.

use crate::config::ProfileConfig;
use crate::recency::RecencyWeighter;
use chrono::{DateTime, Utc};
use pacer_core::models::{
    ActivityAnalysis, AthleteId, DistanceBucketPace, DistancePaceRow, GradientCategory,
    GradientPaces, PaceDecayCurve, PerformanceProfile, PROGRESS_BUCKETS,
};
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Running `Σ(value·weight)` and `Σ(weight)`
#[derive(Debug, Clone, Copy, Default)]
struct WeightedMean {
    weighted_sum: f64,
    total_weight: f64,
    samples: usize,
}

impl WeightedMean {
    /// Add an observation; invalid values or weights are ignored
    fn add(&mut self, value: f64, weight: f64) -> bool {
        if !is_usable(value) || !weight.is_finite() || weight <= 0.0 {
            return false;
        }
        self.weighted_sum = value.mul_add(weight, self.weighted_sum);
        self.total_weight += weight;
        self.samples += 1;
        true
    }

    fn merge(&mut self, other: &Self) {
        self.weighted_sum += other.weighted_sum;
        self.total_weight += other.total_weight;
        self.samples += other.samples;
    }

    fn mean(&self) -> Option<f64> {
        (self.total_weight > 0.0).then(|| self.weighted_sum / self.total_weight)
    }
}

/// Accumulators for one `(start_km, end_km)` distance bucket
#[derive(Debug, Clone, Copy, Default)]
struct DistanceBucketAccumulator {
    start_km: f64,
    end_km: f64,
    actual: WeightedMean,
    grade_adjusted: WeightedMean,
    sample_weight: f64,
}

impl DistanceBucketAccumulator {
    fn into_row(self) -> Option<DistancePaceRow> {
        let midpoint = (self.start_km + self.end_km) / 2.0;
        // A bucket missing one of the two paces borrows the other
        let (pace, gap) = match (self.actual.mean(), self.grade_adjusted.mean()) {
            (Some(pace), Some(gap)) => (pace, gap),
            (Some(pace), None) => (pace, pace),
            (None, Some(gap)) => (gap, gap),
            (None, None) => return None,
        };
        Some(DistancePaceRow {
            distance_km: midpoint,
            pace_min_km: pace,
            gap_min_km: gap,
            sample_weight: self.sample_weight,
        })
    }
}

/// Bucket key in whole metres, so float noise does not split a bucket
fn bucket_key(bucket: &DistanceBucketPace) -> (i64, i64) {
    (
        (bucket.start_km * 1000.0).round() as i64,
        (bucket.end_km * 1000.0).round() as i64,
    )
}

fn is_usable(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Builds performance profiles from analyzed activity history
#[derive(Debug, Clone, Copy)]
pub struct ProfileAggregator {
    weighter: RecencyWeighter,
}

impl ProfileAggregator {
    /// Create an aggregator from profile configuration
    #[must_use]
    pub fn new(config: &ProfileConfig) -> Self {
        Self::with_half_life(config.half_life_days)
    }

    /// Create an aggregator with an explicit recency half-life
    #[must_use]
    pub fn with_half_life(half_life_days: f64) -> Self {
        Self {
            weighter: RecencyWeighter::new(half_life_days),
        }
    }

    /// Aggregate `activities` into a profile, weighting by age relative to `as_of`
    ///
    /// With no activities the result is [`PerformanceProfile::empty`]; this
    /// never fails.
    #[must_use]
    pub fn aggregate(
        &self,
        activities: &[ActivityAnalysis],
        as_of: DateTime<Utc>,
    ) -> PerformanceProfile {
        if activities.is_empty() {
            debug!("No analyzed activities, returning empty profile");
            return PerformanceProfile::empty(as_of);
        }

        let mut gradients: BTreeMap<GradientCategory, WeightedMean> = GradientCategory::ALL
            .into_iter()
            .map(|category| (category, WeightedMean::default()))
            .collect();
        let mut fatigue = WeightedMean::default();
        let mut overall_gap = WeightedMean::default();
        let mut distance_buckets: BTreeMap<(i64, i64), DistanceBucketAccumulator> =
            BTreeMap::new();
        let mut decay = [WeightedMean::default(); PROGRESS_BUCKETS];
        let mut total_distance_km = 0.0;

        for activity in activities {
            let weight = self.weighter.weight_for(activity.recorded_at, as_of);

            for (category, pace) in activity.pace_by_gradient.iter() {
                let accepted = gradients
                    .get_mut(&category)
                    .is_some_and(|mean| mean.add(pace, weight));
                if !accepted {
                    warn!(
                        activity_id = %activity.activity_id,
                        bucket = %category,
                        pace,
                        "Skipping invalid gradient pace"
                    );
                }
            }

            if let Some(factor) = activity.fatigue_factor {
                fatigue.add(factor, weight);
            }
            if let Some(gap) = activity.grade_adjusted_pace_min_km {
                overall_gap.add(gap, weight);
            }
            if let Some(distance) = activity.total_distance_km.filter(|d| is_usable(*d)) {
                total_distance_km += distance;
            }

            Self::accumulate_distance_buckets(activity, weight, &mut distance_buckets);
            Self::accumulate_decay(activity, weight, &mut decay);
        }

        let climbing = Self::combine(&gradients, GradientCategory::is_uphill);
        let descending = Self::combine(&gradients, GradientCategory::is_downhill);

        let mut gradient_paces = GradientPaces::default();
        for (category, mean) in &gradients {
            gradient_paces.set(*category, mean.mean());
        }
        let gradient_sample_sizes = gradients
            .iter()
            .map(|(category, mean)| (*category, mean.samples))
            .collect();

        let mut distance_pace_table: Vec<DistancePaceRow> = distance_buckets
            .into_values()
            .filter_map(DistanceBucketAccumulator::into_row)
            .collect();
        distance_pace_table.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

        let mut curve = PaceDecayCurve::default();
        for (index, mean) in decay.iter().enumerate() {
            if let Some(multiplier) = mean.mean() {
                curve.set(index, multiplier);
            }
        }

        let profile = PerformanceProfile {
            flat_pace_min_km: gradient_paces.get(GradientCategory::Flat),
            climbing_pace_min_km: climbing,
            descending_pace_min_km: descending,
            fatigue_factor: fatigue.mean(),
            gradient_paces,
            gradient_sample_sizes,
            overall_gap_min_km: overall_gap.mean(),
            pace_decay_by_progress: (!curve.is_empty()).then_some(curve),
            distance_pace_table,
            activities_analyzed: activities.len(),
            total_distance_km,
            generated_at: as_of,
        };

        debug!(
            activities = profile.activities_analyzed,
            flat_pace = ?profile.flat_pace_min_km,
            distance_rows = profile.distance_pace_table.len(),
            has_decay_curve = profile.pace_decay_by_progress.is_some(),
            "Aggregated performance profile"
        );

        profile
    }

    /// Combined weighted mean over every bucket matching `include`
    fn combine(
        gradients: &BTreeMap<GradientCategory, WeightedMean>,
        include: fn(GradientCategory) -> bool,
    ) -> Option<f64> {
        let mut combined = WeightedMean::default();
        for (_, mean) in gradients.iter().filter(|(category, _)| include(**category)) {
            combined.merge(mean);
        }
        combined.mean()
    }

    fn accumulate_distance_buckets(
        activity: &ActivityAnalysis,
        weight: f64,
        buckets: &mut BTreeMap<(i64, i64), DistanceBucketAccumulator>,
    ) {
        for bucket in &activity.distance_buckets {
            let valid_span = bucket.start_km.is_finite()
                && bucket.end_km.is_finite()
                && bucket.start_km >= 0.0
                && bucket.end_km > bucket.start_km;
            if !valid_span {
                warn!(
                    activity_id = %activity.activity_id,
                    start_km = bucket.start_km,
                    end_km = bucket.end_km,
                    "Skipping malformed distance bucket"
                );
                continue;
            }

            let entry = buckets
                .entry(bucket_key(bucket))
                .or_insert_with(|| DistanceBucketAccumulator {
                    start_km: bucket.start_km,
                    end_km: bucket.end_km,
                    ..DistanceBucketAccumulator::default()
                });
            let actual = bucket
                .actual_pace_min_km
                .is_some_and(|pace| entry.actual.add(pace, weight));
            let gap = bucket
                .grade_adjusted_pace_min_km
                .is_some_and(|pace| entry.grade_adjusted.add(pace, weight));
            if actual || gap {
                entry.sample_weight += weight;
            }
        }
    }

    fn accumulate_decay(
        activity: &ActivityAnalysis,
        recency_weight: f64,
        decay: &mut [WeightedMean; PROGRESS_BUCKETS],
    ) {
        let Some(profile) = &activity.pace_decay else {
            return;
        };
        if !is_usable(profile.activity_distance_km) {
            return;
        }
        let weight = recency_weight * (profile.activity_distance_km + 1.0).log10();
        for (index, multiplier) in profile.curve.iter() {
            if let Some(mean) = decay.get_mut(index) {
                mean.add(multiplier, weight);
            }
        }
    }
}

impl Default for ProfileAggregator {
    fn default() -> Self {
        Self::new(&ProfileConfig::default())
    }
}

/// Rebuild a profile from `activities` as of now
#[must_use]
pub fn rebuild_profile(activities: &[ActivityAnalysis], half_life_days: f64) -> PerformanceProfile {
    ProfileAggregator::with_half_life(half_life_days).aggregate(activities, Utc::now())
}

/// Rebuild profiles for many athletes in parallel
///
/// Each athlete's rebuild is independent, so the batch is split across the
/// rayon thread pool. Output order matches input order.
#[must_use]
pub fn rebuild_profiles_parallel(
    histories: &[(AthleteId, Vec<ActivityAnalysis>)],
    config: &ProfileConfig,
    as_of: DateTime<Utc>,
) -> Vec<(AthleteId, PerformanceProfile)> {
    let aggregator = ProfileAggregator::new(config);
    histories
        .par_iter()
        .map(|(athlete_id, activities)| (*athlete_id, aggregator.aggregate(activities, as_of)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_mean_skips_invalid_values() {
        let mut mean = WeightedMean::default();
        assert!(mean.add(5.0, 1.0));
        assert!(!mean.add(f64::NAN, 1.0));
        assert!(!mean.add(-2.0, 1.0));
        assert!(!mean.add(6.0, 0.0));
        assert_eq!(mean.samples, 1);
        assert_eq!(mean.mean(), Some(5.0));
    }

    #[test]
    fn test_empty_weighted_mean_is_absent() {
        assert_eq!(WeightedMean::default().mean(), None);
    }

    #[test]
    fn test_bucket_key_absorbs_float_noise() {
        let a = DistanceBucketPace {
            start_km: 5.0,
            end_km: 10.0,
            actual_pace_min_km: None,
            grade_adjusted_pace_min_km: None,
        };
        let b = DistanceBucketPace {
            start_km: 5.000_000_1,
            end_km: 9.999_999_9,
            ..a.clone()
        };
        assert_eq!(bucket_key(&a), bucket_key(&b));
    }
}
