// ABOUTME: Integration tests for recency-weighted profile aggregation
// ABOUTME: Covers gradient paces, the distance pace table, decay curves and batch rebuilds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{DateTime, Duration, TimeZone, Utc};
use common::{assert_close, init_test_logging};
use pacer::config::ProfileConfig;
use pacer::models::{ActivityAnalysis, DistanceBucketPace, GradientCategory, PaceDecayCurve};
use pacer::profile_aggregator::{rebuild_profiles_parallel, ProfileAggregator};
use uuid::Uuid;

fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn curve_with(bucket: usize, multiplier: f64) -> PaceDecayCurve {
    let mut curve = PaceDecayCurve::default();
    curve.set(bucket, multiplier);
    curve
}

#[test]
fn test_empty_history_yields_empty_profile() {
    init_test_logging();
    let profile = ProfileAggregator::default().aggregate(&[], as_of());

    assert_eq!(profile.activities_analyzed, 0);
    assert!(profile.flat_pace_min_km.is_none());
    assert!(profile.climbing_pace_min_km.is_none());
    assert!(profile.fatigue_factor.is_none());
    assert!(profile.distance_pace_table.is_empty());
    assert!(profile.pace_decay_by_progress.is_none());
    assert_eq!(profile.generated_at, as_of());
}

#[test]
fn test_single_undated_activity_reproduces_its_flat_pace() {
    init_test_logging();
    let activity = ActivityAnalysis::new("run-1").gradient_pace(GradientCategory::Flat, 5.5);

    let profile = ProfileAggregator::default().aggregate(&[activity], as_of());

    assert_eq!(profile.flat_pace_min_km, Some(5.5));
    assert_eq!(profile.activities_analyzed, 1);
    assert!(profile.climbing_pace_min_km.is_none());
    assert!(profile.descending_pace_min_km.is_none());
}

#[test]
fn test_climbing_pace_combines_every_uphill_bucket() {
    init_test_logging();
    let first = ActivityAnalysis::new("hills-1")
        .gradient_pace(GradientCategory::GentleUphill, 8.0)
        .gradient_pace(GradientCategory::Uphill, 10.0);
    let second = ActivityAnalysis::new("hills-2")
        .gradient_pace(GradientCategory::SteepUphill, 14.0)
        .gradient_pace(GradientCategory::Downhill, 5.0);

    let profile = ProfileAggregator::default().aggregate(&[first, second], as_of());

    assert_close(profile.climbing_pace_min_km.unwrap(), 32.0 / 3.0);
    assert_close(profile.descending_pace_min_km.unwrap(), 5.0);
    assert_eq!(profile.gradient_paces.uphill, Some(10.0));
    assert_eq!(profile.gradient_sample_sizes.len(), GradientCategory::ALL.len());
    assert_eq!(
        profile.gradient_sample_sizes.get(&GradientCategory::Flat),
        Some(&0)
    );
    assert_eq!(
        profile.gradient_sample_sizes.get(&GradientCategory::SteepUphill),
        Some(&1)
    );
}

#[test]
fn test_recent_activities_dominate_flat_pace() {
    init_test_logging();
    let recent = ActivityAnalysis::new("recent")
        .recorded_at(as_of())
        .gradient_pace(GradientCategory::Flat, 5.0);
    let old = ActivityAnalysis::new("old")
        .recorded_at(as_of() - Duration::days(90))
        .gradient_pace(GradientCategory::Flat, 7.0);

    let profile = ProfileAggregator::with_half_life(90.0).aggregate(&[recent, old], as_of());

    let old_weight = (-1.0_f64).exp();
    let expected = 7.0_f64.mul_add(old_weight, 5.0) / (1.0 + old_weight);
    assert_close(profile.flat_pace_min_km.unwrap(), expected);
    assert!(profile.flat_pace_min_km.unwrap() < 6.0);
}

#[test]
fn test_future_dated_activity_counts_as_today() {
    init_test_logging();
    let future = ActivityAnalysis::new("future")
        .recorded_at(as_of() + Duration::days(10))
        .gradient_pace(GradientCategory::Flat, 6.0);
    let undated = ActivityAnalysis::new("undated").gradient_pace(GradientCategory::Flat, 4.0);

    let profile = ProfileAggregator::default().aggregate(&[future, undated], as_of());

    assert_close(profile.flat_pace_min_km.unwrap(), 5.0);
}

#[test]
fn test_invalid_paces_are_skipped_not_averaged() {
    init_test_logging();
    let good = ActivityAnalysis::new("good").gradient_pace(GradientCategory::Flat, 6.0);
    let bad = ActivityAnalysis::new("bad")
        .gradient_pace(GradientCategory::Flat, -3.0)
        .gradient_pace(GradientCategory::Uphill, f64::NAN)
        .fatigue_factor(f64::INFINITY);

    let profile = ProfileAggregator::default().aggregate(&[good, bad], as_of());

    assert_eq!(profile.flat_pace_min_km, Some(6.0));
    assert!(profile.climbing_pace_min_km.is_none());
    assert!(profile.fatigue_factor.is_none());
    assert_eq!(profile.activities_analyzed, 2);
}

#[test]
fn test_distance_table_is_sorted_and_merged_by_bucket() {
    init_test_logging();
    let first = ActivityAnalysis::new("long-1")
        .distance_bucket(10.0, 15.0, 6.5, 6.0)
        .distance_bucket(0.0, 5.0, 5.0, 5.0);
    let second = ActivityAnalysis::new("long-2").distance_bucket(0.0, 5.0, 7.0, 6.0);

    let profile = ProfileAggregator::default().aggregate(&[first, second], as_of());
    let table = &profile.distance_pace_table;

    assert_eq!(table.len(), 2);
    assert_close(table[0].distance_km, 2.5);
    assert_close(table[0].pace_min_km, 6.0);
    assert_close(table[0].gap_min_km, 5.5);
    assert_close(table[0].sample_weight, 2.0);
    assert_close(table[1].distance_km, 12.5);
    assert_close(table[1].gap_min_km, 6.0);
    assert_close(table[1].sample_weight, 1.0);
}

#[test]
fn test_distance_row_missing_gap_borrows_actual_pace() {
    init_test_logging();
    let mut activity = ActivityAnalysis::new("no-gap");
    activity.distance_buckets.push(DistanceBucketPace {
        start_km: 20.0,
        end_km: 25.0,
        actual_pace_min_km: Some(7.25),
        grade_adjusted_pace_min_km: None,
    });
    activity.distance_buckets.push(DistanceBucketPace {
        start_km: 30.0,
        end_km: 25.0,
        actual_pace_min_km: Some(7.0),
        grade_adjusted_pace_min_km: Some(7.0),
    });

    let profile = ProfileAggregator::default().aggregate(&[activity], as_of());

    assert_eq!(profile.distance_pace_table.len(), 1);
    let row = &profile.distance_pace_table[0];
    assert_close(row.distance_km, 22.5);
    assert_close(row.pace_min_km, 7.25);
    assert_close(row.gap_min_km, 7.25);
}

#[test]
fn test_decay_curve_weights_long_runs_more() {
    init_test_logging();
    let short = ActivityAnalysis::new("short").pace_decay(curve_with(9, 1.0), 10.0);
    let long = ActivityAnalysis::new("long").pace_decay(curve_with(9, 1.3), 100.0);

    let profile = ProfileAggregator::default().aggregate(&[short, long], as_of());
    let curve = profile.pace_decay_by_progress.unwrap();

    let short_weight = 11.0_f64.log10();
    let long_weight = 101.0_f64.log10();
    let expected = 1.3_f64.mul_add(long_weight, short_weight) / (short_weight + long_weight);
    assert_close(curve.get(9).unwrap(), expected);
    assert!(curve.get(0).is_none());
}

#[test]
fn test_totals_and_overall_gap() {
    init_test_logging();
    let mut half = ActivityAnalysis::new("half")
        .total_distance_km(21.1)
        .fatigue_factor(1.04);
    half.grade_adjusted_pace_min_km = Some(5.8);
    let full = ActivityAnalysis::new("full")
        .total_distance_km(42.2)
        .fatigue_factor(1.08);

    let profile = ProfileAggregator::default().aggregate(&[half, full], as_of());

    assert_close(profile.total_distance_km, 63.3);
    assert_close(profile.fatigue_factor.unwrap(), 1.06);
    assert_eq!(profile.overall_gap_min_km, Some(5.8));
}

#[test]
fn test_parallel_rebuild_preserves_athlete_order() {
    init_test_logging();
    let athletes: Vec<Uuid> = (0..8).map(|_| Uuid::new_v4()).collect();
    let histories: Vec<(Uuid, Vec<ActivityAnalysis>)> = athletes
        .iter()
        .enumerate()
        .map(|(index, athlete)| {
            let pace = 5.0 + index as f64 * 0.25;
            (
                *athlete,
                vec![ActivityAnalysis::new(format!("run-{index}"))
                    .gradient_pace(GradientCategory::Flat, pace)],
            )
        })
        .collect();

    let profiles = rebuild_profiles_parallel(&histories, &ProfileConfig::default(), as_of());

    assert_eq!(profiles.len(), athletes.len());
    for (index, (athlete, profile)) in profiles.iter().enumerate() {
        assert_eq!(*athlete, athletes[index]);
        assert_close(profile.flat_pace_min_km.unwrap(), 5.0 + index as f64 * 0.25);
    }
}

#[test]
fn test_profile_serializes_decay_curve_by_label() {
    init_test_logging();
    let activity = ActivityAnalysis::new("curve").pace_decay(curve_with(3, 1.1), 30.0);
    let profile = ProfileAggregator::default().aggregate(&[activity], as_of());

    let json = serde_json::to_value(&profile).unwrap();
    assert_close(json["pace_decay_by_progress"]["30-40"].as_f64().unwrap(), 1.1);
    assert_eq!(json["gradient_sample_sizes"]["steep_uphill"], 0);
}
