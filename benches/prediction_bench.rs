// ABOUTME: Criterion benchmarks for profile aggregation and race prediction
// ABOUTME: Measures rebuild cost over growing histories and course walks over growing station counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the prediction engine.
//!
//! Measures profile rebuilds from synthetic activity histories, batch
//! rebuilds across athletes, and per-waypoint prediction over long courses.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use chrono::{Duration, FixedOffset, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pacer::config::ProfileConfig;
use pacer::models::{
    ActivityAnalysis, Course, Cutoff, GradientCategory, PaceDecayCurve, PlanOptions, Waypoint,
};
use pacer::profile_aggregator::{rebuild_profiles_parallel, ProfileAggregator};
use pacer::{predict, PredictionConfig};
use uuid::Uuid;

/// Synthetic analyzed activity history, one run every other day
#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
fn generate_history(count: usize) -> Vec<ActivityAnalysis> {
    let now = Utc::now();
    (0..count)
        .map(|index| {
            let distance_km = 10.0 + (index % 9) as f64 * 5.0;
            let drift = (index % 7) as f64 * 0.1;
            let mut curve = PaceDecayCurve::default();
            for bucket in 0..10 {
                curve.set(bucket, (bucket as f64).mul_add(0.02, 0.95));
            }
            let mut activity = ActivityAnalysis::new(format!("activity-{index}"))
                .recorded_at(now - Duration::days((index * 2) as i64))
                .total_distance_km(distance_km)
                .gradient_pace(GradientCategory::Flat, 6.0 + drift)
                .gradient_pace(GradientCategory::Uphill, 9.5 + drift)
                .gradient_pace(GradientCategory::Downhill, 5.2 + drift)
                .pace_decay(curve, distance_km)
                .fatigue_factor(1.04 + drift / 10.0);
            let mut start_km = 0.0;
            while start_km < distance_km {
                activity = activity.distance_bucket(
                    start_km,
                    start_km + 5.0,
                    6.2 + start_km / 100.0,
                    6.0 + start_km / 100.0,
                );
                start_km += 5.0;
            }
            activity
        })
        .collect()
}

/// Course with evenly spaced, hilly aid stations
#[allow(clippy::cast_precision_loss)]
fn generate_course(stations: usize) -> Course {
    let total_km = 170.0;
    let spacing = total_km / (stations + 1) as f64;
    (1..=stations).fold(
        Course::new("Benchmark 100 Miler", total_km).with_overall_cutoff(46.0),
        |course, index| {
            let gain = if index % 2 == 0 { 600.0 } else { 150.0 };
            course.with_waypoint(
                Waypoint::aid_station(format!("as{index}"), "Aid", spacing * index as f64)
                    .with_elevation(gain, 300.0)
                    .with_cutoff(Cutoff::after_hours(4.0 * index as f64))
                    .with_services(index % 3 == 0, index % 4 == 0),
            )
        },
    )
}

fn bench_profile_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("profile_rebuild");
    let aggregator = ProfileAggregator::default();

    for count in [10_usize, 100, 500] {
        let history = generate_history(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("aggregate", count),
            &history,
            |b, history| {
                b.iter(|| aggregator.aggregate(black_box(history), Utc::now()));
            },
        );
    }

    group.finish();
}

fn bench_parallel_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_rebuild");
    let histories: Vec<(Uuid, Vec<ActivityAnalysis>)> = (0..64)
        .map(|_| (Uuid::new_v4(), generate_history(100)))
        .collect();
    let config = ProfileConfig::default();

    group.throughput(Throughput::Elements(histories.len() as u64));
    group.bench_function("64_athletes", |b| {
        b.iter(|| rebuild_profiles_parallel(black_box(&histories), &config, Utc::now()));
    });

    group.finish();
}

fn bench_race_prediction(c: &mut Criterion) {
    let mut group = c.benchmark_group("race_prediction");
    let profile = ProfileAggregator::default().aggregate(&generate_history(200), Utc::now());
    let config = PredictionConfig::default();
    let Some(start) = FixedOffset::east_opt(0)
        .and_then(|utc| utc.with_ymd_and_hms(2025, 6, 21, 5, 0, 0).single())
    else {
        return;
    };
    let plan = PlanOptions::starting_at(start);

    for stations in [5_usize, 20, 80] {
        let course = generate_course(stations);
        group.throughput(Throughput::Elements(stations as u64));
        group.bench_with_input(
            BenchmarkId::new("predict", stations),
            &course,
            |b, course| {
                b.iter(|| predict(black_box(course), &profile, &plan, &config));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_profile_rebuild,
    bench_parallel_rebuild,
    bench_race_prediction,
);
criterion_main!(benches);
