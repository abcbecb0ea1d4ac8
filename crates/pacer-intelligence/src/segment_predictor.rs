// ABOUTME: Walks a normalized course composing per-segment paces into arrival predictions
// ABOUTME: Base pace resolution, factor composition, cutoff classification and stop time accrual
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Segment Predictor
//!
//! Orchestrates the factor models over a course. The walk carries two values
//! from waypoint to waypoint, elapsed minutes and the previous distance,
//! starting from `(0, 0)`. At each waypoint:
//!
//! 1. the segment length is the recorded delta, or the distance difference
//! 2. the terrain factor comes from the segment's elevation change
//! 3. the base pace comes from the distance table, else the plan override,
//!    else the profile's flat pace
//! 4. the fatigue factor comes from race progress, forced to 1.0 when the
//!    base pace came from the distance table
//! 5. the nighttime factor is evaluated at the segment's start time
//! 6. `pace = base × terrain × fatigue × nighttime`, clamped to a ceiling
//! 7. `minutes = distance × pace` is added to elapsed time
//! 8. the arrival is compared against the waypoint's cutoff
//! 9. real aid stations add stop time after the arrival is recorded
//!
//! Each transition emits a `debug` event with the intermediate state.

use crate::config::{CutoffConfig, PredictionConfig, StopTimeConfig};
use crate::factors::{FatigueFactorModel, NighttimeFactorModel, TerrainFactorModel, TerrainPaces};
use crate::pace_extrapolation::{EstimateKind, PaceExtrapolator};
use crate::waypoints::WaypointNormalizer;
use chrono::{DateTime, Duration, FixedOffset, NaiveTime, Timelike};
use pacer_core::models::{
    AidStationPrediction, Course, Cutoff, CutoffStatus, PaceFactors, PaceSource, PerformanceProfile,
    PlanOptions, RacePrediction, Waypoint,
};
use tracing::{debug, instrument, warn};

/// Milliseconds per minute, for converting elapsed minutes to clock time
const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Headline paces after applying fallbacks
#[derive(Debug, Clone, Copy)]
struct ResolvedPaces {
    flat: f64,
    climbing: f64,
    descending: f64,
    fatigue_factor: f64,
}

impl ResolvedPaces {
    fn resolve(profile: &PerformanceProfile, config: &PredictionConfig) -> Self {
        let fallback = &config.pacing.fallback;
        Self {
            flat: positive_or(profile.flat_pace_min_km, fallback.flat_pace_min_km),
            climbing: positive_or(profile.climbing_pace_min_km, fallback.climbing_pace_min_km),
            descending: positive_or(
                profile.descending_pace_min_km,
                fallback.descending_pace_min_km,
            ),
            fatigue_factor: positive_or(profile.fatigue_factor, fallback.fatigue_factor),
        }
    }
}

/// A resolved cutoff, as clock time and minutes after the start
#[derive(Debug, Clone, Copy)]
struct ResolvedCutoff {
    time: DateTime<FixedOffset>,
    minutes_from_start: f64,
}

/// Produces per-waypoint arrival predictions for a course
#[derive(Debug, Clone, Copy)]
pub struct SegmentPredictor<'a> {
    config: &'a PredictionConfig,
}

impl<'a> SegmentPredictor<'a> {
    /// Create a predictor using `config`
    #[must_use]
    pub const fn new(config: &'a PredictionConfig) -> Self {
        Self { config }
    }

    /// Predict arrival at every waypoint of `course`
    ///
    /// A course with no waypoints and no distance yields an empty prediction
    /// with zero total time. Missing profile data falls back to defaults;
    /// this never fails.
    #[must_use]
    #[instrument(skip_all, fields(race = %course.name, waypoints = course.waypoints.len()))]
    pub fn predict(
        &self,
        course: &Course,
        profile: &PerformanceProfile,
        plan: &PlanOptions,
    ) -> RacePrediction {
        let normalized = WaypointNormalizer::new(&self.config.waypoints).normalize(course);
        if normalized.is_empty() {
            debug!("Degenerate course, nothing to predict");
            return RacePrediction::empty(plan.start_time);
        }

        let total_distance_km = normalized.total_distance_km;
        let paces = ResolvedPaces::resolve(profile, self.config);
        let terrain = TerrainFactorModel::new(
            &self.config.terrain,
            TerrainPaces {
                flat_min_km: paces.flat,
                climbing_min_km: paces.climbing,
                descending_min_km: paces.descending,
            },
        );
        let curve = if self.config.fatigue.use_decay_curve {
            profile.pace_decay_by_progress.as_ref()
        } else {
            None
        };
        let fatigue = FatigueFactorModel::new(curve, paces.fatigue_factor);
        let nighttime = NighttimeFactorModel::new(&self.config.nighttime);
        let extrapolator = PaceExtrapolator::from_config(&self.config.pacing.extrapolation);
        let plan_override = plan
            .base_pace_override_min_km
            .filter(|pace| pace.is_finite() && *pace > 0.0);
        let stop_base_minutes = stop_band_minutes(total_distance_km, &self.config.stops);

        let mut cumulative_minutes = 0.0_f64;
        let mut previous_distance_km = 0.0_f64;
        let mut total_stop_minutes = 0.0_f64;
        let mut previous_cutoff: Option<DateTime<FixedOffset>> = None;
        let mut predictions = Vec::with_capacity(normalized.waypoints.len());

        for waypoint in &normalized.waypoints {
            let segment_distance_km = segment_distance(waypoint, previous_distance_km);

            let terrain_factor = terrain.factor(
                waypoint.elevation_gain_m,
                waypoint.elevation_loss_m,
                segment_distance_km,
            );

            let (base_pace, pace_source) = Self::resolve_base_pace(
                &extrapolator,
                profile,
                waypoint.distance_km,
                plan_override,
                paces.flat,
            );

            let fatigue_factor = if pace_source.encodes_fatigue() {
                1.0
            } else {
                fatigue.factor(waypoint.distance_km, total_distance_km)
            };

            let segment_start = offset_time(plan.start_time, cumulative_minutes);
            let is_nighttime = nighttime.is_night(segment_start.hour());
            let nighttime_factor =
                nighttime.factor(segment_start.hour(), plan.nighttime_slowdown_fraction);

            let segment_pace = self.clamp_pace(
                base_pace * terrain_factor * fatigue_factor * nighttime_factor,
                terrain_factor,
            );
            cumulative_minutes += segment_distance_km * segment_pace;
            let arrival_time = offset_time(plan.start_time, cumulative_minutes);

            let cutoff = waypoint
                .cutoff
                .as_ref()
                .and_then(|cutoff| resolve_cutoff(cutoff, plan.start_time, previous_cutoff));
            if let Some(resolved) = cutoff {
                previous_cutoff = Some(resolved.time);
            }
            let buffer_minutes =
                cutoff.map(|resolved| resolved.minutes_from_start - cumulative_minutes);
            let status = buffer_minutes.map_or(CutoffStatus::Safe, |buffer| {
                classify_buffer(buffer, &self.config.cutoffs)
            });

            let stop_minutes = if waypoint.is_virtual {
                0.0
            } else {
                stop_base_minutes + service_extra_minutes(waypoint, &self.config.stops)
            };

            debug!(
                waypoint = %waypoint.id,
                distance_km = waypoint.distance_km,
                segment_distance_km,
                base_pace,
                ?pace_source,
                terrain_factor,
                fatigue_factor,
                nighttime_factor,
                segment_pace,
                arrival_minutes = cumulative_minutes,
                ?buffer_minutes,
                %status,
                stop_minutes,
                "Waypoint transition"
            );

            predictions.push(AidStationPrediction {
                waypoint_id: waypoint.id.clone(),
                waypoint_name: waypoint.name.clone(),
                distance_km: waypoint.distance_km,
                is_virtual: waypoint.is_virtual,
                predicted_arrival_minutes: cumulative_minutes,
                predicted_arrival_time: arrival_time,
                cutoff_time: cutoff.map(|resolved| resolved.time),
                buffer_minutes,
                status,
                factors: PaceFactors {
                    base_pace_min_km: base_pace,
                    terrain: terrain_factor,
                    fatigue: fatigue_factor,
                    nighttime: nighttime_factor,
                },
                segment_distance_km,
                segment_pace_min_km: segment_pace,
                grade_adjusted_pace_min_km: base_pace * terrain_factor,
                is_nighttime,
                pace_source,
                stop_minutes,
            });

            cumulative_minutes += stop_minutes;
            total_stop_minutes += stop_minutes;
            previous_distance_km = waypoint.distance_km;
        }

        RacePrediction {
            finish_time: offset_time(plan.start_time, cumulative_minutes),
            predictions,
            total_minutes: cumulative_minutes,
            total_stop_minutes,
        }
    }

    fn resolve_base_pace(
        extrapolator: &PaceExtrapolator,
        profile: &PerformanceProfile,
        distance_km: f64,
        plan_override: Option<f64>,
        flat_pace: f64,
    ) -> (f64, PaceSource) {
        let from_table = extrapolator
            .estimate(&profile.distance_pace_table, distance_km)
            .filter(|estimate| estimate.pace_min_km.is_finite() && estimate.pace_min_km > 0.0);

        if let Some(estimate) = from_table {
            let source = match estimate.kind {
                EstimateKind::Lookup => PaceSource::DistanceLookup,
                EstimateKind::Extrapolated => PaceSource::RiegelExtrapolation,
            };
            return (estimate.pace_min_km, source);
        }
        if let Some(pace) = plan_override {
            return (pace, PaceSource::PlanOverride);
        }
        (flat_pace, PaceSource::ProfileFlat)
    }

    fn clamp_pace(&self, pace: f64, terrain_factor: f64) -> f64 {
        let limits = &self.config.pacing.limits;
        let ceiling = if terrain_factor > limits.steep_climb_terrain_factor {
            limits.max_steep_climb_pace_min_km
        } else {
            limits.max_pace_min_km
        };
        if pace.is_finite() {
            pace.clamp(0.0, ceiling)
        } else {
            ceiling
        }
    }
}

/// Cutoff status for a buffer in minutes
///
/// `< 0` is missed, below the danger threshold is danger, below the warning
/// threshold is warning, anything else is safe.
#[must_use]
pub fn classify_buffer(buffer_minutes: f64, thresholds: &CutoffConfig) -> CutoffStatus {
    if buffer_minutes < 0.0 {
        CutoffStatus::Missed
    } else if buffer_minutes < thresholds.danger_buffer_minutes {
        CutoffStatus::Danger
    } else if buffer_minutes < thresholds.warning_buffer_minutes {
        CutoffStatus::Warning
    } else {
        CutoffStatus::Safe
    }
}

/// Base stop time at an aid station, banded by total race distance
#[must_use]
pub fn stop_band_minutes(total_distance_km: f64, stops: &StopTimeConfig) -> f64 {
    if total_distance_km <= 50.0 {
        stops.up_to_50_km_minutes
    } else if total_distance_km <= 100.0 {
        stops.up_to_100_km_minutes
    } else if total_distance_km <= 160.0 {
        stops.up_to_160_km_minutes
    } else {
        stops.beyond_160_km_minutes
    }
}

/// Extra stop time for a station's services
#[must_use]
pub fn service_extra_minutes(waypoint: &Waypoint, stops: &StopTimeConfig) -> f64 {
    let mut extra = 0.0;
    if waypoint.has_drop_bag {
        extra += stops.drop_bag_extra_minutes;
    }
    if waypoint.has_crew_access {
        extra += stops.crew_extra_minutes;
    }
    extra
}

/// Length of the segment ending at `waypoint`
///
/// A recorded delta wins when usable; otherwise the distance difference,
/// never negative.
fn segment_distance(waypoint: &Waypoint, previous_distance_km: f64) -> f64 {
    waypoint
        .distance_from_prev_km
        .filter(|delta| delta.is_finite() && *delta >= 0.0)
        .unwrap_or_else(|| (waypoint.distance_km - previous_distance_km).max(0.0))
}

/// Resolve a cutoff against the race start
///
/// Hours after the start win over a clock time. A clock time resolves to its
/// first occurrence at or after both the start and the previous cutoff, so
/// overnight cutoffs land on the following day.
fn resolve_cutoff(
    cutoff: &Cutoff,
    start: DateTime<FixedOffset>,
    previous_cutoff: Option<DateTime<FixedOffset>>,
) -> Option<ResolvedCutoff> {
    if let Some(hours) = cutoff.hours_from_start.filter(|h| h.is_finite() && *h > 0.0) {
        let minutes_from_start = hours * 60.0;
        return Some(ResolvedCutoff {
            time: offset_time(start, minutes_from_start),
            minutes_from_start,
        });
    }

    let clock = cutoff.clock_time?;
    let floor = previous_cutoff.map_or(start, |previous| previous.max(start));
    let time = next_clock_occurrence(floor, clock)?;
    let minutes_from_start = time.signed_duration_since(start).num_seconds() as f64 / 60.0;
    Some(ResolvedCutoff {
        time,
        minutes_from_start,
    })
}

fn next_clock_occurrence(
    floor: DateTime<FixedOffset>,
    clock: NaiveTime,
) -> Option<DateTime<FixedOffset>> {
    let same_day = floor
        .date_naive()
        .and_time(clock)
        .and_local_timezone(*floor.offset())
        .single()?;
    if same_day >= floor {
        Some(same_day)
    } else {
        same_day.checked_add_signed(Duration::days(1))
    }
}

/// `start` plus fractional minutes
fn offset_time(start: DateTime<FixedOffset>, minutes: f64) -> DateTime<FixedOffset> {
    let millis = (minutes * MILLIS_PER_MINUTE).round() as i64;
    start
        .checked_add_signed(Duration::milliseconds(millis))
        .unwrap_or_else(|| {
            warn!(minutes, "Elapsed time overflows the calendar, keeping start time");
            start
        })
}

fn positive_or(value: Option<f64>, fallback: f64) -> f64 {
    value
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 6, 21, 6, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_clock_cutoff_before_start_rolls_to_next_day() {
        let cutoff = Cutoff::at_clock(NaiveTime::from_hms_opt(2, 0, 0).unwrap());
        let resolved = resolve_cutoff(&cutoff, start(), None).unwrap();
        assert!((resolved.minutes_from_start - 20.0 * 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clock_cutoff_never_precedes_previous_cutoff() {
        let previous = start() + Duration::hours(30);
        let cutoff = Cutoff::at_clock(NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        let resolved = resolve_cutoff(&cutoff, start(), Some(previous)).unwrap();
        assert!((resolved.minutes_from_start - 52.0 * 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hours_cutoff_wins_over_clock() {
        let cutoff = Cutoff {
            hours_from_start: Some(5.0),
            clock_time: NaiveTime::from_hms_opt(23, 0, 0),
        };
        let resolved = resolve_cutoff(&cutoff, start(), None).unwrap();
        assert!((resolved.minutes_from_start - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_profile_paces_use_configured_fallback() {
        let mut config = PredictionConfig::default();
        config.pacing.fallback.flat_pace_min_km = 7.0;
        config.pacing.fallback.climbing_pace_min_km = 11.0;

        let mut profile = PerformanceProfile::from_paces(6.0, 10.0, 5.0, 1.05);
        profile.flat_pace_min_km = Some(f64::NAN);
        profile.climbing_pace_min_km = Some(-3.0);
        profile.fatigue_factor = None;

        let paces = ResolvedPaces::resolve(&profile, &config);
        assert!((paces.flat - 7.0).abs() < f64::EPSILON);
        assert!((paces.climbing - 11.0).abs() < f64::EPSILON);
        assert!((paces.descending - 5.0).abs() < f64::EPSILON);
        assert!((paces.fatigue_factor - 1.08).abs() < f64::EPSILON);
    }

    #[test]
    fn test_recorded_segment_delta_preferred() {
        let mut waypoint = Waypoint::aid_station("a", "A", 30.0);
        assert!((segment_distance(&waypoint, 20.0) - 10.0).abs() < f64::EPSILON);
        waypoint.distance_from_prev_km = Some(12.5);
        assert!((segment_distance(&waypoint, 20.0) - 12.5).abs() < f64::EPSILON);
        waypoint.distance_from_prev_km = Some(f64::NAN);
        assert!((segment_distance(&waypoint, 35.0) - 0.0).abs() < f64::EPSILON);
    }
}
