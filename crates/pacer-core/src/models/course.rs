// ABOUTME: Race course geometry and plan options supplied to the predictor
// ABOUTME: Cutoff, Waypoint, Course and PlanOptions definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{nighttime, waypoints};
use chrono::{DateTime, FixedOffset, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Mandatory time limit at a waypoint
///
/// When both forms are given the hours-from-start value wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cutoff {
    /// Hours after the race start
    #[serde(default)]
    pub hours_from_start: Option<f64>,
    /// Local clock time
    #[serde(default)]
    pub clock_time: Option<NaiveTime>,
}

impl Cutoff {
    /// Cutoff expressed as hours after the start
    #[must_use]
    pub const fn after_hours(hours: f64) -> Self {
        Self {
            hours_from_start: Some(hours),
            clock_time: None,
        }
    }

    /// Cutoff expressed as a local clock time
    #[must_use]
    pub const fn at_clock(time: NaiveTime) -> Self {
        Self {
            hours_from_start: None,
            clock_time: Some(time),
        }
    }
}

/// A point on the course: an aid station, or a synthesized start/finish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Cumulative distance from the start (km)
    pub distance_km: f64,
    /// Recorded distance from the previous waypoint (km)
    #[serde(default)]
    pub distance_from_prev_km: Option<f64>,
    /// Elevation gained since the previous waypoint (m)
    #[serde(default)]
    pub elevation_gain_m: Option<f64>,
    /// Elevation lost since the previous waypoint (m)
    #[serde(default)]
    pub elevation_loss_m: Option<f64>,
    /// Cutoff, if the waypoint has one
    #[serde(default)]
    pub cutoff: Option<Cutoff>,
    /// Drop bag available
    #[serde(default)]
    pub has_drop_bag: bool,
    /// Crew allowed
    #[serde(default)]
    pub has_crew_access: bool,
    /// Synthesized for this run only; never persisted
    #[serde(default)]
    pub is_virtual: bool,
}

impl Waypoint {
    /// A real, user-authored aid station
    pub fn aid_station(id: impl Into<String>, name: impl Into<String>, distance_km: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            distance_km,
            distance_from_prev_km: None,
            elevation_gain_m: None,
            elevation_loss_m: None,
            cutoff: None,
            has_drop_bag: false,
            has_crew_access: false,
            is_virtual: false,
        }
    }

    /// Synthesized start at distance 0
    #[must_use]
    pub fn virtual_start() -> Self {
        Self {
            is_virtual: true,
            ..Self::aid_station(waypoints::VIRTUAL_START_ID, "Start", 0.0)
        }
    }

    /// Synthesized finish at the course distance
    #[must_use]
    pub fn virtual_finish(total_distance_km: f64, cutoff: Option<Cutoff>) -> Self {
        Self {
            is_virtual: true,
            cutoff,
            ..Self::aid_station(waypoints::VIRTUAL_FINISH_ID, "Finish", total_distance_km)
        }
    }

    /// Set elevation change since the previous waypoint
    #[must_use]
    pub fn with_elevation(mut self, gain_m: f64, loss_m: f64) -> Self {
        self.elevation_gain_m = Some(gain_m);
        self.elevation_loss_m = Some(loss_m);
        self
    }

    /// Set the cutoff
    #[must_use]
    pub fn with_cutoff(mut self, cutoff: Cutoff) -> Self {
        self.cutoff = Some(cutoff);
        self
    }

    /// Set service flags
    #[must_use]
    pub fn with_services(mut self, drop_bag: bool, crew_access: bool) -> Self {
        self.has_drop_bag = drop_bag;
        self.has_crew_access = crew_access;
        self
    }
}

/// A race course as returned by the course repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Race identifier
    pub race_id: Uuid,
    /// Race name
    pub name: String,
    /// Total course distance (km)
    pub total_distance_km: f64,
    /// Overall time limit in hours
    #[serde(default)]
    pub overall_cutoff_hours: Option<f64>,
    /// Real waypoints, ordered by distance
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
}

impl Course {
    /// Course without waypoints
    pub fn new(name: impl Into<String>, total_distance_km: f64) -> Self {
        Self {
            race_id: Uuid::new_v4(),
            name: name.into(),
            total_distance_km,
            overall_cutoff_hours: None,
            waypoints: Vec::new(),
        }
    }

    /// Set the overall cutoff
    #[must_use]
    pub fn with_overall_cutoff(mut self, hours: f64) -> Self {
        self.overall_cutoff_hours = Some(hours);
        self
    }

    /// Append a waypoint
    #[must_use]
    pub fn with_waypoint(mut self, waypoint: Waypoint) -> Self {
        self.waypoints.push(waypoint);
        self
    }
}

/// Per-run options chosen by the athlete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanOptions {
    /// Flat pace to use instead of the profile's (min/km)
    #[serde(default)]
    pub base_pace_override_min_km: Option<f64>,
    /// Fractional slowdown at night (0.15 = 15%)
    #[serde(default = "default_nighttime_slowdown")]
    pub nighttime_slowdown_fraction: f64,
    /// Race start, in the race's local offset
    pub start_time: DateTime<FixedOffset>,
}

impl PlanOptions {
    /// Options with the default nighttime slowdown and no override
    #[must_use]
    pub const fn starting_at(start_time: DateTime<FixedOffset>) -> Self {
        Self {
            base_pace_override_min_km: None,
            nighttime_slowdown_fraction: nighttime::DEFAULT_SLOWDOWN,
            start_time,
        }
    }

    /// Set the flat pace override
    #[must_use]
    pub const fn with_base_pace(mut self, pace_min_km: f64) -> Self {
        self.base_pace_override_min_km = Some(pace_min_km);
        self
    }

    /// Set the nighttime slowdown
    #[must_use]
    pub const fn with_nighttime_slowdown(mut self, fraction: f64) -> Self {
        self.nighttime_slowdown_fraction = fraction;
        self
    }
}

const fn default_nighttime_slowdown() -> f64 {
    nighttime::DEFAULT_SLOWDOWN
}
