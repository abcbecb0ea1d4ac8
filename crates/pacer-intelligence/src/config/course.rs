// ABOUTME: Course-walk configuration for cutoff classification, stop times and waypoints
// ABOUTME: Buffer thresholds, distance-banded aid station stops and endpoint tolerance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pacer_core::constants::{cutoffs, stop_times, waypoints};
use serde::{Deserialize, Serialize};

/// Cutoff buffer thresholds (minutes)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutoffConfig {
    /// Buffers below this are `danger`
    pub danger_buffer_minutes: f64,
    /// Buffers below this are `warning`
    pub warning_buffer_minutes: f64,
}

impl Default for CutoffConfig {
    fn default() -> Self {
        Self {
            danger_buffer_minutes: cutoffs::DANGER_BUFFER_MINUTES,
            warning_buffer_minutes: cutoffs::WARNING_BUFFER_MINUTES,
        }
    }
}

/// Aid station stop time, banded by total race distance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopTimeConfig {
    /// Stop at races up to 50 km (minutes)
    pub up_to_50_km_minutes: f64,
    /// Stop at races up to 100 km (minutes)
    pub up_to_100_km_minutes: f64,
    /// Stop at races up to 160 km (minutes)
    pub up_to_160_km_minutes: f64,
    /// Stop at longer races (minutes)
    pub beyond_160_km_minutes: f64,
    /// Extra minutes at stations with a drop bag
    pub drop_bag_extra_minutes: f64,
    /// Extra minutes at stations with crew access
    pub crew_extra_minutes: f64,
}

impl Default for StopTimeConfig {
    fn default() -> Self {
        Self {
            up_to_50_km_minutes: stop_times::UP_TO_50_KM,
            up_to_100_km_minutes: stop_times::UP_TO_100_KM,
            up_to_160_km_minutes: stop_times::UP_TO_160_KM,
            beyond_160_km_minutes: stop_times::BEYOND_160_KM,
            drop_bag_extra_minutes: stop_times::DROP_BAG_EXTRA,
            crew_extra_minutes: stop_times::CREW_EXTRA,
        }
    }
}

/// Waypoint normalisation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaypointConfig {
    /// Gap at either end (km) before a virtual start or finish is added
    pub endpoint_tolerance_km: f64,
}

impl Default for WaypointConfig {
    fn default() -> Self {
        Self {
            endpoint_tolerance_km: waypoints::ENDPOINT_TOLERANCE_KM,
        }
    }
}
