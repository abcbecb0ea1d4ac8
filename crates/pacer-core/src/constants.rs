// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Fallback paces, model thresholds and stop-time bands for race prediction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! flat list. Every value here is also exposed as a configuration default in
//! `pacer-intelligence`, so these are the fallbacks, not hard limits.

/// Paces used when the athlete has no usable history
pub mod default_paces {
    /// Flat pace in min/km
    pub const FLAT_PACE_MIN_KM: f64 = 6.5;
    /// Climbing pace in min/km
    pub const CLIMBING_PACE_MIN_KM: f64 = 12.0;
    /// Descending pace in min/km
    pub const DESCENDING_PACE_MIN_KM: f64 = 5.5;
    /// Scalar fatigue factor for the linear fallback curve
    pub const FATIGUE_FACTOR: f64 = 1.08;
}

/// Recency weighting of historical activities
pub mod recency {
    /// Days after which an activity counts half as much
    pub const DEFAULT_HALF_LIFE_DAYS: f64 = 90.0;
}

/// Power-law extrapolation beyond observed distances
pub mod riegel {
    /// Exponent for ultra-endurance degradation
    pub const DEFAULT_EXPONENT: f64 = 1.15;
    /// Classic road-racing exponent
    pub const ROAD_EXPONENT: f64 = 1.06;
}

/// Net-gradient terrain bands (percent)
pub mod terrain {
    /// Above this gradient the full climbing ratio applies
    pub const STEEP_GRADIENT_PCT: f64 = 5.0;
    /// Above this gradient the linear ramp applies
    pub const MODERATE_GRADIENT_PCT: f64 = 2.0;
    /// Factor increase per gradient point on the climbing ramp
    pub const CLIMB_RAMP_PER_PCT: f64 = 0.1;
    /// Factor at the start of the descent ramp
    pub const DESCENT_RAMP_BASE: f64 = 0.9;
    /// Factor increase per gradient point on the descent ramp
    pub const DESCENT_RAMP_PER_PCT: f64 = 0.02;
    /// Metabolic cost of flat locomotion, J/(kg*m)
    pub const MINETTI_FLAT_COST: f64 = 3.6;
}

/// Nighttime window (local clock hours)
pub mod nighttime {
    /// Hour at which night begins
    pub const NIGHT_START_HOUR: u32 = 21;
    /// Hour at which night ends
    pub const NIGHT_END_HOUR: u32 = 6;
    /// Fractional slowdown applied at night
    pub const DEFAULT_SLOWDOWN: f64 = 0.15;
}

/// Segment pace ceilings in min/km
pub mod pace_limits {
    /// Walking-pace ceiling on runnable terrain
    pub const MAX_PACE_MIN_KM: f64 = 15.0;
    /// Ceiling when the terrain factor indicates a steep climb
    pub const MAX_STEEP_CLIMB_PACE_MIN_KM: f64 = 25.0;
    /// Terrain factor above which a segment counts as a steep climb
    pub const STEEP_CLIMB_TERRAIN_FACTOR: f64 = 1.5;
}

/// Cutoff buffer thresholds in minutes
pub mod cutoffs {
    /// Buffers below this are `danger`
    pub const DANGER_BUFFER_MINUTES: f64 = 15.0;
    /// Buffers below this are `warning`
    pub const WARNING_BUFFER_MINUTES: f64 = 30.0;
}

/// Aid station stop times in minutes
pub mod stop_times {
    /// Races up to 50 km
    pub const UP_TO_50_KM: f64 = 3.0;
    /// Races up to 100 km
    pub const UP_TO_100_KM: f64 = 6.0;
    /// Races up to 160 km
    pub const UP_TO_160_KM: f64 = 10.0;
    /// Longer races
    pub const BEYOND_160_KM: f64 = 15.0;
    /// Extra time at stations with a drop bag
    pub const DROP_BAG_EXTRA: f64 = 5.0;
    /// Extra time at stations with crew access
    pub const CREW_EXTRA: f64 = 3.0;
}

/// Waypoint normalisation
pub mod waypoints {
    /// Distance tolerance before a virtual start or finish is synthesized (km)
    pub const ENDPOINT_TOLERANCE_KM: f64 = 0.1;
    /// Identifier of the synthesized start
    pub const VIRTUAL_START_ID: &str = "virtual-start";
    /// Identifier of the synthesized finish
    pub const VIRTUAL_FINISH_ID: &str = "virtual-finish";
}

/// Service names for structured logging
pub mod service_names {
    /// Main library name
    pub const PACER: &str = "pacer";
}
