// ABOUTME: Expands a sparse aid station list into a full start-to-finish waypoint sequence
// ABOUTME: Synthesizes virtual Start and Finish entries when the course ends are not covered
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::WaypointConfig;
use pacer_core::models::{Course, Cutoff, Waypoint};
use tracing::{debug, warn};

/// Waypoints covering the whole course, in distance order
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCourse {
    /// Ordered waypoints, virtual entries included
    pub waypoints: Vec<Waypoint>,
    /// Course distance used for progress and stop banding (km)
    pub total_distance_km: f64,
}

impl NormalizedCourse {
    /// Whether there is nothing to walk
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Number of synthesized waypoints
    #[must_use]
    pub fn virtual_count(&self) -> usize {
        self.waypoints.iter().filter(|w| w.is_virtual).count()
    }
}

/// Builds the complete waypoint sequence for a prediction run
#[derive(Debug, Clone, Copy)]
pub struct WaypointNormalizer {
    tolerance_km: f64,
}

impl WaypointNormalizer {
    /// Create a normalizer from configuration
    #[must_use]
    pub const fn new(config: &WaypointConfig) -> Self {
        Self {
            tolerance_km: config.endpoint_tolerance_km,
        }
    }

    /// Normalize a course's waypoints
    ///
    /// Waypoints with a negative or non-finite distance are dropped and the
    /// rest sorted by distance. A virtual Start is prepended when the first
    /// waypoint is more than the tolerance past 0, and a virtual Finish
    /// (carrying the overall cutoff) appended when the last one falls more
    /// than the tolerance short of the course distance. Virtual entries are
    /// never written back to the course.
    #[must_use]
    pub fn normalize(&self, course: &Course) -> NormalizedCourse {
        let mut waypoints: Vec<Waypoint> = course
            .waypoints
            .iter()
            .filter(|waypoint| {
                let valid = waypoint.distance_km.is_finite() && waypoint.distance_km >= 0.0;
                if !valid {
                    warn!(
                        waypoint_id = %waypoint.id,
                        distance_km = waypoint.distance_km,
                        "Dropping waypoint with invalid distance"
                    );
                }
                valid
            })
            .cloned()
            .collect();
        waypoints.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

        let last_real_km = waypoints.last().map_or(0.0, |w| w.distance_km);
        let total_distance_km =
            if course.total_distance_km.is_finite() && course.total_distance_km > 0.0 {
                course.total_distance_km
            } else {
                last_real_km
            };

        if waypoints.is_empty() && total_distance_km <= self.tolerance_km {
            return NormalizedCourse {
                waypoints,
                total_distance_km,
            };
        }

        let needs_start = match waypoints.first() {
            Some(first) => first.distance_km > self.tolerance_km,
            None => true,
        };
        if needs_start {
            waypoints.insert(0, Waypoint::virtual_start());
        }

        if last_real_km < total_distance_km - self.tolerance_km {
            let cutoff = course
                .overall_cutoff_hours
                .filter(|hours| hours.is_finite() && *hours > 0.0)
                .map(Cutoff::after_hours);
            waypoints.push(Waypoint::virtual_finish(total_distance_km, cutoff));
        }

        let normalized = NormalizedCourse {
            waypoints,
            total_distance_km,
        };
        debug!(
            waypoints = normalized.waypoints.len(),
            virtual_waypoints = normalized.virtual_count(),
            total_distance_km,
            "Normalized course waypoints"
        );
        normalized
    }
}

impl Default for WaypointNormalizer {
    fn default() -> Self {
        Self::new(&WaypointConfig::default())
    }
}
