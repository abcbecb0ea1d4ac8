// ABOUTME: Prediction engine configuration with domain sub-configs and env overrides
// ABOUTME: Orchestrates profile, pacing, factor and course configs with unified validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Prediction Configuration Module
//!
//! Every tunable of the engine lives here, grouped by domain:
//! - `profile` - recency half-life for profile rebuilds
//! - `pacing` - Riegel exponent, pace ceilings, fallback paces
//! - `factors` - terrain model and thresholds, fatigue, nighttime window
//! - `course` - cutoff buffers, stop times, waypoint tolerance
//!
//! There is no process-wide instance. Callers build a [`PredictionConfig`]
//! (usually via [`PredictionConfig::load`]) and pass it to the engine.
//!
//! # Environment overrides
//!
//! ```bash
//! export PACER_HALF_LIFE_DAYS=60
//! export PACER_RIEGEL_EXPONENT=1.06
//! export PACER_TERRAIN_MODEL=minetti
//! ```

pub mod course;
pub mod error;
pub mod factors;
pub mod pacing;
pub mod profile;

pub use course::{CutoffConfig, StopTimeConfig, WaypointConfig};
pub use error::ConfigError;
pub use factors::{FatigueConfig, NighttimeConfig, TerrainConfig, TerrainModel};
pub use pacing::{ExtrapolationConfig, FallbackPacesConfig, PaceLimitsConfig, PacingConfig};
pub use profile::ProfileConfig;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::debug;

/// Main prediction engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// Profile aggregation
    pub profile: ProfileConfig,
    /// Base pace resolution and ceilings
    pub pacing: PacingConfig,
    /// Terrain multiplier
    pub terrain: TerrainConfig,
    /// Fatigue multiplier
    pub fatigue: FatigueConfig,
    /// Nighttime multiplier
    pub nighttime: NighttimeConfig,
    /// Cutoff status thresholds
    pub cutoffs: CutoffConfig,
    /// Aid station stop times
    pub stops: StopTimeConfig,
    /// Waypoint normalisation
    pub waypoints: WaypointConfig,
}

impl PredictionConfig {
    /// Load configuration from defaults and `PACER_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        debug!(
            half_life_days = config.profile.half_life_days,
            riegel_exponent = config.pacing.extrapolation.riegel_exponent,
            terrain_model = %config.terrain.model,
            "Loaded prediction configuration"
        );
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error naming the first threshold that is out of range or out of order
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.profile.half_life_days) {
            return Err(ConfigError::ValueOutOfRange(
                "half_life_days must be positive",
            ));
        }

        let exponent = self.pacing.extrapolation.riegel_exponent;
        if !exponent.is_finite() || !(1.0..=2.0).contains(&exponent) {
            return Err(ConfigError::ValueOutOfRange(
                "riegel_exponent must be between 1.0 and 2.0",
            ));
        }

        let limits = &self.pacing.limits;
        if !is_positive(limits.max_pace_min_km) || !is_positive(limits.steep_climb_terrain_factor)
        {
            return Err(ConfigError::ValueOutOfRange(
                "pace ceilings and steep climb factor must be positive",
            ));
        }
        if limits.max_pace_min_km > limits.max_steep_climb_pace_min_km {
            return Err(ConfigError::InvalidRange(
                "max_pace must be <= max_steep_climb_pace",
            ));
        }

        let fallback = &self.pacing.fallback;
        if !is_positive(fallback.flat_pace_min_km)
            || !is_positive(fallback.climbing_pace_min_km)
            || !is_positive(fallback.descending_pace_min_km)
        {
            return Err(ConfigError::ValueOutOfRange(
                "fallback paces must be positive",
            ));
        }
        if !fallback.fatigue_factor.is_finite() || fallback.fatigue_factor < 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "fallback fatigue_factor must be >= 1.0",
            ));
        }

        if self.terrain.moderate_gradient_pct >= self.terrain.steep_gradient_pct {
            return Err(ConfigError::InvalidRange(
                "moderate_gradient_pct must be < steep_gradient_pct",
            ));
        }

        let night = &self.nighttime;
        if night.night_start_hour > 24 || night.night_end_hour > 24 {
            return Err(ConfigError::ValueOutOfRange(
                "night hours must be between 0 and 24",
            ));
        }
        if night.night_end_hour > night.night_start_hour {
            return Err(ConfigError::InvalidRange(
                "night_end_hour must be <= night_start_hour",
            ));
        }

        if self.cutoffs.danger_buffer_minutes >= self.cutoffs.warning_buffer_minutes {
            return Err(ConfigError::InvalidRange(
                "danger_buffer_minutes must be < warning_buffer_minutes",
            ));
        }

        self.validate_stops()?;

        if !self.waypoints.endpoint_tolerance_km.is_finite()
            || self.waypoints.endpoint_tolerance_km < 0.0
        {
            return Err(ConfigError::ValueOutOfRange(
                "endpoint_tolerance_km must be non-negative",
            ));
        }

        Ok(())
    }

    fn validate_stops(&self) -> Result<(), ConfigError> {
        let stops = &self.stops;
        let all = [
            stops.up_to_50_km_minutes,
            stops.up_to_100_km_minutes,
            stops.up_to_160_km_minutes,
            stops.beyond_160_km_minutes,
            stops.drop_bag_extra_minutes,
            stops.crew_extra_minutes,
        ];
        if all.iter().any(|minutes| !minutes.is_finite() || *minutes < 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "stop times must be non-negative",
            ));
        }
        if stops.up_to_50_km_minutes > stops.up_to_100_km_minutes
            || stops.up_to_100_km_minutes > stops.up_to_160_km_minutes
            || stops.up_to_160_km_minutes > stops.beyond_160_km_minutes
        {
            return Err(ConfigError::InvalidRange(
                "stop time bands must be non-decreasing with distance",
            ));
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Profile
        Self::apply_env_var("PACER_HALF_LIFE_DAYS", &mut self.profile.half_life_days)?;

        // Pacing
        Self::apply_env_var(
            "PACER_RIEGEL_EXPONENT",
            &mut self.pacing.extrapolation.riegel_exponent,
        )?;
        Self::apply_env_var(
            "PACER_MAX_PACE_MIN_KM",
            &mut self.pacing.limits.max_pace_min_km,
        )?;
        Self::apply_env_var(
            "PACER_MAX_STEEP_CLIMB_PACE_MIN_KM",
            &mut self.pacing.limits.max_steep_climb_pace_min_km,
        )?;
        Self::apply_env_var(
            "PACER_DEFAULT_FLAT_PACE_MIN_KM",
            &mut self.pacing.fallback.flat_pace_min_km,
        )?;
        Self::apply_env_var(
            "PACER_DEFAULT_CLIMBING_PACE_MIN_KM",
            &mut self.pacing.fallback.climbing_pace_min_km,
        )?;
        Self::apply_env_var(
            "PACER_DEFAULT_DESCENDING_PACE_MIN_KM",
            &mut self.pacing.fallback.descending_pace_min_km,
        )?;
        Self::apply_env_var(
            "PACER_DEFAULT_FATIGUE_FACTOR",
            &mut self.pacing.fallback.fatigue_factor,
        )?;

        // Factors
        if let Ok(model) = env::var("PACER_TERRAIN_MODEL") {
            self.terrain.model = model.parse().map_err(ConfigError::Parse)?;
        }
        Self::apply_env_var("PACER_USE_DECAY_CURVE", &mut self.fatigue.use_decay_curve)?;
        Self::apply_env_var("PACER_NIGHT_START_HOUR", &mut self.nighttime.night_start_hour)?;
        Self::apply_env_var("PACER_NIGHT_END_HOUR", &mut self.nighttime.night_end_hour)?;

        // Course walk
        Self::apply_env_var(
            "PACER_DANGER_BUFFER_MINUTES",
            &mut self.cutoffs.danger_buffer_minutes,
        )?;
        Self::apply_env_var(
            "PACER_WARNING_BUFFER_MINUTES",
            &mut self.cutoffs.warning_buffer_minutes,
        )?;
        Self::apply_env_var(
            "PACER_ENDPOINT_TOLERANCE_KM",
            &mut self.waypoints.endpoint_tolerance_km,
        )?;

        Ok(self)
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
