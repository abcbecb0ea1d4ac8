// ABOUTME: Pacing configuration for base pace resolution and segment composition
// ABOUTME: Configures the Riegel exponent, pace ceilings and fallback paces
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Pacing Configuration
//!
//! Controls how a segment's base pace is resolved and how far the composed
//! pace may drift before it is clamped.

use pacer_core::constants::{default_paces, pace_limits, riegel};
use serde::{Deserialize, Serialize};

/// Pacing Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Distance-table extrapolation settings
    pub extrapolation: ExtrapolationConfig,
    /// Sanity ceilings on composed segment pace
    pub limits: PaceLimitsConfig,
    /// Paces used when the profile has none
    pub fallback: FallbackPacesConfig,
}

/// Settings for projecting pace beyond the longest observed distance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtrapolationConfig {
    /// Power-law exponent `f` in `pace × (d / d_known)^(f − 1)`
    pub riegel_exponent: f64,
}

/// Ceilings applied after multiplying all factors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaceLimitsConfig {
    /// Ceiling on runnable terrain (min/km)
    pub max_pace_min_km: f64,
    /// Ceiling on steep climbs (min/km)
    pub max_steep_climb_pace_min_km: f64,
    /// Terrain factor above which the steep ceiling applies
    pub steep_climb_terrain_factor: f64,
}

/// Fallback paces for athletes without usable history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackPacesConfig {
    /// Flat pace (min/km)
    pub flat_pace_min_km: f64,
    /// Climbing pace (min/km)
    pub climbing_pace_min_km: f64,
    /// Descending pace (min/km)
    pub descending_pace_min_km: f64,
    /// Scalar fatigue factor
    pub fatigue_factor: f64,
}

impl Default for ExtrapolationConfig {
    fn default() -> Self {
        Self {
            riegel_exponent: riegel::DEFAULT_EXPONENT,
        }
    }
}

impl Default for PaceLimitsConfig {
    fn default() -> Self {
        Self {
            max_pace_min_km: pace_limits::MAX_PACE_MIN_KM,
            max_steep_climb_pace_min_km: pace_limits::MAX_STEEP_CLIMB_PACE_MIN_KM,
            steep_climb_terrain_factor: pace_limits::STEEP_CLIMB_TERRAIN_FACTOR,
        }
    }
}

impl Default for FallbackPacesConfig {
    fn default() -> Self {
        Self {
            flat_pace_min_km: default_paces::FLAT_PACE_MIN_KM,
            climbing_pace_min_km: default_paces::CLIMBING_PACE_MIN_KM,
            descending_pace_min_km: default_paces::DESCENDING_PACE_MIN_KM,
            fatigue_factor: default_paces::FATIGUE_FACTOR,
        }
    }
}
