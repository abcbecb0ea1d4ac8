// ABOUTME: Pace multiplier configuration for terrain, fatigue and nighttime models
// ABOUTME: Terrain model selection, gradient band thresholds and the night window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Factor Model Configuration
//!
//! Selects and tunes the three multipliers composed into every segment pace.
//!
//! # Terrain models
//!
//! - `gradient_bands` (default): piecewise net-gradient bands scaled by the
//!   athlete's own climbing and descending paces
//! - `minetti`: metabolic cost of gradient locomotion, independent of the athlete
//!
//! ```bash
//! export PACER_TERRAIN_MODEL=minetti
//! ```

use pacer_core::constants::{nighttime, terrain};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Terrain multiplier implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainModel {
    /// Piecewise bands over net gradient
    #[default]
    GradientBands,
    /// Minetti energy-cost polynomial
    Minetti,
}

impl fmt::Display for TerrainModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GradientBands => write!(f, "gradient_bands"),
            Self::Minetti => write!(f, "minetti"),
        }
    }
}

impl FromStr for TerrainModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gradient_bands" | "bands" => Ok(Self::GradientBands),
            "minetti" => Ok(Self::Minetti),
            other => Err(format!(
                "Unknown terrain model: {other}. Valid options: gradient_bands, minetti"
            )),
        }
    }
}

/// Terrain Factor Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// Which model converts gradient into a multiplier
    #[serde(default)]
    pub model: TerrainModel,
    /// Gradient (%) above which the full climbing or descending ratio applies
    pub steep_gradient_pct: f64,
    /// Gradient (%) above which the linear ramps apply
    pub moderate_gradient_pct: f64,
    /// Factor increase per gradient point on the climbing ramp
    pub climb_ramp_per_pct: f64,
    /// Factor at the start of the descent ramp
    pub descent_ramp_base: f64,
    /// Factor increase per gradient point on the descent ramp
    pub descent_ramp_per_pct: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            model: TerrainModel::default(),
            steep_gradient_pct: terrain::STEEP_GRADIENT_PCT,
            moderate_gradient_pct: terrain::MODERATE_GRADIENT_PCT,
            climb_ramp_per_pct: terrain::CLIMB_RAMP_PER_PCT,
            descent_ramp_base: terrain::DESCENT_RAMP_BASE,
            descent_ramp_per_pct: terrain::DESCENT_RAMP_PER_PCT,
        }
    }
}

/// Fatigue Factor Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatigueConfig {
    /// Read the profile's progress decay curve when present
    pub use_decay_curve: bool,
}

impl Default for FatigueConfig {
    fn default() -> Self {
        Self {
            use_decay_curve: true,
        }
    }
}

/// Nighttime Factor Configuration
///
/// Night covers `[night_start_hour, 24)` and `[0, night_end_hour)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NighttimeConfig {
    /// First night hour
    pub night_start_hour: u32,
    /// First daylight hour
    pub night_end_hour: u32,
}

impl Default for NighttimeConfig {
    fn default() -> Self {
        Self {
            night_start_hour: nighttime::NIGHT_START_HOUR,
            night_end_hour: nighttime::NIGHT_END_HOUR,
        }
    }
}
