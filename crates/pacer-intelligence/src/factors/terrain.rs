// ABOUTME: Terrain pace multiplier from a segment's net gradient
// ABOUTME: Asymmetric gradient bands scaled by athlete paces, or the Minetti cost model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Terrain Factor
//!
//! Net gradient is `(gain − loss) / distance_m × 100`. With the default
//! gradient-band model:
//!
//! | Net gradient        | Factor                                  |
//! |---------------------|-----------------------------------------|
//! | `> 5%`              | `climbing_pace / flat_pace`             |
//! | `(2%, 5%]`          | `1.0 + (g − 2) × 0.1`                   |
//! | `[-5%, -2%)`        | `0.9 + (abs(g) − 2) × 0.02`             |
//! | `< -5%`             | `descending_pace / flat_pace`           |
//! | otherwise           | `1.0`                                   |
//!
//! Descents are treated as less linearly costly than climbs, hence the
//! asymmetric ramps.

use crate::config::{TerrainConfig, TerrainModel};
use pacer_core::constants::terrain::MINETTI_FLAT_COST;

/// Steepest gradient (rise/run) fed to the Minetti polynomial
const MINETTI_MAX_GRADIENT: f64 = 0.5;
/// Lowest metabolic cost the polynomial may return, J/(kg*m)
const MINETTI_MIN_COST: f64 = 1.0;
/// Clamp on the Minetti factor
const MINETTI_FACTOR_RANGE: (f64, f64) = (0.5, 3.0);

/// The athlete paces the gradient bands are scaled by (min/km)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainPaces {
    /// Flat pace
    pub flat_min_km: f64,
    /// Climbing pace
    pub climbing_min_km: f64,
    /// Descending pace
    pub descending_min_km: f64,
}

/// Converts a segment's elevation change into a pace multiplier
#[derive(Debug, Clone)]
pub struct TerrainFactorModel {
    config: TerrainConfig,
    paces: TerrainPaces,
}

impl TerrainFactorModel {
    /// Create a model scaled by the athlete's resolved paces
    #[must_use]
    pub fn new(config: &TerrainConfig, paces: TerrainPaces) -> Self {
        Self {
            config: config.clone(),
            paces,
        }
    }

    /// Net gradient in percent, or `None` for a segment with no usable length
    ///
    /// Missing, negative or non-finite elevation values count as zero.
    #[must_use]
    pub fn net_gradient_pct(
        elevation_gain_m: Option<f64>,
        elevation_loss_m: Option<f64>,
        distance_km: f64,
    ) -> Option<f64> {
        if !distance_km.is_finite() || distance_km <= 0.0 {
            return None;
        }
        let gain = sanitize_elevation(elevation_gain_m);
        let loss = sanitize_elevation(elevation_loss_m);
        Some((gain - loss) / (distance_km * 1000.0) * 100.0)
    }

    /// Terrain multiplier for a segment
    #[must_use]
    pub fn factor(
        &self,
        elevation_gain_m: Option<f64>,
        elevation_loss_m: Option<f64>,
        distance_km: f64,
    ) -> f64 {
        let Some(gradient_pct) =
            Self::net_gradient_pct(elevation_gain_m, elevation_loss_m, distance_km)
        else {
            return 1.0;
        };

        match self.config.model {
            TerrainModel::GradientBands => self.banded_factor(gradient_pct),
            TerrainModel::Minetti => minetti_factor(gradient_pct / 100.0),
        }
    }

    /// Gradient-band multiplier for a net gradient in percent
    #[must_use]
    pub fn banded_factor(&self, gradient_pct: f64) -> f64 {
        let steep = self.config.steep_gradient_pct;
        let moderate = self.config.moderate_gradient_pct;

        if gradient_pct > steep {
            self.paces.climbing_min_km / self.paces.flat_min_km
        } else if gradient_pct > moderate {
            (gradient_pct - moderate).mul_add(self.config.climb_ramp_per_pct, 1.0)
        } else if gradient_pct < -steep {
            self.paces.descending_min_km / self.paces.flat_min_km
        } else if gradient_pct < -moderate {
            (gradient_pct.abs() - moderate).mul_add(
                self.config.descent_ramp_per_pct,
                self.config.descent_ramp_base,
            )
        } else {
            1.0
        }
    }
}

/// Minetti multiplier for a gradient expressed as rise/run
///
/// Cost is `155.4i⁵ − 30.4i⁴ − 43.3i³ + 46.3i² + 19.5i + 3.6`, with `i`
/// clamped to ±0.5, relative to the flat cost of 3.6 J/(kg*m).
#[must_use]
pub fn minetti_factor(gradient: f64) -> f64 {
    if !gradient.is_finite() {
        return 1.0;
    }
    let i = gradient.clamp(-MINETTI_MAX_GRADIENT, MINETTI_MAX_GRADIENT);
    let cost = 155.4f64
        .mul_add(i, -30.4)
        .mul_add(i, -43.3)
        .mul_add(i, 46.3)
        .mul_add(i, 19.5)
        .mul_add(i, MINETTI_FLAT_COST)
        .max(MINETTI_MIN_COST);
    (cost / MINETTI_FLAT_COST).clamp(MINETTI_FACTOR_RANGE.0, MINETTI_FACTOR_RANGE.1)
}

fn sanitize_elevation(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite() && *v >= 0.0).unwrap_or(0.0)
}
