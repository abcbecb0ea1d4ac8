// ABOUTME: Fatigue pace multiplier by race progress
// ABOUTME: Reads the profile's decay curve normalised by its minimum, else a linear ramp
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pacer_core::models::PaceDecayCurve;

/// Converts progress through the race into a pace multiplier
///
/// Decay multipliers are relative to the athlete's fastest decile, so they are
/// divided by the curve's minimum before use: a fast start never produces a
/// factor below 1.0. Deciles missing from the curve use the linear fallback
/// `1 + (fatigue_factor − 1) × fraction`. The result is always at least 1.0.
#[derive(Debug, Clone, Copy)]
pub struct FatigueFactorModel<'a> {
    curve: Option<&'a PaceDecayCurve>,
    fatigue_factor: f64,
}

impl<'a> FatigueFactorModel<'a> {
    /// Create a model from an optional decay curve and a scalar fatigue factor
    #[must_use]
    pub const fn new(curve: Option<&'a PaceDecayCurve>, fatigue_factor: f64) -> Self {
        Self {
            curve,
            fatigue_factor,
        }
    }

    /// Multiplier at `distance_km` into a race of `total_distance_km`
    #[must_use]
    pub fn factor(&self, distance_km: f64, total_distance_km: f64) -> f64 {
        if !total_distance_km.is_finite() || total_distance_km <= 0.0 || !distance_km.is_finite()
        {
            return 1.0;
        }
        let fraction = (distance_km / total_distance_km).clamp(0.0, 1.0);

        let from_curve = self.curve.and_then(|curve| {
            let bucket = curve.get(PaceDecayCurve::bucket_index(fraction * 100.0))?;
            let minimum = curve.min_multiplier()?;
            Some(bucket / minimum)
        });

        let factor = from_curve
            .unwrap_or_else(|| (self.fatigue_factor - 1.0).mul_add(fraction, 1.0));

        if factor.is_finite() {
            factor.max(1.0)
        } else {
            1.0
        }
    }
}
