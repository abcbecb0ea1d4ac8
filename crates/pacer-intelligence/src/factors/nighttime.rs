// ABOUTME: Nighttime pace multiplier from the local clock hour
// ABOUTME: factor = 1 + slowdown inside the night window, 1 otherwise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::NighttimeConfig;
use chrono::{DateTime, TimeZone, Timelike};

/// Slows pace down between dusk and dawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NighttimeFactorModel {
    night_start_hour: u32,
    night_end_hour: u32,
}

impl NighttimeFactorModel {
    /// Create a model with the configured night window
    #[must_use]
    pub const fn new(config: &NighttimeConfig) -> Self {
        Self {
            night_start_hour: config.night_start_hour,
            night_end_hour: config.night_end_hour,
        }
    }

    /// Whether `hour` falls in `[start, 24)` or `[0, end)`
    #[must_use]
    pub const fn is_night(&self, hour: u32) -> bool {
        hour >= self.night_start_hour || hour < self.night_end_hour
    }

    /// Whether a point in time is at night, in its own offset
    #[must_use]
    pub fn is_night_at<Tz: TimeZone>(&self, time: &DateTime<Tz>) -> bool {
        self.is_night(time.hour())
    }

    /// Multiplier at `hour` with fractional slowdown `slowdown`
    ///
    /// A negative or non-finite slowdown is ignored.
    #[must_use]
    pub fn factor(&self, hour: u32, slowdown: f64) -> f64 {
        if !self.is_night(hour) || !slowdown.is_finite() || slowdown < 0.0 {
            return 1.0;
        }
        1.0 + slowdown
    }
}

impl Default for NighttimeFactorModel {
    fn default() -> Self {
        Self::new(&NighttimeConfig::default())
    }
}
