// ABOUTME: Profile aggregation configuration for historical activity weighting
// ABOUTME: Configures the recency half-life used when rebuilding performance profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pacer_core::constants::recency;
use serde::{Deserialize, Serialize};

/// Profile Aggregation Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Days after which an activity's influence halves
    pub half_life_days: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            half_life_days: recency::DEFAULT_HALF_LIFE_DAYS,
        }
    }
}
