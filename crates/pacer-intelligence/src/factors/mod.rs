// ABOUTME: Pace multiplier models composed into every segment pace
// ABOUTME: Terrain, fatigue and nighttime factors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Progress-based fatigue multiplier
pub mod fatigue;
/// Clock-hour nighttime multiplier
pub mod nighttime;
/// Gradient-based terrain multiplier
pub mod terrain;

pub use fatigue::FatigueFactorModel;
pub use nighttime::NighttimeFactorModel;
pub use terrain::{minetti_factor, TerrainFactorModel, TerrainPaces};
