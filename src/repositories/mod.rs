// ABOUTME: Collaborator contracts for activity history, profile storage and course lookup
// ABOUTME: Async repository traits plus an in-memory implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Repository traits consumed by [`crate::service::PacingService`]
//!
//! The engine itself performs no I/O. These traits describe what the
//! surrounding service must supply; implementations own any transactional
//! discipline around profile writes.

/// `DashMap`-backed repository for tests and embedding
pub mod in_memory;

pub use in_memory::InMemoryRepository;

use async_trait::async_trait;
use pacer_core::errors::AppResult;
use pacer_core::models::{ActivityAnalysis, AthleteId, Course, PerformanceProfile, RaceId};

/// Source of already-summarized activity history
#[async_trait]
pub trait ActivityAnalysisSource: Send + Sync {
    /// All analyzed activities for an athlete; empty when there are none
    async fn analyzed_activities(&self, athlete_id: AthleteId) -> AppResult<Vec<ActivityAnalysis>>;
}

/// Durable store for one performance profile per athlete
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// The athlete's current profile, if one was ever saved
    async fn performance_profile(&self, athlete_id: AthleteId)
        -> AppResult<Option<PerformanceProfile>>;

    /// Replace the athlete's profile wholesale
    async fn save_performance_profile(
        &self,
        athlete_id: AthleteId,
        profile: PerformanceProfile,
    ) -> AppResult<()>;
}

/// Lookup of race courses
#[async_trait]
pub trait CourseSource: Send + Sync {
    /// The course of a race, if it exists
    async fn course(&self, race_id: RaceId) -> AppResult<Option<Course>>;
}
