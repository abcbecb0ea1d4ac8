// ABOUTME: In-memory repository implementing every collaborator trait
// ABOUTME: Sharded DashMap storage for activities, profiles and courses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{ActivityAnalysisSource, CourseSource, ProfileStore};
use async_trait::async_trait;
use dashmap::DashMap;
use pacer_core::errors::AppResult;
use pacer_core::models::{ActivityAnalysis, AthleteId, Course, PerformanceProfile, RaceId};
use std::sync::Arc;

/// In-memory implementation of all repository traits
///
/// Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    activities: Arc<DashMap<AthleteId, Vec<ActivityAnalysis>>>,
    profiles: Arc<DashMap<AthleteId, PerformanceProfile>>,
    courses: Arc<DashMap<RaceId, Course>>,
}

impl InMemoryRepository {
    /// Create an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an analyzed activity to an athlete's history
    pub fn add_activity(&self, athlete_id: AthleteId, activity: ActivityAnalysis) {
        self.activities.entry(athlete_id).or_default().push(activity);
    }

    /// Store a course under its race id
    pub fn add_course(&self, course: Course) {
        self.courses.insert(course.race_id, course);
    }

    /// Number of athletes with a stored profile
    #[must_use]
    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }
}

#[async_trait]
impl ActivityAnalysisSource for InMemoryRepository {
    async fn analyzed_activities(&self, athlete_id: AthleteId) -> AppResult<Vec<ActivityAnalysis>> {
        Ok(self
            .activities
            .get(&athlete_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }
}

#[async_trait]
impl ProfileStore for InMemoryRepository {
    async fn performance_profile(
        &self,
        athlete_id: AthleteId,
    ) -> AppResult<Option<PerformanceProfile>> {
        Ok(self
            .profiles
            .get(&athlete_id)
            .map(|entry| entry.value().clone()))
    }

    async fn save_performance_profile(
        &self,
        athlete_id: AthleteId,
        profile: PerformanceProfile,
    ) -> AppResult<()> {
        self.profiles.insert(athlete_id, profile);
        Ok(())
    }
}

#[async_trait]
impl CourseSource for InMemoryRepository {
    async fn course(&self, race_id: RaceId) -> AppResult<Option<Course>> {
        Ok(self.courses.get(&race_id).map(|entry| entry.value().clone()))
    }
}
