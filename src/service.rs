// ABOUTME: Pacing service wiring repositories to the profile aggregator and predictor
// ABOUTME: Rebuilds and stores athlete profiles and predicts race arrivals by id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::repositories::{ActivityAnalysisSource, CourseSource, ProfileStore};
use chrono::Utc;
use pacer_core::errors::{AppError, AppResult};
use pacer_core::models::{AthleteId, PerformanceProfile, PlanOptions, RaceId, RacePrediction};
use pacer_intelligence::{PredictionConfig, ProfileAggregator, SegmentPredictor};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Service facade over the prediction engine
///
/// Fetches inputs from the repository, runs the pure engine, and writes
/// rebuilt profiles back. Upstream failures surface as [`AppError`].
pub struct PacingService<R> {
    repository: Arc<R>,
    config: PredictionConfig,
}

impl<R> PacingService<R>
where
    R: ActivityAnalysisSource + ProfileStore + CourseSource,
{
    /// Create a service over `repository` with an explicit configuration
    #[must_use]
    pub const fn new(repository: Arc<R>, config: PredictionConfig) -> Self {
        Self { repository, config }
    }

    /// Create a service configured from `PACER_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if an override does not parse or fails validation
    pub fn from_env(repository: Arc<R>) -> AppResult<Self> {
        Ok(Self::new(repository, PredictionConfig::load()?))
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &PredictionConfig {
        &self.config
    }

    /// Rebuild an athlete's profile from their full history and store it
    ///
    /// # Errors
    ///
    /// Returns an error if the activity source or the profile store fails
    #[instrument(skip(self), fields(athlete_id = %athlete_id))]
    pub async fn rebuild_profile(&self, athlete_id: AthleteId) -> AppResult<PerformanceProfile> {
        let activities = self.repository.analyzed_activities(athlete_id).await?;
        let profile =
            ProfileAggregator::new(&self.config.profile).aggregate(&activities, Utc::now());

        self.repository
            .save_performance_profile(athlete_id, profile.clone())
            .await?;

        info!(
            activities = profile.activities_analyzed,
            distance_rows = profile.distance_pace_table.len(),
            "Performance profile rebuilt"
        );
        Ok(profile)
    }

    /// Predict arrivals for a race using the athlete's stored profile
    ///
    /// An athlete without a profile gets a prediction from default paces.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the race does not exist, or the
    /// repository's error if a lookup fails
    #[instrument(skip(self, plan), fields(athlete_id = %athlete_id, race_id = %race_id))]
    pub async fn predict_race(
        &self,
        athlete_id: AthleteId,
        race_id: RaceId,
        plan: &PlanOptions,
    ) -> AppResult<RacePrediction> {
        let course = self
            .repository
            .course(race_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Race course").with_resource_id(race_id.to_string())
            })?;

        let profile = if let Some(profile) = self.repository.performance_profile(athlete_id).await?
        {
            profile
        } else {
            warn!("No performance profile stored, predicting from defaults");
            PerformanceProfile::empty(Utc::now())
        };

        let prediction = SegmentPredictor::new(&self.config).predict(&course, &profile, plan);
        info!(
            total_minutes = prediction.total_minutes,
            worst_status = %prediction.worst_status(),
            "Race prediction complete"
        );
        Ok(prediction)
    }
}
