//! Single entry point shared by every call site (live sync, weekly snapshot,
//! route analysis, race ingestion, leaderboard). Holding one [`RatingConfig`]
//! here keeps all of them on the same constants.

use rayon::prelude::*;
use tracing::debug;

use crate::{
    badges::evaluate_badges,
    config::RatingConfig,
    errors::ConfigError,
    filter::eligible_activities,
    models::{
        ActivityRecord, DifficultyResult, FederationTier, RaceFinish, RaceOutcome, RiderRating,
        RouteProfile, ScoredFinish, SkillVector, StandingEntry, Tier,
    },
    overall::{classify_tier, overall_rating},
    race::{career_standings, placement_score, race_points, score_race},
    route_difficulty::{difficulty_from_totals, route_difficulty},
    skills::skill_vector,
};

#[derive(Debug, Clone, Default)]
pub struct RatingEngine {
    config: RatingConfig,
}

impl RatingEngine {
    pub fn new(config: RatingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    /// Skill vector from raw records; non-ride kinds are dropped first.
    pub fn skills(&self, activities: &[ActivityRecord]) -> SkillVector {
        let rides = eligible_activities(activities, &self.config.activities);
        skill_vector(&rides, &self.config.skills)
    }

    pub fn overall(&self, skills: &SkillVector) -> u8 {
        overall_rating(skills, &self.config.weights)
    }

    pub fn tier(&self, overall: i32) -> Tier {
        classify_tier(overall, &self.config.tiers)
    }

    /// Full rating bundle for one rider.
    pub fn rate_rider(&self, activities: &[ActivityRecord]) -> RiderRating {
        let rides = eligible_activities(activities, &self.config.activities);
        let skills = skill_vector(&rides, &self.config.skills);
        let overall = self.overall(&skills);
        let tier = self.tier(i32::from(overall));
        let badges = evaluate_badges(&skills, &self.config.badges);

        debug!(
            "rated {} rides: overall {} ({}), {} badges",
            rides.len(),
            overall,
            tier,
            badges.len()
        );

        RiderRating {
            skills,
            overall,
            tier,
            badges,
            rides_considered: rides.len(),
        }
    }

    /// Rates many riders in parallel. Output order matches input order.
    pub fn rate_riders<B>(&self, batches: &[B]) -> Vec<RiderRating>
    where
        B: AsRef<[ActivityRecord]> + Sync,
    {
        batches
            .par_iter()
            .map(|activities| self.rate_rider(activities.as_ref()))
            .collect()
    }

    pub fn route_difficulty(&self, profile: &RouteProfile, wind_kmh: Option<f64>) -> DifficultyResult {
        route_difficulty(profile, wind_kmh, &self.config.route)
    }

    pub fn difficulty_from_totals(
        &self,
        gain_m: f64,
        distance_km: f64,
        wind_kmh: Option<f64>,
    ) -> DifficultyResult {
        difficulty_from_totals(gain_m, distance_km, wind_kmh, &self.config.route)
    }

    pub fn placement_score(&self, outcome: &RaceOutcome) -> u8 {
        placement_score(outcome, &self.config.race)
    }

    pub fn race_points(&self, outcome: &RaceOutcome) -> f64 {
        race_points(
            outcome.position,
            outcome.field_size,
            outcome.federation,
            &self.config.race,
        )
    }

    pub fn score_race(&self, finishes: &[RaceFinish], federation: FederationTier) -> Vec<ScoredFinish> {
        score_race(finishes, federation, &self.config.race)
    }

    pub fn career_standings(&self, results: &[ScoredFinish]) -> Vec<StandingEntry> {
        career_standings(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use uuid::Uuid;

    fn ride(kind: &str, distance_m: f64, gain_m: f64) -> ActivityRecord {
        ActivityRecord {
            id: Uuid::new_v4(),
            kind: kind.to_string(),
            distance_m,
            moving_time_s: 7200.0,
            elapsed_time_s: 7600.0,
            elevation_gain_m: gain_m,
            average_speed_mps: 8.0,
            max_speed_mps: 15.0,
            average_power_w: Some(230.0),
            started_at: datetime!(2025-07-12 06:45 UTC),
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = RatingConfig::default();
        config.tiers.gold = 10;
        assert!(RatingEngine::new(config).is_err());
    }

    #[test]
    fn test_empty_rider() {
        let engine = RatingEngine::default();
        let rating = engine.rate_rider(&[]);

        assert_eq!(rating.skills, SkillVector::default());
        assert_eq!(rating.overall, 0);
        assert_eq!(rating.tier, Tier::Bronze);
        assert!(rating.badges.is_empty());
        assert_eq!(rating.rides_considered, 0);
    }

    #[test]
    fn test_non_ride_kinds_behave_as_empty() {
        let engine = RatingEngine::default();
        let runs = vec![ride("run", 20_000.0, 100.0), ride("walk", 5_000.0, 10.0)];

        assert_eq!(engine.rate_rider(&runs), engine.rate_rider(&[]));
    }

    #[test]
    fn test_rate_rider_matches_component_calls() {
        let engine = RatingEngine::default();
        let rides = vec![
            ride("ride", 80_000.0, 900.0),
            ride("ride", 120_000.0, 1_800.0),
            ride("run", 10_000.0, 50.0),
            ride("ride", 60_000.0, 400.0),
        ];

        let rating = engine.rate_rider(&rides);
        let skills = engine.skills(&rides);

        assert_eq!(rating.rides_considered, 3);
        assert_eq!(rating.skills, skills);
        assert_eq!(rating.overall, engine.overall(&skills));
        assert_eq!(rating.tier, engine.tier(i32::from(rating.overall)));
        assert!(rating.badges.len() <= 3);
    }

    #[test]
    fn test_rate_riders_preserves_order() {
        let engine = RatingEngine::default();
        let batches = vec![
            vec![ride("ride", 30_000.0, 100.0)],
            vec![],
            vec![ride("ride", 190_000.0, 3_000.0)],
        ];

        let ratings = engine.rate_riders(&batches);

        assert_eq!(ratings.len(), 3);
        for (batch, rating) in batches.iter().zip(&ratings) {
            assert_eq!(*rating, engine.rate_rider(batch));
        }
    }

    #[test]
    fn test_outcome_helpers_share_config() {
        let engine = RatingEngine::default();
        let outcome = RaceOutcome {
            position: 2,
            finish_time_s: 3700.0,
            field_size: 4,
            best_time_s: 3600.0,
            federation: FederationTier::International,
        };

        assert_eq!(
            engine.placement_score(&outcome),
            placement_score(&outcome, &engine.config().race)
        );
        assert!((engine.race_points(&outcome) - 112.5).abs() < 1e-9);
    }
}
