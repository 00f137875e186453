//! Rider populations with activity histories.

use fake::{Fake, faker::name::en::Name};
use rand::Rng;
use ratings::ActivityRecord;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use super::ride::{RideGenerator, RidePlan};
use crate::config::SkillDistribution;
use crate::profiles::{CyclistProfile, RunnerProfile};

/// Riding style a generated rider leans towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiderArchetype {
    Recreational,
    AllRounder,
    Climber,
    Sprinter,
    MountainBiker,
}

impl RiderArchetype {
    pub const ALL: [RiderArchetype; 5] = [
        RiderArchetype::Recreational,
        RiderArchetype::AllRounder,
        RiderArchetype::Climber,
        RiderArchetype::Sprinter,
        RiderArchetype::MountainBiker,
    ];

    pub fn profile(&self) -> CyclistProfile {
        match self {
            RiderArchetype::Recreational => CyclistProfile::recreational(),
            RiderArchetype::AllRounder => CyclistProfile::elite(),
            RiderArchetype::Climber => CyclistProfile::climber(),
            RiderArchetype::Sprinter => CyclistProfile::sprinter(),
            RiderArchetype::MountainBiker => CyclistProfile::mountain_biker(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedRider {
    pub id: Uuid,
    pub name: String,
    pub archetype: RiderArchetype,
    /// Multiplier on the archetype's speed and power.
    pub ability: f64,
    pub activities: Vec<ActivityRecord>,
}

/// Generates riders and their recent activity history.
pub struct RiderGenerator {
    rides: RideGenerator,
    skill_distribution: SkillDistribution,
    /// Share of activities that are runs instead of rides.
    cross_training_fraction: f64,
}

impl RiderGenerator {
    pub fn new(rides: RideGenerator, skill_distribution: SkillDistribution) -> Self {
        Self {
            rides,
            skill_distribution,
            cross_training_fraction: 0.15,
        }
    }

    pub fn with_cross_training(mut self, fraction: f64) -> Self {
        self.cross_training_fraction = fraction;
        self
    }

    /// One rider with `activity_count` activities, one every 1-4 days
    /// going back from `until`.
    pub fn generate(
        &self,
        activity_count: usize,
        until: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> GeneratedRider {
        let archetype = RiderArchetype::ALL[rng.gen_range(0..RiderArchetype::ALL.len())];
        // Skill factors are time multipliers; ability is their inverse.
        let ability = 1.0 / self.skill_distribution.sample_factor(rng);
        let profile = archetype.profile().scaled(ability);
        let runner = RunnerProfile::default();

        let mut started_at = until;
        let mut activities = Vec::with_capacity(activity_count);
        for _ in 0..activity_count {
            started_at -= Duration::hours(rng.gen_range(24..96));

            let record = if rng.r#gen::<f64>() < self.cross_training_fraction {
                let plan = RidePlan {
                    distance_km: rng.gen_range(5.0..21.0),
                    grade: rng.gen_range(0.0..0.02),
                };
                self.rides.generate(&runner, plan, started_at, rng)
            } else {
                let plan = self.rides.plan_for(&profile, rng);
                self.rides.generate(&profile, plan, started_at, rng)
            };
            activities.push(record);
        }

        GeneratedRider {
            id: Uuid::from_u128(rng.r#gen()),
            name: Name().fake_with_rng(rng),
            archetype,
            ability,
            activities,
        }
    }

    /// `count` riders, each with an activity count drawn from `activities`.
    pub fn generate_many(
        &self,
        count: usize,
        activities: (usize, usize),
        until: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedRider> {
        let (lo, hi) = activities;
        (0..count)
            .map(|_| {
                let n = rng.gen_range(lo..=hi.max(lo));
                self.generate(n, until, rng)
            })
            .collect()
    }
}

impl Default for RiderGenerator {
    fn default() -> Self {
        Self::new(RideGenerator::new(), SkillDistribution::default())
    }
}
