pub mod badges;
pub mod config;
pub mod engine;
pub mod errors;
pub mod filter;
pub mod models;
pub mod overall;
pub mod race;
pub mod route_difficulty;
pub mod route_profile;
pub mod skills;

pub use config::RatingConfig;
pub use engine::RatingEngine;
pub use errors::{ConfigError, RouteError};
pub use models::{
    ActivityRecord, BadgeId, DifficultyLabel, DifficultyResult, FederationTier, RaceEntrant,
    RaceFinish, RaceOutcome, RiderRating, RouteProfile, ScoredFinish, SkillAxis, SkillVector,
    StandingEntry, Tier,
};
