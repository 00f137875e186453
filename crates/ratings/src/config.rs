//! Shared configuration table for every calculator in the engine.
//!
//! All reference values, weights, caps and cutoffs live here so that the live
//! sync, weekly snapshot, race ingestion and leaderboard call sites cannot drift
//! apart. Calculators take a `&RatingConfig` and never inline their own
//! constants.

use std::path::Path;

use enum_map::{EnumMap, enum_map};
use serde::{Deserialize, Serialize};

use crate::{
    errors::ConfigError,
    models::{BadgeId, FederationTier, MAX_BADGES, SkillAxis, Tier},
};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    pub activities: ActivityFilterConfig,
    pub skills: SkillReferences,
    /// Composite weights, must sum to 1.0.
    pub weights: EnumMap<SkillAxis, f64>,
    pub tiers: TierCutoffs,
    pub badges: BadgeRules,
    pub route: RouteDifficultyConfig,
    pub race: RaceScoringConfig,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            activities: ActivityFilterConfig::default(),
            skills: SkillReferences::default(),
            weights: default_weights(),
            tiers: TierCutoffs::default(),
            badges: BadgeRules::default(),
            route: RouteDifficultyConfig::default(),
            race: RaceScoringConfig::default(),
        }
    }
}

fn default_weights() -> EnumMap<SkillAxis, f64> {
    enum_map! {
        SkillAxis::Power => 0.30,
        SkillAxis::Climbing => 0.20,
        SkillAxis::Pace => 0.15,
        SkillAxis::Endurance => 0.15,
        SkillAxis::Sprint => 0.10,
        SkillAxis::Technique => 0.10,
    }
}

impl RatingConfig {
    /// Parses a (possibly partial) JSON document on top of the defaults and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: RatingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weights.values().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::Invalid(
                "composite weights must be finite and non-negative".to_string(),
            ));
        }

        let sum: f64 = self.weights.values().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::Invalid(format!(
                "composite weights must sum to 1.0, got {sum}"
            )));
        }

        if self.activities.eligible_kinds.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one eligible activity kind is required".to_string(),
            ));
        }

        self.skills.validate()?;
        self.tiers.validate()?;
        self.badges.validate()?;
        self.route.validate()?;
        self.race.validate()?;

        Ok(())
    }
}

/// Which activity kinds feed the skill calculators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityFilterConfig {
    /// Matched case-insensitively against `ActivityRecord::kind`.
    pub eligible_kinds: Vec<String>,
}

impl Default for ActivityFilterConfig {
    fn default() -> Self {
        Self {
            eligible_kinds: vec!["ride".to_string()],
        }
    }
}

/// Reference values and physics constants for the six skill axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillReferences {
    /// Ceiling for the grade-adjusted average speed used as the pace score.
    pub pace_cap: f64,
    /// Longest-ride distance that maps to 99.
    pub endurance_reference_km: f64,
    /// Total elevation gain that maps to 99.
    pub climbing_reference_m: f64,
    /// Average power that maps to 99.
    pub power_reference_w: f64,
    /// Minimum rides with measured power before the measured branch is used.
    pub min_measured_power_rides: usize,
    /// Share of the best measured-power rides that are averaged.
    pub power_top_fraction: f64,
    /// Applied to physics-estimated power to reflect lower confidence.
    pub estimated_power_damping: f64,
    pub rider_mass_kg: f64,
    pub gravity_mps2: f64,
    /// Flat-road resistance factor: watts per (m/s)^2.
    pub drag_factor: f64,
    /// GPS spikes above this max speed are ignored.
    pub sprint_speed_cap_kmh: f64,
    /// Max/average speed ratio that maps to 99.
    pub sprint_reference_ratio: f64,
    /// Combined efficiency/consistency value that maps to 99.
    pub technique_reference: f64,
    pub efficiency_weight: f64,
    pub consistency_weight: f64,
}

impl Default for SkillReferences {
    fn default() -> Self {
        Self {
            pace_cap: 99.0,
            endurance_reference_km: 200.0,
            climbing_reference_m: 50_000.0,
            power_reference_w: 300.0,
            min_measured_power_rides: 3,
            power_top_fraction: 0.2,
            estimated_power_damping: 0.8,
            rider_mass_kg: 75.0,
            gravity_mps2: 9.81,
            drag_factor: 2.5,
            sprint_speed_cap_kmh: 80.0,
            sprint_reference_ratio: 2.0,
            technique_reference: 0.95,
            efficiency_weight: 0.7,
            consistency_weight: 0.3,
        }
    }
}

impl SkillReferences {
    fn validate(&self) -> Result<(), ConfigError> {
        let references = [
            ("pace_cap", self.pace_cap),
            ("endurance_reference_km", self.endurance_reference_km),
            ("climbing_reference_m", self.climbing_reference_m),
            ("power_reference_w", self.power_reference_w),
            ("rider_mass_kg", self.rider_mass_kg),
            ("gravity_mps2", self.gravity_mps2),
            ("drag_factor", self.drag_factor),
            ("sprint_speed_cap_kmh", self.sprint_speed_cap_kmh),
            ("sprint_reference_ratio", self.sprint_reference_ratio),
            ("technique_reference", self.technique_reference),
        ];
        for (name, value) in references {
            positive(name, value)?;
        }

        if !(self.power_top_fraction > 0.0 && self.power_top_fraction <= 1.0) {
            return Err(ConfigError::Invalid(
                "power_top_fraction must be in (0, 1]".to_string(),
            ));
        }
        if !(self.estimated_power_damping > 0.0 && self.estimated_power_damping <= 1.0) {
            return Err(ConfigError::Invalid(
                "estimated_power_damping must be in (0, 1]".to_string(),
            ));
        }
        if self.min_measured_power_rides == 0 {
            return Err(ConfigError::Invalid(
                "min_measured_power_rides must be at least 1".to_string(),
            ));
        }
        if (self.efficiency_weight + self.consistency_weight - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::Invalid(
                "technique efficiency and consistency weights must sum to 1.0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Lower bounds (inclusive) of every tier above the lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierCutoffs {
    pub silver: i32,
    pub gold: i32,
    pub platinum: i32,
    pub diamond: i32,
}

impl Default for TierCutoffs {
    fn default() -> Self {
        Self {
            silver: 50,
            gold: 65,
            platinum: 80,
            diamond: 90,
        }
    }
}

impl TierCutoffs {
    /// Inclusive lower bound of `tier`. The lowest tier starts at 0.
    pub fn lower_bound(&self, tier: Tier) -> i32 {
        match tier {
            Tier::Bronze => 0,
            Tier::Silver => self.silver,
            Tier::Gold => self.gold,
            Tier::Platinum => self.platinum,
            Tier::Diamond => self.diamond,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let ascending = 0 < self.silver
            && self.silver < self.gold
            && self.gold < self.platinum
            && self.platinum < self.diamond;
        if !ascending {
            return Err(ConfigError::Invalid(
                "tier cutoffs must be strictly ascending and above 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Thresholds and priorities for the badge catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BadgeRules {
    pub max_awarded: usize,
    /// Axis score for single-axis signature badges.
    pub elite_threshold: u8,
    /// Axis score for combination and all-round badges.
    pub strong_threshold: u8,
    /// Every-axis floor for the newcomer badge.
    pub rising_threshold: u8,
    /// Lower value wins when more badges pass than can be shown.
    pub priorities: EnumMap<BadgeId, u8>,
}

impl Default for BadgeRules {
    fn default() -> Self {
        Self {
            max_awarded: MAX_BADGES,
            elite_threshold: 85,
            strong_threshold: 70,
            rising_threshold: 40,
            priorities: enum_map! {
                BadgeId::AllRounder => 1,
                BadgeId::MountainGoat => 2,
                BadgeId::Powerhouse => 3,
                BadgeId::Diesel => 4,
                BadgeId::SpeedDemon => 5,
                BadgeId::Sprinter => 6,
                BadgeId::SmoothOperator => 7,
                BadgeId::Puncheur => 8,
                BadgeId::Climber => 9,
                BadgeId::Rouleur => 10,
                BadgeId::RisingStar => 11,
            },
        }
    }
}

impl BadgeRules {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_BADGES).contains(&self.max_awarded) {
            return Err(ConfigError::Invalid(format!(
                "max_awarded must be between 1 and {MAX_BADGES}, got {}",
                self.max_awarded
            )));
        }
        if !(self.rising_threshold <= self.strong_threshold
            && self.strong_threshold <= self.elite_threshold)
        {
            return Err(ConfigError::Invalid(
                "badge thresholds must satisfy rising <= strong <= elite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Saturation references and label bands for the route difficulty index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteDifficultyConfig {
    pub gain_reference_m: f64,
    pub distance_reference_km: f64,
    pub wind_reference_kmh: f64,
    pub gain_weight: f64,
    pub distance_weight: f64,
    pub wind_weight: f64,
    pub max_score: f64,
    /// Scores are rounded to the nearest multiple of this step.
    pub rounding_step: f64,
    pub easy_max: f64,
    pub moderate_max: f64,
    pub hard_max: f64,
}

impl Default for RouteDifficultyConfig {
    fn default() -> Self {
        Self {
            gain_reference_m: 4500.0,
            distance_reference_km: 200.0,
            wind_reference_kmh: 50.0,
            gain_weight: 7.0,
            distance_weight: 2.5,
            wind_weight: 0.5,
            max_score: 10.0,
            rounding_step: 0.5,
            easy_max: 3.0,
            moderate_max: 6.0,
            hard_max: 8.0,
        }
    }
}

impl RouteDifficultyConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("gain_reference_m", self.gain_reference_m)?;
        positive("distance_reference_km", self.distance_reference_km)?;
        positive("wind_reference_kmh", self.wind_reference_kmh)?;
        positive("max_score", self.max_score)?;
        positive("rounding_step", self.rounding_step)?;

        if !(self.easy_max < self.moderate_max && self.moderate_max < self.hard_max) {
            return Err(ConfigError::Invalid(
                "difficulty label bands must be strictly ascending".to_string(),
            ));
        }
        Ok(())
    }
}

/// Constants for placement (GEN) and points scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceScoringConfig {
    /// Position score of the winner.
    pub winner_position_score: f64,
    /// Position score of the last finisher.
    pub last_position_score: f64,
    pub points_base: f64,
    pub federation_coefficients: EnumMap<FederationTier, f64>,
}

impl Default for RaceScoringConfig {
    fn default() -> Self {
        Self {
            winner_position_score: 99.0,
            last_position_score: 30.0,
            points_base: 100.0,
            federation_coefficients: enum_map! {
                FederationTier::International => 1.5,
                FederationTier::National => 1.2,
                FederationTier::Regional => 1.0,
            },
        }
    }
}

impl RaceScoringConfig {
    pub fn coefficient(&self, federation: FederationTier) -> f64 {
        self.federation_coefficients[federation]
    }

    fn validate(&self) -> Result<(), ConfigError> {
        positive("points_base", self.points_base)?;

        if !(0.0..self.winner_position_score).contains(&self.last_position_score) {
            return Err(ConfigError::Invalid(
                "last_position_score must be in [0, winner_position_score)".to_string(),
            ));
        }

        let coefficients: Vec<f64> = FederationTier::ALL
            .iter()
            .map(|tier| self.coefficient(*tier))
            .collect();
        let ordered = coefficients.windows(2).all(|pair| pair[0] > pair[1]);
        if !ordered || coefficients.iter().any(|c| !c.is_finite() || *c <= 0.0) {
            return Err(ConfigError::Invalid(
                "federation coefficients must be positive and strictly decreasing by prestige"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RatingConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let sum: f64 = default_weights().values().sum();
        assert!((sum - 1.0).abs() < WEIGHT_SUM_TOLERANCE);
        assert!(default_weights()[SkillAxis::Power] > default_weights()[SkillAxis::Pace]);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = RatingConfig::from_json_str(r#"{ "tiers": { "diamond": 92 } }"#).unwrap();

        assert_eq!(config.tiers.diamond, 92);
        assert_eq!(config.tiers.silver, 50);
        assert_eq!(config.skills.power_reference_w, 300.0);
    }

    #[test]
    fn test_rejects_weights_not_summing_to_one() {
        let json = r#"{ "weights": {
            "pace": 0.2, "endurance": 0.2, "climbing": 0.2,
            "power": 0.2, "sprint": 0.2, "technique": 0.2
        } }"#;

        let err = RatingConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_unordered_tier_cutoffs() {
        let json = r#"{ "tiers": { "silver": 70, "gold": 65 } }"#;
        assert!(RatingConfig::from_json_str(json).is_err());
    }

    #[test]
    fn test_rejects_unordered_federation_coefficients() {
        let mut config = RatingConfig::default();
        config.race.federation_coefficients[FederationTier::Regional] = 2.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_badge_limit_cannot_exceed_three() {
        for json in [
            r#"{ "badges": { "max_awarded": 8 } }"#,
            r#"{ "badges": { "max_awarded": 0 } }"#,
        ] {
            let err = RatingConfig::from_json_str(json).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{json}");
        }

        let lowered =
            RatingConfig::from_json_str(r#"{ "badges": { "max_awarded": 1 } }"#).unwrap();
        assert_eq!(lowered.badges.max_awarded, 1);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = RatingConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_tier_lower_bounds() {
        let cutoffs = TierCutoffs::default();
        assert_eq!(cutoffs.lower_bound(Tier::Bronze), 0);
        assert_eq!(cutoffs.lower_bound(Tier::Gold), 65);
        assert_eq!(cutoffs.lower_bound(Tier::Diamond), 90);
    }
}
