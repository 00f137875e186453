use std::fmt;

use enum_map::Enum;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// One completed activity as delivered by the telemetry sync collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: Uuid,
    /// Provider activity kind, e.g. "ride", "run", "virtualride".
    pub kind: String,
    pub distance_m: f64,
    pub moving_time_s: f64,
    /// Wall-clock duration including pauses; never less than `moving_time_s`.
    pub elapsed_time_s: f64,
    pub elevation_gain_m: f64,
    pub average_speed_mps: f64,
    pub max_speed_mps: f64,
    /// Measured average power. `None` when no power meter was used.
    #[serde(default)]
    pub average_power_w: Option<f64>,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
}

impl ActivityRecord {
    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }

    pub fn average_speed_kmh(&self) -> f64 {
        self.average_speed_mps * 3.6
    }

    pub fn max_speed_kmh(&self) -> f64 {
        self.max_speed_mps * 3.6
    }

    /// Power value usable by the measured-power branch.
    pub fn measured_power(&self) -> Option<f64> {
        self.average_power_w.filter(|p| p.is_finite() && *p > 0.0)
    }
}

/// The six skill axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillAxis {
    Pace,
    Endurance,
    Climbing,
    Power,
    Sprint,
    Technique,
}

impl SkillAxis {
    pub const ALL: [SkillAxis; 6] = [
        SkillAxis::Pace,
        SkillAxis::Endurance,
        SkillAxis::Climbing,
        SkillAxis::Power,
        SkillAxis::Sprint,
        SkillAxis::Technique,
    ];

    /// Three-letter card abbreviation.
    pub fn code(&self) -> &'static str {
        match self {
            SkillAxis::Pace => "PAC",
            SkillAxis::Endurance => "END",
            SkillAxis::Climbing => "MON",
            SkillAxis::Power => "RES",
            SkillAxis::Sprint => "SPR",
            SkillAxis::Technique => "VAL",
        }
    }
}

impl fmt::Display for SkillAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Six 0-99 skill scores, always produced together from one activity batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillVector {
    pub pace: u8,
    pub endurance: u8,
    pub climbing: u8,
    pub power: u8,
    pub sprint: u8,
    pub technique: u8,
}

impl SkillVector {
    /// A vector with every axis set to `value` (capped at 99).
    pub fn uniform(value: u8) -> Self {
        let v = value.min(MAX_SCORE);
        Self {
            pace: v,
            endurance: v,
            climbing: v,
            power: v,
            sprint: v,
            technique: v,
        }
    }

    pub fn get(&self, axis: SkillAxis) -> u8 {
        match axis {
            SkillAxis::Pace => self.pace,
            SkillAxis::Endurance => self.endurance,
            SkillAxis::Climbing => self.climbing,
            SkillAxis::Power => self.power,
            SkillAxis::Sprint => self.sprint,
            SkillAxis::Technique => self.technique,
        }
    }

    /// Returns a copy with one axis replaced (capped at 99).
    pub fn with(mut self, axis: SkillAxis, value: u8) -> Self {
        let v = value.min(MAX_SCORE);
        match axis {
            SkillAxis::Pace => self.pace = v,
            SkillAxis::Endurance => self.endurance = v,
            SkillAxis::Climbing => self.climbing = v,
            SkillAxis::Power => self.power = v,
            SkillAxis::Sprint => self.sprint = v,
            SkillAxis::Technique => self.technique = v,
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillAxis, u8)> + '_ {
        SkillAxis::ALL.into_iter().map(|axis| (axis, self.get(axis)))
    }

    pub fn min_axis(&self) -> u8 {
        self.iter().map(|(_, v)| v).min().unwrap_or(0)
    }
}

/// Upper bound shared by every 0-99 score.
pub const MAX_SCORE: u8 = 99;

/// Hard limit on badges shown at once. `BadgeRules::max_awarded` may only lower it.
pub const MAX_BADGES: usize = 3;

/// Discrete rank bucket derived from the overall rating, lowest first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Enum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::Bronze,
        Tier::Silver,
        Tier::Gold,
        Tier::Platinum,
        Tier::Diamond,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Bronze => "bronze",
            Tier::Silver => "silver",
            Tier::Gold => "gold",
            Tier::Platinum => "platinum",
            Tier::Diamond => "diamond",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifiers of every badge the engine can award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeId {
    AllRounder,
    MountainGoat,
    Powerhouse,
    Diesel,
    SpeedDemon,
    Sprinter,
    SmoothOperator,
    Climber,
    Rouleur,
    Puncheur,
    RisingStar,
}

impl BadgeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeId::AllRounder => "all_rounder",
            BadgeId::MountainGoat => "mountain_goat",
            BadgeId::Powerhouse => "powerhouse",
            BadgeId::Diesel => "diesel",
            BadgeId::SpeedDemon => "speed_demon",
            BadgeId::Sprinter => "sprinter",
            BadgeId::SmoothOperator => "smooth_operator",
            BadgeId::Climber => "climber",
            BadgeId::Rouleur => "rouleur",
            BadgeId::Puncheur => "puncheur",
            BadgeId::RisingStar => "rising_star",
        }
    }
}

impl fmt::Display for BadgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One point of a planned route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub lat: f64,
    pub lon: f64,
    pub elevation_m: Option<f64>,
    /// Distance from the route start to this point, in meters.
    pub cumulative_distance_m: f64,
}

/// Ordered points of a planned route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteProfile {
    pub points: Vec<RoutePoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLabel {
    Easy,
    Moderate,
    Hard,
    Extreme,
}

impl fmt::Display for DifficultyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DifficultyLabel::Easy => "easy",
            DifficultyLabel::Moderate => "moderate",
            DifficultyLabel::Hard => "hard",
            DifficultyLabel::Extreme => "extreme",
        };
        f.write_str(s)
    }
}

/// Route difficulty index result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyResult {
    /// 0-10 in steps of 0.5.
    pub score: f64,
    pub label: DifficultyLabel,
}

/// Prestige of the body sanctioning a race, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FederationTier {
    International,
    National,
    Regional,
}

impl FederationTier {
    pub const ALL: [FederationTier; 3] = [
        FederationTier::International,
        FederationTier::National,
        FederationTier::Regional,
    ];
}

/// Identity of a race finisher. Ghosts have no linked account yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RaceEntrant {
    pub rider_id: Option<Uuid>,
    pub name: String,
}

impl RaceEntrant {
    pub fn rider(rider_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            rider_id: Some(rider_id),
            name: name.into(),
        }
    }

    pub fn ghost(name: impl Into<String>) -> Self {
        Self {
            rider_id: None,
            name: name.into(),
        }
    }

    pub fn is_ghost(&self) -> bool {
        self.rider_id.is_none()
    }
}

/// One finisher line from a race result sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceFinish {
    pub entrant: RaceEntrant,
    /// 1-based finishing position.
    pub position: i32,
    pub finish_time_s: f64,
}

/// Race result tuple as consumed by the placement and points scorers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaceOutcome {
    pub position: i32,
    pub finish_time_s: f64,
    pub field_size: i32,
    pub best_time_s: f64,
    pub federation: FederationTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredFinish {
    pub entrant: RaceEntrant,
    pub position: i32,
    /// Placement-derived skill estimate, 0-99.
    #[serde(rename = "gen")]
    pub gen_score: u8,
    pub points: f64,
}

/// Cross-race career totals for one entrant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingEntry {
    pub rank: usize,
    pub entrant: RaceEntrant,
    pub total_points: f64,
    pub races: usize,
    pub wins: usize,
    pub best_gen: u8,
}

/// Everything the live sync and weekly snapshot call sites persist for a rider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiderRating {
    pub skills: SkillVector,
    pub overall: u8,
    pub tier: Tier,
    pub badges: Vec<BadgeId>,
    pub rides_considered: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_vector_get_and_with() {
        let v = SkillVector::default()
            .with(SkillAxis::Power, 80)
            .with(SkillAxis::Sprint, 200);

        assert_eq!(v.get(SkillAxis::Power), 80);
        assert_eq!(v.get(SkillAxis::Sprint), 99);
        assert_eq!(v.get(SkillAxis::Pace), 0);
        assert_eq!(v.min_axis(), 0);
    }

    #[test]
    fn test_uniform_caps_at_max() {
        let v = SkillVector::uniform(120);
        assert!(v.iter().all(|(_, s)| s == MAX_SCORE));
    }

    #[test]
    fn test_tier_ordering() {
        assert!(Tier::Bronze < Tier::Silver);
        assert!(Tier::Platinum < Tier::Diamond);
        assert_eq!(Tier::Gold.to_string(), "gold");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&BadgeId::MountainGoat).unwrap();
        assert_eq!(json, "\"mountain_goat\"");

        let axis: SkillAxis = serde_json::from_str("\"technique\"").unwrap();
        assert_eq!(axis, SkillAxis::Technique);
        assert_eq!(axis.code(), "VAL");
    }

    #[test]
    fn test_activity_record_roundtrips_timestamp() {
        let json = r#"{
            "id": "6f1c2d1e-0000-4000-8000-000000000001",
            "kind": "ride",
            "distance_m": 42000.0,
            "moving_time_s": 5400.0,
            "elapsed_time_s": 6000.0,
            "elevation_gain_m": 650.0,
            "average_speed_mps": 7.8,
            "max_speed_mps": 16.2,
            "started_at": "2025-06-01T07:30:00Z"
        }"#;

        let record: ActivityRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.average_power_w, None);
        assert!((record.distance_km() - 42.0).abs() < 1e-9);
        assert_eq!(record.started_at.year(), 2025);
    }
}
