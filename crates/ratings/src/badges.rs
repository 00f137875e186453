//! Achievement badges evaluated from the current skill vector.
//!
//! The catalog is a flat table of (badge, predicate) rules. Evaluation runs every
//! predicate, keeps the ones that pass, orders them by configured priority and
//! truncates to the award limit. Predicates see only the current vector.

use tracing::trace;

use crate::{
    config::BadgeRules,
    models::{BadgeId, MAX_BADGES, SkillVector},
};

type Predicate = fn(&SkillVector, &BadgeRules) -> bool;

/// One rule of the badge catalog.
pub struct BadgeRule {
    pub id: BadgeId,
    pub predicate: Predicate,
}

/// Every badge the engine knows about, in declaration order.
pub static CATALOG: &[BadgeRule] = &[
    BadgeRule {
        id: BadgeId::AllRounder,
        predicate: |v, r| v.min_axis() >= r.strong_threshold,
    },
    BadgeRule {
        id: BadgeId::MountainGoat,
        predicate: |v, r| v.climbing >= r.elite_threshold,
    },
    BadgeRule {
        id: BadgeId::Powerhouse,
        predicate: |v, r| v.power >= r.elite_threshold,
    },
    BadgeRule {
        id: BadgeId::Diesel,
        predicate: |v, r| v.endurance >= r.elite_threshold,
    },
    BadgeRule {
        id: BadgeId::SpeedDemon,
        predicate: |v, r| v.pace >= r.elite_threshold,
    },
    BadgeRule {
        id: BadgeId::Sprinter,
        predicate: |v, r| v.sprint >= r.elite_threshold,
    },
    BadgeRule {
        id: BadgeId::SmoothOperator,
        predicate: |v, r| v.technique >= r.elite_threshold,
    },
    BadgeRule {
        id: BadgeId::Puncheur,
        predicate: |v, r| v.sprint >= r.strong_threshold && v.power >= r.strong_threshold,
    },
    BadgeRule {
        id: BadgeId::Climber,
        predicate: |v, r| v.climbing >= r.strong_threshold,
    },
    BadgeRule {
        id: BadgeId::Rouleur,
        predicate: |v, r| v.pace >= r.strong_threshold && v.endurance >= r.strong_threshold,
    },
    BadgeRule {
        id: BadgeId::RisingStar,
        predicate: |v, r| v.min_axis() >= r.rising_threshold,
    },
];

/// Badges earned by `skills`, highest priority first, at most `rules.max_awarded`
/// and never more than three.
pub fn evaluate_badges(skills: &SkillVector, rules: &BadgeRules) -> Vec<BadgeId> {
    evaluate_catalog(CATALOG, skills, rules)
}

/// Evaluates an arbitrary rule table. Ties in priority keep table order.
pub fn evaluate_catalog(
    catalog: &[BadgeRule],
    skills: &SkillVector,
    rules: &BadgeRules,
) -> Vec<BadgeId> {
    let mut earned: Vec<BadgeId> = catalog
        .iter()
        .filter(|rule| (rule.predicate)(skills, rules))
        .map(|rule| rule.id)
        .collect();

    earned.sort_by_key(|id| rules.priorities[*id]);

    let limit = rules.max_awarded.min(MAX_BADGES);
    if earned.len() > limit {
        trace!("{} badges passed, keeping the top {}", earned.len(), limit);
        earned.truncate(limit);
    }

    earned
}
