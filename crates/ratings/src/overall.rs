//! Composite overall rating (OVR) and the tier it falls into.

use enum_map::EnumMap;

use crate::{
    config::TierCutoffs,
    models::{SkillAxis, SkillVector, Tier},
    skills::to_score,
};

/// Weighted sum of the six axes, rounded to the nearest integer.
///
/// With weights summing to 1.0 the result never exceeds the largest axis, so no
/// extra clamping is involved beyond the usual 0-99 range.
pub fn overall_rating(skills: &SkillVector, weights: &EnumMap<SkillAxis, f64>) -> u8 {
    let weighted: f64 = skills
        .iter()
        .map(|(axis, score)| weights[axis] * f64::from(score))
        .sum();

    to_score(weighted)
}

/// Maps an overall rating onto a tier. Lower bounds are inclusive; anything
/// below the first cutoff, including negative input, is the lowest tier.
pub fn classify_tier(overall: i32, cutoffs: &TierCutoffs) -> Tier {
    if overall >= cutoffs.diamond {
        Tier::Diamond
    } else if overall >= cutoffs.platinum {
        Tier::Platinum
    } else if overall >= cutoffs.gold {
        Tier::Gold
    } else if overall >= cutoffs.silver {
        Tier::Silver
    } else {
        Tier::Bronze
    }
}
