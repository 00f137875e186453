//! Route Difficulty Index (RDI): a 0-10 score for a planned route.
//!
//! Three additive terms, each a square-root saturation curve over a normalized
//! ratio so that it approaches its cap slowly:
//!
//! ```text
//! 7.0 * sqrt(min(1, gain / 4500 m))
//! + 2.5 * sqrt(min(1, distance / 200 km))
//! + 0.5 * sqrt(min(1, wind / 50 km/h))
//! ```

use crate::{
    config::RouteDifficultyConfig,
    models::{DifficultyLabel, DifficultyResult, RouteProfile},
};

/// Scores a parsed route. Missing weather data means `wind_kmh` is `None` and
/// the wind term contributes nothing.
pub fn route_difficulty(
    profile: &RouteProfile,
    wind_kmh: Option<f64>,
    config: &RouteDifficultyConfig,
) -> DifficultyResult {
    difficulty_from_totals(
        profile.elevation_gain_m(),
        profile.total_distance_km(),
        wind_kmh,
        config,
    )
}

/// Scores a route from its totals.
pub fn difficulty_from_totals(
    gain_m: f64,
    distance_km: f64,
    wind_kmh: Option<f64>,
    config: &RouteDifficultyConfig,
) -> DifficultyResult {
    let raw = config.gain_weight * saturation(gain_m, config.gain_reference_m)
        + config.distance_weight * saturation(distance_km, config.distance_reference_km)
        + config.wind_weight * saturation(wind_kmh.unwrap_or(0.0), config.wind_reference_kmh);

    let score = round_to_step(raw, config.rounding_step).min(config.max_score);

    DifficultyResult {
        score,
        label: difficulty_label(score, config),
    }
}

pub fn difficulty_label(score: f64, config: &RouteDifficultyConfig) -> DifficultyLabel {
    if score <= config.easy_max {
        DifficultyLabel::Easy
    } else if score <= config.moderate_max {
        DifficultyLabel::Moderate
    } else if score <= config.hard_max {
        DifficultyLabel::Hard
    } else {
        DifficultyLabel::Extreme
    }
}

/// `sqrt(min(1, value / reference))`. NaN and non-positive values give 0,
/// positive infinity saturates at 1.
fn saturation(value: f64, reference: f64) -> f64 {
    if value.is_nan() || value <= 0.0 {
        return 0.0;
    }
    (value / reference).min(1.0).sqrt()
}

fn round_to_step(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}
