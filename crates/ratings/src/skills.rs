//! The six skill axis calculators.
//!
//! Every calculator takes the already filtered ride list and returns a 0-99
//! integer. An empty list scores 0 on every axis. Records that would divide by
//! zero (no distance, no elapsed time, no average speed) are excluded from the
//! axis that needs them instead of failing the whole batch.

use tracing::{debug, trace};

use crate::{
    config::SkillReferences,
    models::{ActivityRecord, MAX_SCORE, SkillVector},
};

/// Computes all six axes from one batch of rides.
pub fn skill_vector(rides: &[&ActivityRecord], refs: &SkillReferences) -> SkillVector {
    SkillVector {
        pace: pace_score(rides, refs),
        endurance: endurance_score(rides, refs),
        climbing: climbing_score(rides, refs),
        power: power_score(rides, refs),
        sprint: sprint_score(rides, refs),
        technique: technique_score(rides, refs),
    }
}

/// Grade-adjusted average speed in km/h, averaged across rides.
pub fn pace_score(rides: &[&ActivityRecord], refs: &SkillReferences) -> u8 {
    let adjusted: Vec<f64> = rides
        .iter()
        .filter(|r| has_distance(r) && r.average_speed_mps.is_finite())
        .map(|r| {
            let gradient_pct = non_negative(r.elevation_gain_m) / r.distance_km();
            r.average_speed_kmh().max(0.0) * (1.0 + gradient_pct / 100.0)
        })
        .collect();

    match mean(&adjusted) {
        Some(avg) => to_score(avg.min(refs.pace_cap)),
        None => 0,
    }
}

/// Longest single ride, scaled against the reference distance.
pub fn endurance_score(rides: &[&ActivityRecord], refs: &SkillReferences) -> u8 {
    let longest_km = rides
        .iter()
        .filter(|r| has_distance(r))
        .map(|r| r.distance_km())
        .fold(0.0_f64, f64::max);

    to_score(scaled(longest_km, refs.endurance_reference_km))
}

/// Total elevation gain, scaled against the reference total.
pub fn climbing_score(rides: &[&ActivityRecord], refs: &SkillReferences) -> u8 {
    let total_gain: f64 = rides
        .iter()
        .map(|r| non_negative(r.elevation_gain_m))
        .sum();

    to_score(scaled(total_gain, refs.climbing_reference_m))
}

/// Measured power when enough rides carry it, otherwise a physics estimate
/// multiplied by `estimated_power_damping`.
pub fn power_score(rides: &[&ActivityRecord], refs: &SkillReferences) -> u8 {
    let mut measured: Vec<f64> = rides.iter().filter_map(|r| r.measured_power()).collect();

    if measured.len() >= refs.min_measured_power_rides {
        measured.sort_by(|a, b| b.total_cmp(a));
        let top_n = top_count(measured.len(), refs.power_top_fraction);
        let top_avg = mean(&measured[..top_n]).unwrap_or(0.0);

        debug!(
            "power from {} measured rides, top {} average {:.1} W",
            measured.len(),
            top_n,
            top_avg
        );
        return to_score(scaled(top_avg, refs.power_reference_w));
    }

    let estimates: Vec<f64> = rides
        .iter()
        .filter(|r| has_distance(r) && r.average_speed_mps.is_finite())
        .map(|r| estimated_power(r, refs))
        .collect();

    let Some(avg_estimate) = mean(&estimates) else {
        return 0;
    };

    debug!(
        "power estimated from {} rides ({} measured, {} required): {:.1} W",
        estimates.len(),
        measured.len(),
        refs.min_measured_power_rides,
        avg_estimate
    );
    to_score(scaled(avg_estimate, refs.power_reference_w) * refs.estimated_power_damping)
}

/// Physics estimate of average power for one ride: flat resistance plus climbing work.
pub fn estimated_power(ride: &ActivityRecord, refs: &SkillReferences) -> f64 {
    let speed = ride.average_speed_mps.max(0.0);
    let grade = non_negative(ride.elevation_gain_m) / ride.distance_m;

    let flat_power = refs.drag_factor * speed * speed;
    let climb_power = refs.rider_mass_kg * refs.gravity_mps2 * grade * speed;

    flat_power + climb_power
}

/// Explosivity: capped max speed over average speed, averaged across rides.
pub fn sprint_score(rides: &[&ActivityRecord], refs: &SkillReferences) -> u8 {
    let ratios: Vec<f64> = rides
        .iter()
        .filter(|r| r.average_speed_mps.is_finite() && r.average_speed_mps > 0.0)
        .map(|r| {
            let capped_max = non_negative(r.max_speed_kmh()).min(refs.sprint_speed_cap_kmh);
            let ratio = capped_max / r.average_speed_kmh();
            if ratio > 1.0 { ratio } else { 0.0 }
        })
        .collect();

    match mean(&ratios) {
        Some(avg) => to_score(scaled(avg, refs.sprint_reference_ratio)),
        None => 0,
    }
}

/// Blend of time efficiency (moving / elapsed) and speed consistency across rides.
pub fn technique_score(rides: &[&ActivityRecord], refs: &SkillReferences) -> u8 {
    let usable: Vec<&&ActivityRecord> = rides
        .iter()
        .filter(|r| {
            r.elapsed_time_s.is_finite()
                && r.elapsed_time_s > 0.0
                && r.moving_time_s.is_finite()
                && r.average_speed_mps.is_finite()
        })
        .collect();

    if usable.len() < rides.len() {
        trace!(
            "technique excluded {} rides without elapsed time",
            rides.len() - usable.len()
        );
    }

    let efficiencies: Vec<f64> = usable
        .iter()
        .map(|r| (r.moving_time_s / r.elapsed_time_s).clamp(0.0, 1.0))
        .collect();
    let Some(efficiency) = mean(&efficiencies) else {
        return 0;
    };

    let speeds: Vec<f64> = usable.iter().map(|r| r.average_speed_mps.max(0.0)).collect();
    let consistency = match coefficient_of_variation(&speeds) {
        Some(cv) => (1.0 - cv).clamp(0.0, 1.0),
        None => 0.0,
    };

    let combined = refs.efficiency_weight * efficiency + refs.consistency_weight * consistency;
    to_score(scaled(combined, refs.technique_reference))
}

/// Number of entries in the top `fraction` of `n`, never fewer than one.
fn top_count(n: usize, fraction: f64) -> usize {
    let count = (n as f64 * fraction).floor() as usize;
    count.clamp(1, n.max(1))
}

fn has_distance(ride: &ActivityRecord) -> bool {
    ride.distance_m.is_finite() && ride.distance_m > 0.0
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

fn scaled(value: f64, reference: f64) -> f64 {
    value / reference * f64::from(MAX_SCORE)
}

/// Divides before summing so finite inputs cannot overflow to infinity.
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    Some(values.iter().map(|v| v / n).sum())
}

/// Population standard deviation over the mean. `None` when the mean is not positive.
fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    if avg <= 0.0 {
        return None;
    }
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt() / avg)
}

/// Rounds to the nearest integer and clamps into 0-99. NaN scores 0 and
/// positive infinity saturates at 99.
pub(crate) fn to_score(value: f64) -> u8 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    value.round().min(f64::from(MAX_SCORE)) as u8
}
