//! Activity summary generation from athlete profiles.

use rand::Rng;
use rand_distr::{Distribution, LogNormal};
use ratings::ActivityRecord;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::profiles::{self, AthleteProfile, CyclistProfile};

/// What a single outing covers before speeds are applied.
#[derive(Debug, Clone, Copy)]
pub struct RidePlan {
    pub distance_km: f64,
    /// Elevation gain over distance.
    pub grade: f64,
}

#[derive(Debug, Clone)]
pub struct RideGenConfig {
    /// Probability that a ride carries measured power.
    pub power_meter_fraction: f64,
    /// Log-normal sigma for ride length around the profile's typical distance.
    pub distance_spread: f64,
    /// Probability of a long stop (café, mechanical).
    pub pause_probability: f64,
    /// Stopped share of elapsed time when a long stop happens.
    pub pause_fraction_range: (f64, f64),
    /// Probability of a broken upload: zero distance or zero moving time.
    pub glitch_probability: f64,
}

impl Default for RideGenConfig {
    fn default() -> Self {
        Self {
            power_meter_fraction: 0.5,
            distance_spread: 0.35,
            pause_probability: 0.3,
            pause_fraction_range: (0.05, 0.25),
            glitch_probability: 0.0,
        }
    }
}

/// Generates [`ActivityRecord`]s.
pub struct RideGenerator {
    config: RideGenConfig,
}

impl RideGenerator {
    pub fn new() -> Self {
        Self {
            config: RideGenConfig::default(),
        }
    }

    pub fn with_config(config: RideGenConfig) -> Self {
        Self { config }
    }

    /// Samples a plan around the cyclist's typical distance and grade.
    pub fn plan_for(&self, profile: &CyclistProfile, rng: &mut impl Rng) -> RidePlan {
        let sigma = self.config.distance_spread.max(f64::EPSILON);
        let mu = profile.typical_distance_km.max(1.0).ln() - 0.5 * sigma * sigma;
        let distance_km = match LogNormal::new(mu, sigma) {
            Ok(d) => d.sample(rng).clamp(5.0, 320.0),
            Err(_) => profile.typical_distance_km,
        };

        RidePlan {
            distance_km,
            grade: profile.typical_grade * rng.gen_range(0.4..1.8),
        }
    }

    /// Builds a record for `plan` ridden by `profile`.
    ///
    /// The course is treated as half climbing at twice the average grade and
    /// half descending, which gives realistic gaps between flat speed and
    /// average speed on hilly days.
    pub fn generate(
        &self,
        profile: &dyn AthleteProfile,
        plan: RidePlan,
        started_at: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> ActivityRecord {
        let distance_m = plan.distance_km * 1000.0;
        let variance = profiles::sample_variance(profile, rng);

        let up = profiles::speed_at_grade(profile, plan.grade * 2.0, variance);
        let down = profiles::speed_at_grade(profile, -plan.grade * 2.0, variance);
        let moving_time_s = distance_m / 2.0 / up + distance_m / 2.0 / down;

        let elapsed_time_s = if rng.r#gen::<f64>() < self.config.pause_probability {
            let (lo, hi) = self.config.pause_fraction_range;
            moving_time_s / (1.0 - rng.gen_range(lo..hi))
        } else {
            moving_time_s * rng.gen_range(1.0..1.04)
        };

        let average_speed_mps = distance_m / moving_time_s;
        let max_speed_mps = average_speed_mps * profile.surge_ratio() * rng.gen_range(0.9..1.15);

        let average_power_w = profile
            .sustained_power_w()
            .filter(|_| rng.r#gen::<f64>() < self.config.power_meter_fraction)
            .map(|watts| watts * variance * rng.gen_range(0.85..1.05));

        let mut record = ActivityRecord {
            id: Uuid::from_u128(rng.r#gen()),
            kind: profile.kind().to_string(),
            distance_m,
            moving_time_s,
            elapsed_time_s,
            elevation_gain_m: distance_m * plan.grade,
            average_speed_mps,
            max_speed_mps,
            average_power_w,
            started_at,
        };

        if rng.r#gen::<f64>() < self.config.glitch_probability {
            glitch(&mut record, rng);
        }

        record
    }
}

impl Default for RideGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Corrupts a record the way broken uploads do.
fn glitch(record: &mut ActivityRecord, rng: &mut impl Rng) {
    match rng.gen_range(0..3) {
        0 => {
            record.distance_m = 0.0;
            record.average_speed_mps = 0.0;
        }
        1 => {
            record.moving_time_s = 0.0;
            record.elapsed_time_s = 0.0;
        }
        _ => {
            record.max_speed_mps = 250.0; // GPS spike
        }
    }
}
