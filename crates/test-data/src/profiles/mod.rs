//! Athletic performance profiles.
//!
//! Profiles define realistic speeds, grade factors and output for each kind of
//! activity. Generators use them to turn a planned ride into summary stats.

mod cyclist;
mod runner;

pub use cyclist::CyclistProfile;
pub use runner::RunnerProfile;

use rand_distr::{Distribution, Normal};

/// Trait for athletic performance profiles.
pub trait AthleteProfile: Send + Sync {
    /// Activity kind written to generated records ("ride", "run", ...).
    fn kind(&self) -> &'static str;

    /// Base speed on flat terrain in meters per second.
    fn base_speed_mps(&self) -> f64;

    /// Speed multiplier for a given grade (fraction, e.g. 0.05 = 5%).
    ///
    /// - < 1.0 means slower than base (uphill)
    /// - > 1.0 means faster than base (downhill)
    fn grade_factor(&self, grade: f64) -> f64;

    /// Day-to-day performance variance as a coefficient of variation.
    fn variance(&self) -> f64;

    /// Peak speed over average speed on a typical outing.
    fn surge_ratio(&self) -> f64 {
        1.5
    }

    /// Power the athlete can hold for a long effort, if the sport measures it.
    fn sustained_power_w(&self) -> Option<f64> {
        None
    }
}

/// Speed for a grade after applying a sampled variance factor.
pub fn speed_at_grade(profile: &dyn AthleteProfile, grade: f64, variance_factor: f64) -> f64 {
    let target = profile.base_speed_mps() * profile.grade_factor(grade);

    // Floor keeps durations finite on steep ramps
    (target * variance_factor).max(0.5)
}

/// Samples a variance factor around 1.0 from the profile's day-to-day spread.
pub fn sample_variance(profile: &dyn AthleteProfile, rng: &mut impl rand::Rng) -> f64 {
    let std_dev = profile.variance();
    if std_dev <= 0.0 {
        return 1.0;
    }

    match Normal::new(1.0, std_dev) {
        Ok(normal) => normal.sample(rng).clamp(0.7, 1.4),
        Err(_) => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_speed_floor() {
        let profile = CyclistProfile::recreational();
        let speed = speed_at_grade(&profile, 0.30, 0.7);
        assert!(speed >= 0.5);
    }

    #[test]
    fn test_variance_is_bounded() {
        let profile = RunnerProfile::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let v = sample_variance(&profile, &mut rng);
            assert!((0.7..=1.4).contains(&v));
        }
    }
}
