//! Runner profile, used for cross-training activities that the ratings engine
//! must ignore.

use super::AthleteProfile;

/// Base pace ~5:00/km, uphill ~15% slower per 1% grade.
#[derive(Debug, Clone)]
pub struct RunnerProfile {
    base_speed: f64,
    variance: f64,
}

impl Default for RunnerProfile {
    fn default() -> Self {
        Self {
            base_speed: 3.5, // ~5:00/km
            variance: 0.08,
        }
    }
}

impl AthleteProfile for RunnerProfile {
    fn kind(&self) -> &'static str {
        "run"
    }

    fn base_speed_mps(&self) -> f64 {
        self.base_speed
    }

    fn grade_factor(&self, grade: f64) -> f64 {
        if grade >= 0.0 {
            (1.0 - grade * 15.0).max(0.2)
        } else {
            (1.0 - grade * 8.0).min(1.5)
        }
    }

    fn variance(&self) -> f64 {
        self.variance
    }

    fn surge_ratio(&self) -> f64 {
        1.3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_are_not_rides() {
        let profile = RunnerProfile::default();
        assert_eq!(profile.kind(), "run");
        assert!(profile.surge_ratio() < 1.5);
    }

    #[test]
    fn test_grade_factors() {
        let profile = RunnerProfile::default();
        assert!((profile.grade_factor(0.0) - 1.0).abs() < 0.01);
        assert!(profile.grade_factor(0.05) < 1.0);
        assert!(profile.grade_factor(-0.05) > 1.0);
    }
}
