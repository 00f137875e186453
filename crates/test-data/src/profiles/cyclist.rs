//! Cyclist profiles covering the rider archetypes the badge catalog rewards.

use super::AthleteProfile;

/// Athletic profile for road and gravel riding.
///
/// - Base speed: ~28 km/h on flat terrain
/// - Uphill: ~25% slower per 1% grade
/// - Downhill: ~15% faster per 1% grade
#[derive(Debug, Clone)]
pub struct CyclistProfile {
    /// Base speed in m/s on flat terrain.
    base_speed: f64,
    /// Coefficient of variation for day-to-day performance.
    variance: f64,
    /// Peak over average speed on a typical ride.
    surge_ratio: f64,
    /// Power held for a long effort.
    sustained_power: f64,
    /// Typical ride length in kilometers.
    pub typical_distance_km: f64,
    /// Typical average grade across a ride (gain / distance).
    pub typical_grade: f64,
}

impl Default for CyclistProfile {
    fn default() -> Self {
        Self {
            base_speed: 8.0, // ~28 km/h
            variance: 0.10,
            surge_ratio: 1.8,
            sustained_power: 200.0,
            typical_distance_km: 60.0,
            typical_grade: 0.010,
        }
    }
}

impl CyclistProfile {
    /// Profile with the given flat-road speed in km/h.
    pub fn with_speed(speed_kmh: f64) -> Self {
        Self {
            base_speed: speed_kmh / 3.6,
            ..Default::default()
        }
    }

    pub fn with_power(mut self, watts: f64) -> Self {
        self.sustained_power = watts;
        self
    }

    /// ~35 km/h, 300 W, long days.
    pub fn elite() -> Self {
        Self {
            surge_ratio: 2.0,
            typical_distance_km: 120.0,
            typical_grade: 0.012,
            ..Self::with_speed(35.0).with_power(300.0)
        }
    }

    /// ~22 km/h, short rides, little climbing.
    pub fn recreational() -> Self {
        Self {
            variance: 0.15,
            surge_ratio: 1.5,
            typical_distance_km: 30.0,
            typical_grade: 0.006,
            ..Self::with_speed(22.0).with_power(140.0)
        }
    }

    /// Light rider who seeks out mountains.
    pub fn climber() -> Self {
        Self {
            surge_ratio: 1.7,
            typical_distance_km: 90.0,
            typical_grade: 0.025,
            ..Self::with_speed(29.0).with_power(250.0)
        }
    }

    /// Explosive rider, short fast rides with big peaks.
    pub fn sprinter() -> Self {
        Self {
            surge_ratio: 2.4,
            typical_distance_km: 50.0,
            typical_grade: 0.005,
            ..Self::with_speed(32.0).with_power(260.0)
        }
    }

    /// Rough terrain, lower speeds, more variance.
    pub fn mountain_biker() -> Self {
        Self {
            base_speed: 5.0, // ~18 km/h
            variance: 0.15,
            surge_ratio: 2.2,
            sustained_power: 190.0,
            typical_distance_km: 35.0,
            typical_grade: 0.030,
        }
    }

    /// Scales speed and power by an ability multiplier (1.0 = unchanged).
    pub fn scaled(mut self, ability: f64) -> Self {
        self.base_speed *= ability;
        self.sustained_power *= ability;
        self
    }
}

impl AthleteProfile for CyclistProfile {
    fn kind(&self) -> &'static str {
        "ride"
    }

    fn base_speed_mps(&self) -> f64 {
        self.base_speed
    }

    fn grade_factor(&self, grade: f64) -> f64 {
        if grade >= 0.0 {
            // Floor at walking pace on very steep ramps
            (1.0 - grade * 25.0).max(0.15)
        } else {
            (1.0 - grade * 15.0).min(2.5)
        }
    }

    fn variance(&self) -> f64 {
        self.variance
    }

    fn surge_ratio(&self) -> f64 {
        self.surge_ratio
    }

    fn sustained_power_w(&self) -> Option<f64> {
        Some(self.sustained_power)
    }
}
