//! Configuration types for synthetic data generation.

use rand::Rng;
use rand_distr::{Distribution, LogNormal, Normal};
use serde::{Deserialize, Serialize};

/// Geographic bounding box defined by southwest and northeast corners.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub const fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Returns a random point within the bounding box.
    pub fn random_point(&self, rng: &mut impl Rng) -> (f64, f64) {
        let lat = rng.gen_range(self.min_lat..self.max_lat);
        let lon = rng.gen_range(self.min_lon..self.max_lon);
        (lat, lon)
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }
}

/// Pre-defined riding regions.
#[derive(Debug, Clone, Copy)]
pub struct Region;

impl Region {
    /// French Alps around Annecy - long cols, big elevation totals.
    pub const ANNECY: BoundingBox = BoundingBox::new(45.7, 6.0, 46.1, 6.6);

    /// Flanders - flat and exposed, short punchy bergs.
    pub const FLANDERS: BoundingBox = BoundingBox::new(50.7, 3.4, 51.0, 4.0);

    /// Boulder, CO - foothills with mixed terrain.
    pub const BOULDER: BoundingBox = BoundingBox::new(39.9, -105.5, 40.1, -105.2);
}

/// Distribution of rider ability across a generated population.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum SkillDistribution {
    /// Equal probability across the ability range.
    Uniform,
    /// Normal distribution with specified mean and std deviation.
    Normal { mean: f64, std_dev: f64 },
    /// Heavy tail: few elite riders, many close to average.
    PowerLaw { alpha: f64 },
}

impl Default for SkillDistribution {
    fn default() -> Self {
        Self::power_law()
    }
}

impl SkillDistribution {
    pub fn power_law() -> Self {
        Self::PowerLaw { alpha: 2.0 }
    }

    /// Samples a time multiplier around 1.0.
    ///
    /// - < 1.0 = faster than average
    /// - > 1.0 = slower than average
    pub fn sample_factor(&self, rng: &mut impl Rng) -> f64 {
        match *self {
            SkillDistribution::Uniform => rng.gen_range(0.7..1.5),

            SkillDistribution::Normal { mean, std_dev } => match Normal::new(mean, std_dev) {
                Ok(normal) => normal.sample(rng).clamp(0.5, 2.0),
                Err(_) => mean.clamp(0.5, 2.0),
            },

            SkillDistribution::PowerLaw { alpha } => {
                // Log-normal with mean 1.0 approximates the tail
                let sigma = 0.4 / alpha.max(f64::EPSILON).sqrt();
                let mu = -0.5 * sigma * sigma;

                match LogNormal::new(mu, sigma) {
                    Ok(log_normal) => log_normal.sample(rng).clamp(0.5, 3.0),
                    Err(_) => 1.0,
                }
            }
        }
    }
}

/// Top-level knobs for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// RNG seed; identical seeds produce identical output.
    pub seed: u64,
    pub rider_count: usize,
    /// Activities per rider (inclusive range).
    pub activities_per_rider: (usize, usize),
    /// Share of non-ride activities mixed into each batch.
    pub cross_training_fraction: f64,
    /// Share of rides recorded with a power meter.
    pub power_meter_fraction: f64,
    pub skill_distribution: SkillDistribution,
    pub route_count: usize,
    pub race_count: usize,
    /// Field size per race (inclusive range).
    pub field_size: (usize, usize),
    /// Share of each race field without a linked account.
    pub ghost_fraction: f64,
    pub region: BoundingBox,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            rider_count: 25,
            activities_per_rider: (4, 30),
            cross_training_fraction: 0.15,
            power_meter_fraction: 0.5,
            skill_distribution: SkillDistribution::power_law(),
            route_count: 5,
            race_count: 4,
            field_size: (8, 60),
            ghost_fraction: 0.25,
            region: Region::ANNECY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_power_law_mean_near_one() {
        let mut rng = StdRng::seed_from_u64(12345);
        let distribution = SkillDistribution::power_law();

        let factors: Vec<f64> = (0..1000)
            .map(|_| distribution.sample_factor(&mut rng))
            .collect();

        let mean: f64 = factors.iter().sum::<f64>() / factors.len() as f64;
        let below_one = factors.iter().filter(|&&f| f < 1.0).count();

        assert!(mean > 0.8 && mean < 1.4, "Mean {mean} should be near 1.0");
        assert!(below_one > 100);
        assert!(below_one < 900);
    }

    #[test]
    fn test_factors_are_clamped() {
        let mut rng = StdRng::seed_from_u64(7);
        let distribution = SkillDistribution::Normal {
            mean: 1.0,
            std_dev: 5.0,
        };

        for _ in 0..500 {
            let f = distribution.sample_factor(&mut rng);
            assert!((0.5..=2.0).contains(&f));
        }
    }

    #[test]
    fn test_random_point_in_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let b = Region::FLANDERS;
        for _ in 0..100 {
            let (lat, lon) = b.random_point(&mut rng);
            assert!(lat >= b.min_lat && lat < b.max_lat);
            assert!(lon >= b.min_lon && lon < b.max_lon);
        }
    }
}
