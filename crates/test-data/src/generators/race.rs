//! Race result sheets with registered riders and ghost entrants.

use fake::{Fake, faker::name::en::Name};
use rand::{Rng, seq::SliceRandom};
use rand_distr::{Distribution, Normal};
use ratings::{FederationTier, RaceEntrant, RaceFinish};
use uuid::Uuid;

use crate::config::SkillDistribution;

#[derive(Debug, Clone)]
pub struct RaceGenConfig {
    pub skill_distribution: SkillDistribution,
    /// Share of the field without a linked account.
    pub ghost_fraction: f64,
    /// Probability that a finisher has no recorded time.
    pub missing_time_probability: f64,
    /// Coefficient of variation for race-day form.
    pub day_variance: f64,
    pub course_km: (f64, f64),
    /// Winning average speed on a neutral course.
    pub reference_speed_kmh: f64,
}

impl Default for RaceGenConfig {
    fn default() -> Self {
        Self {
            skill_distribution: SkillDistribution::power_law(),
            ghost_fraction: 0.25,
            missing_time_probability: 0.03,
            day_variance: 0.04,
            course_km: (20.0, 180.0),
            reference_speed_kmh: 40.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedRace {
    pub name: String,
    pub federation: FederationTier,
    pub finishes: Vec<RaceFinish>,
}

/// Generates finish sheets ordered by position.
pub struct RaceGenerator {
    config: RaceGenConfig,
}

impl RaceGenerator {
    pub fn new() -> Self {
        Self {
            config: RaceGenConfig::default(),
        }
    }

    pub fn with_config(config: RaceGenConfig) -> Self {
        Self { config }
    }

    /// A race with `field_size` finishers drawn from `riders` plus ghosts.
    ///
    /// If the pool is smaller than the registered share of the field, the
    /// remainder is filled with ghosts.
    pub fn generate(
        &self,
        name: &str,
        riders: &[(Uuid, String)],
        field_size: usize,
        rng: &mut impl Rng,
    ) -> GeneratedRace {
        let ghosts_wanted = (field_size as f64 * self.config.ghost_fraction).round() as usize;
        let registered = field_size.saturating_sub(ghosts_wanted).min(riders.len());

        let mut entrants: Vec<RaceEntrant> = riders
            .choose_multiple(rng, registered)
            .map(|(id, name)| RaceEntrant::rider(*id, name.clone()))
            .collect();
        while entrants.len() < field_size {
            let name: String = Name().fake_with_rng(rng);
            entrants.push(RaceEntrant::ghost(name));
        }

        let (lo, hi) = self.config.course_km;
        let course_km = rng.gen_range(lo..hi.max(lo + 1.0));
        let expected_s = course_km / self.config.reference_speed_kmh * 3600.0;

        let mut timed: Vec<(RaceEntrant, f64)> = entrants
            .into_iter()
            .map(|entrant| {
                let time = expected_s
                    * self.config.skill_distribution.sample_factor(rng)
                    * self.sample_form(rng);
                (entrant, time)
            })
            .collect();
        timed.sort_by(|a, b| a.1.total_cmp(&b.1));

        let finishes = timed
            .into_iter()
            .enumerate()
            .map(|(i, (entrant, time))| {
                let finish_time_s = if rng.r#gen::<f64>() < self.config.missing_time_probability {
                    0.0
                } else {
                    time
                };
                RaceFinish {
                    entrant,
                    position: i as i32 + 1,
                    finish_time_s,
                }
            })
            .collect();

        GeneratedRace {
            name: name.to_string(),
            federation: FederationTier::ALL[rng.gen_range(0..FederationTier::ALL.len())],
            finishes,
        }
    }

    fn sample_form(&self, rng: &mut impl Rng) -> f64 {
        match Normal::new(1.0, self.config.day_variance) {
            Ok(normal) => normal.sample(rng).clamp(0.9, 1.1),
            Err(_) => 1.0,
        }
    }
}

impl Default for RaceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn pool(n: usize) -> Vec<(Uuid, String)> {
        (0..n)
            .map(|i| (Uuid::from_u128(i as u128 + 1), format!("Rider {i}")))
            .collect()
    }

    #[test]
    fn test_positions_are_contiguous() {
        let race_gen = RaceGenerator::new();
        let mut rng = StdRng::seed_from_u64(12345);

        let race = race_gen.generate("Grand Prix", &pool(30), 20, &mut rng);

        assert_eq!(race.finishes.len(), 20);
        for (i, finish) in race.finishes.iter().enumerate() {
            assert_eq!(finish.position, i as i32 + 1);
        }
    }

    #[test]
    fn test_times_follow_positions() {
        let race_gen = RaceGenerator::with_config(RaceGenConfig {
            missing_time_probability: 0.0,
            ..Default::default()
        });
        let mut rng = StdRng::seed_from_u64(4);

        let race = race_gen.generate("Criterium", &pool(10), 15, &mut rng);
        assert!(
            race.finishes
                .windows(2)
                .all(|pair| pair[0].finish_time_s <= pair[1].finish_time_s)
        );
    }

    #[test]
    fn test_ghosts_fill_small_pool() {
        let race_gen = RaceGenerator::new();
        let mut rng = StdRng::seed_from_u64(8);

        let race = race_gen.generate("Open", &pool(2), 12, &mut rng);
        let registered = race.finishes.iter().filter(|f| !f.entrant.is_ghost()).count();

        assert_eq!(race.finishes.len(), 12);
        assert_eq!(registered, 2);
    }
}
