//! Race result scoring: placement-derived GEN scores, points, and career standings.
//!
//! GEN depends only on the result tuple, so ghost entrants (no linked account)
//! are scored exactly like registered riders.

use std::{cmp::Ordering, collections::BTreeMap};

use tracing::debug;
use uuid::Uuid;

use crate::{
    config::RaceScoringConfig,
    models::{FederationTier, RaceEntrant, RaceFinish, RaceOutcome, ScoredFinish, StandingEntry},
    skills::to_score,
};

/// Position component of GEN: the winner gets `winner_position_score`, last place
/// gets `last_position_score`, linear in between. `None` for an impossible placing.
pub fn position_component(position: i32, field_size: i32, config: &RaceScoringConfig) -> Option<f64> {
    if position < 1 || field_size < 1 || position > field_size {
        return None;
    }
    if field_size == 1 {
        return Some(config.winner_position_score);
    }

    let spread = config.winner_position_score - config.last_position_score;
    let fraction = f64::from(position - 1) / f64::from(field_size - 1);
    Some(config.winner_position_score - fraction * spread)
}

/// Time component of GEN: best time over own time, scaled to 99. 0 without a usable time.
pub fn time_component(finish_time_s: f64, best_time_s: f64, config: &RaceScoringConfig) -> f64 {
    let usable = finish_time_s.is_finite()
        && finish_time_s > 0.0
        && best_time_s.is_finite()
        && best_time_s > 0.0;
    if !usable {
        return 0.0;
    }
    (best_time_s / finish_time_s * config.winner_position_score).min(config.winner_position_score)
}

/// GEN score for one finisher, 0-99. Impossible placings score 0.
pub fn placement_score(outcome: &RaceOutcome, config: &RaceScoringConfig) -> u8 {
    let Some(position_score) = position_component(outcome.position, outcome.field_size, config)
    else {
        debug!(
            "invalid placing {}/{}, GEN floored to 0",
            outcome.position, outcome.field_size
        );
        return 0;
    };

    let time_score = time_component(outcome.finish_time_s, outcome.best_time_s, config);
    to_score((position_score + time_score) / 2.0)
}

/// Points for cross-race ranking: `base * (1 - (position - 1) / field_size) * coefficient`.
///
/// Invalid positions or field sizes yield 0.
pub fn race_points(
    position: i32,
    field_size: i32,
    federation: FederationTier,
    config: &RaceScoringConfig,
) -> f64 {
    if position < 1 || field_size < 1 || position > field_size {
        return 0.0;
    }

    let placement_factor = 1.0 - f64::from(position - 1) / f64::from(field_size);
    config.points_base * placement_factor * config.coefficient(federation)
}

/// Scores every finisher of one race. Field size and best time come from the sheet itself.
///
/// The field size is the number of rows or the highest recorded position,
/// whichever is larger, so a sheet with gaps (removed DQs, unlisted DNFs) still
/// scores its back markers instead of flooring them to 0.
pub fn score_race(
    finishes: &[RaceFinish],
    federation: FederationTier,
    config: &RaceScoringConfig,
) -> Vec<ScoredFinish> {
    let listed = i32::try_from(finishes.len()).unwrap_or(i32::MAX);
    let highest = finishes.iter().map(|f| f.position).max().unwrap_or(0);
    let field_size = listed.max(highest);
    let best_time_s = finishes
        .iter()
        .map(|f| f.finish_time_s)
        .filter(|t| t.is_finite() && *t > 0.0)
        .min_by(f64::total_cmp)
        .unwrap_or(0.0);

    let mut scored: Vec<ScoredFinish> = finishes
        .iter()
        .map(|finish| {
            let outcome = RaceOutcome {
                position: finish.position,
                finish_time_s: finish.finish_time_s,
                field_size,
                best_time_s,
                federation,
            };

            ScoredFinish {
                entrant: finish.entrant.clone(),
                position: finish.position,
                gen_score: placement_score(&outcome, config),
                points: race_points(finish.position, field_size, federation, config),
            }
        })
        .collect();

    scored.sort_by_key(|s| s.position);

    debug!(
        "scored race with {} finishers ({} ghosts)",
        scored.len(),
        scored.iter().filter(|s| s.entrant.is_ghost()).count()
    );

    scored
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum StandingKey {
    Rider(Uuid),
    Ghost(String),
}

impl From<&RaceEntrant> for StandingKey {
    fn from(entrant: &RaceEntrant) -> Self {
        match entrant.rider_id {
            Some(id) => StandingKey::Rider(id),
            None => StandingKey::Ghost(entrant.name.trim().to_lowercase()),
        }
    }
}

/// Career leaderboard across any number of scored races.
///
/// Registered riders are grouped by id, ghosts by normalized name. Entries are
/// ordered by total points, then wins, then races, then name, then identity, so
/// the same input always yields the same order. Equal point totals share a rank.
pub fn career_standings(results: &[ScoredFinish]) -> Vec<StandingEntry> {
    let mut totals: BTreeMap<StandingKey, StandingEntry> = BTreeMap::new();

    for result in results {
        let entry = totals
            .entry(StandingKey::from(&result.entrant))
            .or_insert_with(|| StandingEntry {
                rank: 0,
                entrant: result.entrant.clone(),
                total_points: 0.0,
                races: 0,
                wins: 0,
                best_gen: 0,
            });

        entry.total_points += result.points;
        entry.races += 1;
        if result.position == 1 {
            entry.wins += 1;
        }
        entry.best_gen = entry.best_gen.max(result.gen_score);
    }

    let mut standings: Vec<StandingEntry> = totals.into_values().collect();
    standings.sort_by(compare_standings);

    let mut previous: Option<(f64, usize)> = None;
    for (idx, entry) in standings.iter_mut().enumerate() {
        entry.rank = match previous {
            Some((points, rank)) if points == entry.total_points => rank,
            _ => idx + 1,
        };
        previous = Some((entry.total_points, entry.rank));
    }

    standings
}

fn compare_standings(a: &StandingEntry, b: &StandingEntry) -> Ordering {
    b.total_points
        .total_cmp(&a.total_points)
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| b.races.cmp(&a.races))
        .then_with(|| a.entrant.name.cmp(&b.entrant.name))
        .then_with(|| StandingKey::from(&a.entrant).cmp(&StandingKey::from(&b.entrant)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RaceScoringConfig {
        RaceScoringConfig::default()
    }

    fn outcome(position: i32, finish: f64, field_size: i32, best: f64) -> RaceOutcome {
        RaceOutcome {
            position,
            finish_time_s: finish,
            field_size,
            best_time_s: best,
            federation: FederationTier::National,
        }
    }

    fn finish(name: &str, rider_id: Option<Uuid>, position: i32, time: f64) -> RaceFinish {
        RaceFinish {
            entrant: RaceEntrant {
                rider_id,
                name: name.to_string(),
            },
            position,
            finish_time_s: time,
        }
    }

    #[test]
    fn test_position_component_endpoints() {
        let c = config();
        for field in [2, 3, 10, 250] {
            assert_eq!(position_component(1, field, &c), Some(99.0));
            assert_eq!(position_component(field, field, &c), Some(30.0));
        }
        assert_eq!(position_component(1, 1, &c), Some(99.0));
    }

    #[test]
    fn test_position_component_midfield() {
        // 3rd of 5: 99 - 0.5 * 69 = 64.5
        assert_eq!(position_component(3, 5, &config()), Some(64.5));
    }

    #[test]
    fn test_position_component_invalid() {
        let c = config();
        assert_eq!(position_component(0, 10, &c), None);
        assert_eq!(position_component(-1, 10, &c), None);
        assert_eq!(position_component(1, 0, &c), None);
        assert_eq!(position_component(11, 10, &c), None);
    }

    #[test]
    fn test_gen_winner_of_two() {
        // Winner set the best time: (99 + 99) / 2
        assert_eq!(placement_score(&outcome(1, 3600.0, 2, 3600.0), &config()), 99);
    }

    #[test]
    fn test_gen_last_of_two() {
        // (30 + 3600 / 4000 * 99) / 2 = (30 + 89.1) / 2 = 59.55
        assert_eq!(placement_score(&outcome(2, 4000.0, 2, 3600.0), &config()), 60);
    }

    #[test]
    fn test_gen_without_finish_time() {
        // Position only: (99 + 0) / 2 = 49.5
        assert_eq!(placement_score(&outcome(1, 0.0, 2, 3600.0), &config()), 50);
    }

    #[test]
    fn test_gen_invalid_input_is_zero() {
        let c = config();
        assert_eq!(placement_score(&outcome(0, 3600.0, 10, 3600.0), &c), 0);
        assert_eq!(placement_score(&outcome(1, 3600.0, 0, 3600.0), &c), 0);
        assert_eq!(placement_score(&outcome(-3, 3600.0, 10, 3600.0), &c), 0);
    }

    #[test]
    fn test_time_component_caps_at_max() {
        // A finish faster than the reported best time is a data error, not a bonus.
        assert_eq!(time_component(3000.0, 3600.0, &config()), 99.0);
        assert_eq!(time_component(f64::NAN, 3600.0, &config()), 0.0);
    }

    #[test]
    fn test_points_strictly_decrease_with_position() {
        let c = config();
        let points: Vec<f64> = (1..=20)
            .map(|p| race_points(p, 20, FederationTier::Regional, &c))
            .collect();

        assert_eq!(points[0], 100.0);
        assert!(points.windows(2).all(|pair| pair[0] > pair[1]));
        assert!(points[19] > 0.0);
    }

    #[test]
    fn test_points_respect_federation_prestige() {
        let c = config();
        let international = race_points(3, 40, FederationTier::International, &c);
        let national = race_points(3, 40, FederationTier::National, &c);
        let regional = race_points(3, 40, FederationTier::Regional, &c);

        assert!(international >= national);
        assert!(national >= regional);
        assert!((international - 142.5).abs() < 1e-9);
    }

    #[test]
    fn test_points_invalid_input_is_zero() {
        let c = config();
        assert_eq!(race_points(0, 10, FederationTier::National, &c), 0.0);
        assert_eq!(race_points(1, 0, FederationTier::National, &c), 0.0);
        assert_eq!(race_points(-2, -2, FederationTier::National, &c), 0.0);
    }

    #[test]
    fn test_score_race_derives_field_and_best_time() {
        let rider = Uuid::new_v4();
        let sheet = vec![
            finish("Ghost Rider", None, 2, 3700.0),
            finish("Alice", Some(rider), 1, 3600.0),
            finish("Late Larry", None, 3, 0.0),
        ];

        let scored = score_race(&sheet, FederationTier::Regional, &config());

        assert_eq!(scored.len(), 3);
        assert_eq!(scored[0].entrant.rider_id, Some(rider));
        assert_eq!(scored[0].gen_score, 99);
        assert!(scored[1].entrant.is_ghost());
        // (64.5 + 3600 / 3700 * 99) / 2 = (64.5 + 96.32) / 2 = 80.41
        assert_eq!(scored[1].gen_score, 80);
        // Last place without a time: (30 + 0) / 2
        assert_eq!(scored[2].gen_score, 15);
        assert!(scored[0].points > scored[1].points && scored[1].points > scored[2].points);
    }

    #[test]
    fn test_score_race_with_position_gaps() {
        // Positions 3 and 4 were removed from the sheet after a DQ.
        let sheet = vec![
            finish("A", None, 1, 3600.0),
            finish("B", None, 2, 3620.0),
            finish("E", None, 5, 3700.0),
        ];

        let scored = score_race(&sheet, FederationTier::Regional, &config());

        // Last of a field of 5: (30 + 3600 / 3700 * 99) / 2 = 63.16
        assert_eq!(scored[2].gen_score, 63);
        // 100 * (1 - 4 / 5)
        assert!((scored[2].points - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_ghost_scores_like_registered_rider() {
        let as_ghost = score_race(
            &[finish("Nobody", None, 1, 3000.0), finish("B", None, 2, 3100.0)],
            FederationTier::National,
            &config(),
        );
        let as_rider = score_race(
            &[
                finish("Nobody", Some(Uuid::new_v4()), 1, 3000.0),
                finish("B", None, 2, 3100.0),
            ],
            FederationTier::National,
            &config(),
        );

        assert_eq!(as_ghost[0].gen_score, as_rider[0].gen_score);
        assert_eq!(as_ghost[0].points, as_rider[0].points);
    }

    #[test]
    fn test_career_standings_groups_and_ranks() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let c = config();

        let race_a = score_race(
            &[
                finish("Alice", Some(alice), 1, 3600.0),
                finish("Bob", Some(bob), 2, 3650.0),
                finish("Ghost", None, 3, 3700.0),
            ],
            FederationTier::International,
            &c,
        );
        let race_b = score_race(
            &[
                finish("Bob", Some(bob), 1, 3500.0),
                finish("ghost ", None, 2, 3520.0),
                finish("Alice", Some(alice), 3, 3600.0),
            ],
            FederationTier::Regional,
            &c,
        );

        let all: Vec<ScoredFinish> = race_a.into_iter().chain(race_b).collect();
        let standings = career_standings(&all);

        assert_eq!(standings.len(), 3);
        // Alice: 150 + 33.33, Bob: 100 + 100, Ghost: 50 + 66.67
        assert_eq!(standings[0].entrant.rider_id, Some(bob));
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[0].wins, 1);
        assert_eq!(standings[1].entrant.rider_id, Some(alice));
        assert_eq!(standings[2].races, 2);
        assert!(standings[2].entrant.is_ghost());
    }

    #[test]
    fn test_career_standings_shared_rank() {
        let results = vec![
            ScoredFinish {
                entrant: RaceEntrant::ghost("A"),
                position: 1,
                gen_score: 90,
                points: 50.0,
            },
            ScoredFinish {
                entrant: RaceEntrant::ghost("B"),
                position: 1,
                gen_score: 80,
                points: 50.0,
            },
            ScoredFinish {
                entrant: RaceEntrant::ghost("C"),
                position: 2,
                gen_score: 70,
                points: 10.0,
            },
        ];

        let standings = career_standings(&results);
        let ranks: Vec<usize> = standings.iter().map(|s| s.rank).collect();
        assert_eq!(ranks, vec![1, 1, 3]);
        assert_eq!(standings[0].entrant.name, "A");
    }

    #[test]
    fn test_career_standings_order_is_stable_for_namesakes() {
        let results: Vec<ScoredFinish> = (1..=6u128)
            .map(|i| ScoredFinish {
                entrant: RaceEntrant::rider(Uuid::from_u128(i * 7919), "Sam Taylor"),
                position: 2,
                gen_score: 60,
                points: 40.0,
            })
            .collect();

        let first: Vec<Option<Uuid>> = career_standings(&results)
            .iter()
            .map(|s| s.entrant.rider_id)
            .collect();
        assert_eq!(first.len(), 6);

        let mut reversed = results.clone();
        reversed.reverse();
        for input in [&results, &reversed] {
            for _ in 0..20 {
                let order: Vec<Option<Uuid>> = career_standings(input)
                    .iter()
                    .map(|s| s.entrant.rider_id)
                    .collect();
                assert_eq!(order, first);
            }
        }
        assert!(first.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(score_race(&[], FederationTier::National, &config()).is_empty());
        assert!(career_standings(&[]).is_empty());
    }
}
