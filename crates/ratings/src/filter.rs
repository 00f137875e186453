//! Selection of activities eligible for skill scoring.

use tracing::trace;

use crate::{config::ActivityFilterConfig, models::ActivityRecord};

/// Keeps the records whose kind is listed in `config.eligible_kinds`.
///
/// Non-matching records are dropped silently. An empty result is a valid state
/// that every calculator maps to 0.
pub fn eligible_activities<'a>(
    records: &'a [ActivityRecord],
    config: &ActivityFilterConfig,
) -> Vec<&'a ActivityRecord> {
    filter_by_kinds(records, &config.eligible_kinds)
}

/// Same as [`eligible_activities`] with an explicit kind list.
pub fn filter_by_kinds<'a, S: AsRef<str>>(
    records: &'a [ActivityRecord],
    kinds: &[S],
) -> Vec<&'a ActivityRecord> {
    let kept: Vec<&ActivityRecord> = records
        .iter()
        .filter(|record| {
            kinds
                .iter()
                .any(|kind| record.kind.trim().eq_ignore_ascii_case(kind.as_ref()))
        })
        .collect();

    trace!(
        "kept {} of {} activities for skill scoring",
        kept.len(),
        records.len()
    );

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use uuid::Uuid;

    fn record(kind: &str) -> ActivityRecord {
        ActivityRecord {
            id: Uuid::new_v4(),
            kind: kind.to_string(),
            distance_m: 30_000.0,
            moving_time_s: 3600.0,
            elapsed_time_s: 3900.0,
            elevation_gain_m: 300.0,
            average_speed_mps: 8.3,
            max_speed_mps: 14.0,
            average_power_w: None,
            started_at: datetime!(2025-05-04 08:00 UTC),
        }
    }

    #[test]
    fn test_default_keeps_only_rides() {
        let records = vec![record("ride"), record("run"), record("Ride"), record("swim")];
        let kept = eligible_activities(&records, &ActivityFilterConfig::default());

        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| r.kind.eq_ignore_ascii_case("ride")));
    }

    #[test]
    fn test_empty_input_is_not_an_error() {
        let kept = eligible_activities(&[], &ActivityFilterConfig::default());
        assert!(kept.is_empty());
    }

    #[test]
    fn test_explicit_kind_list() {
        let records = vec![record("ride"), record("virtualride"), record("run")];
        let kept = filter_by_kinds(&records, &["ride", "virtualride"]);

        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_only_non_ride_kinds_yields_empty() {
        let records = vec![record("run"), record("walk")];
        let kept = eligible_activities(&records, &ActivityFilterConfig::default());

        assert!(kept.is_empty());
    }
}
