use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use model::{check_in::CheckInRecord, place::Place, visit::PlaceVisitSummary};
use utility::id::Id;

use crate::evaluator::{last_check_in, level_of, CheckInEvaluator};

impl CheckInEvaluator {
    /// Summary of the user's visits to `place_id`. Records of other places
    /// are ignored.
    pub fn summarize_visits(
        &self,
        place_id: &Id<Place>,
        check_ins: &[CheckInRecord],
        now: DateTime<Utc>,
    ) -> PlaceVisitSummary {
        let at_place = check_ins
            .iter()
            .filter(|record| record.is_at(place_id))
            .cloned()
            .collect::<Vec<_>>();
        self.summary_of(place_id.clone(), &at_place, now)
    }

    /// One summary per visited place, in order of each place's first record.
    pub fn summarize_all_visits(
        &self,
        check_ins: &[CheckInRecord],
        now: DateTime<Utc>,
    ) -> Vec<PlaceVisitSummary> {
        group_by_place(check_ins)
            .into_iter()
            .map(|(place_id, records)| self.summary_of(place_id, &records, now))
            .collect()
    }

    fn summary_of(
        &self,
        place_id: Id<Place>,
        records: &[CheckInRecord],
        now: DateTime<Utc>,
    ) -> PlaceVisitSummary {
        let cooldown_remaining = self.cooldown_remaining(records, now);
        PlaceVisitSummary {
            place_id,
            level: level_of(records),
            last_check_in: last_check_in(records),
            cooldown_remaining,
            can_check_in: cooldown_remaining.is_zero(),
        }
    }
}

/// The place with the most check-ins and its level. On a tie the place that
/// appears first in `check_ins` wins.
pub fn most_visited_place(check_ins: &[CheckInRecord]) -> Option<(Id<Place>, u32)> {
    let mut counts: IndexMap<&Id<Place>, u32> = IndexMap::new();
    for record in check_ins {
        *counts.entry(&record.place_id).or_default() += 1;
    }

    let mut top: Option<(&Id<Place>, u32)> = None;
    for (place_id, count) in counts {
        match top {
            Some((_, max)) if count <= max => {}
            _ => top = Some((place_id, count)),
        }
    }
    top.map(|(place_id, level)| (place_id.clone(), level))
}

fn group_by_place(check_ins: &[CheckInRecord]) -> IndexMap<Id<Place>, Vec<CheckInRecord>> {
    let mut by_place: IndexMap<Id<Place>, Vec<CheckInRecord>> = IndexMap::new();
    for record in check_ins {
        by_place
            .entry(record.place_id.clone())
            .or_default()
            .push(record.clone());
    }
    by_place
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap()
    }

    fn visit(place: &str, hours_ago: i64) -> CheckInRecord {
        CheckInRecord::new(
            Id::from(place),
            Id::from("user"),
            now() - Duration::hours(hours_ago),
        )
    }

    #[test]
    fn summary_ignores_other_places() {
        let history = [visit("park", 1), visit("cafe", 30), visit("cafe", 6)];
        let summary = CheckInEvaluator::default().summarize_visits(
            &Id::from("cafe"),
            &history,
            now(),
        );
        assert_eq!(summary.level, 2);
        assert_eq!(summary.last_check_in, Some(now() - Duration::hours(6)));
        assert!(summary.can_check_in);
        assert!(summary.cooldown_remaining.is_zero());
    }

    #[test]
    fn summary_of_unvisited_place() {
        let summary = CheckInEvaluator::default().summarize_visits(
            &Id::from("museum"),
            &[visit("cafe", 1)],
            now(),
        );
        assert_eq!(summary.level, 0);
        assert_eq!(summary.last_check_in, None);
        assert!(summary.can_check_in);
    }

    #[test]
    fn summaries_for_all_places_in_first_seen_order() {
        let history = [
            visit("park", 1),
            visit("cafe", 48),
            visit("park", 24),
            visit("museum", 2),
        ];
        let summaries = CheckInEvaluator::default().summarize_all_visits(&history, now());
        let ids = summaries
            .iter()
            .map(|summary| summary.place_id.raw())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["park", "cafe", "museum"]);

        assert_eq!(summaries[0].level, 2);
        assert!(!summaries[0].can_check_in);
        assert_eq!(summaries[0].cooldown_remaining, Duration::hours(3));
        assert!(summaries[1].can_check_in);
        assert_eq!(summaries[2].cooldown_remaining, Duration::hours(2));
    }

    #[test]
    fn most_visited_place_breaks_ties_by_first_appearance() {
        assert_eq!(most_visited_place(&[]), None);

        let history = [
            visit("cafe", 1),
            visit("park", 2),
            visit("park", 3),
            visit("cafe", 4),
        ];
        assert_eq!(most_visited_place(&history), Some((Id::from("cafe"), 2)));

        let history = [visit("cafe", 1), visit("park", 2), visit("park", 3)];
        assert_eq!(most_visited_place(&history), Some((Id::from("park"), 2)));
    }
}
