use std::collections::HashSet;

use itertools::Itertools;
use model::{
    check_in::CheckInRecord,
    deck::{Deck, DeckPlace, DeckProgress},
    location::Coordinate,
    place::Place,
    WithDistance,
};

use crate::compute_distance_km;

/// Places sorted by distance from `origin`, nearest first. Places at equal
/// distance keep their input order.
pub fn rank_by_distance<I>(places: I, origin: Coordinate) -> Vec<WithDistance<Place>>
where
    I: IntoIterator<Item = Place>,
{
    places
        .into_iter()
        .map(|place| WithDistance::new(compute_distance_km(origin, place.location), place))
        .sorted_by(|a, b| a.distance_km.total_cmp(&b.distance_km))
        .collect()
}

/// Places at most `radius_km` from `origin`, nearest first. Cuts the corners
/// off a bounding box query.
pub fn places_within<I>(
    places: I,
    origin: Coordinate,
    radius_km: f64,
) -> Vec<WithDistance<Place>>
where
    I: IntoIterator<Item = Place>,
{
    rank_by_distance(places, origin)
        .into_iter()
        .filter(|ranked| ranked.distance_km <= radius_km)
        .collect()
}

/// Marks the deck's places the user has checked in to at least once. With an
/// `origin`, places carry their distance and are sorted nearest first.
pub fn deck_progress(
    deck: &Deck,
    check_ins: &[CheckInRecord],
    origin: Option<Coordinate>,
) -> DeckProgress {
    let visited = check_ins
        .iter()
        .map(|record| &record.place_id)
        .collect::<HashSet<_>>();

    let mut places = deck
        .places
        .iter()
        .map(|place| DeckPlace {
            visited: visited.contains(&place.id),
            distance_km: origin.map(|origin| compute_distance_km(origin, place.location)),
            place: place.clone(),
        })
        .collect::<Vec<_>>();
    if origin.is_some() {
        places.sort_by(|a, b| {
            a.distance_km
                .unwrap_or(0.0)
                .total_cmp(&b.distance_km.unwrap_or(0.0))
        });
    }

    DeckProgress {
        deck_id: deck.id.clone(),
        completed_count: places.iter().filter(|place| place.visited).count(),
        places,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use utility::id::Id;

    use super::*;

    fn places() -> Vec<Place> {
        vec![
            Place::new("far", "Far", Coordinate::new(47.70, -122.3321)),
            Place::new("near", "Near", Coordinate::new(47.61, -122.3321)),
            Place::new("here", "Here", Coordinate::new(47.6062, -122.3321)),
        ]
    }

    fn deck() -> Deck {
        Deck {
            id: Id::new(7),
            name: "Coffee".to_owned(),
            description: String::new(),
            category: "coffee_shop".to_owned(),
            places: places(),
        }
    }

    fn visit(place: &str) -> CheckInRecord {
        CheckInRecord::new(
            Id::from(place),
            Id::from("user"),
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn ranks_nearest_first() {
        let ranked = rank_by_distance(places(), Coordinate::new(47.6062, -122.3321));
        let ids = ranked
            .iter()
            .map(|place| place.content.id.raw())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["here", "near", "far"]);
        assert_eq!(ranked[0].distance_km, 0.0);
    }

    #[test]
    fn box_corners_are_cut_off() {
        let center = Coordinate::new(47.6062, -122.3321);
        let bbox = crate::nearby_bounding_box(center, 1.0);
        let corner = Place::new(
            "corner",
            "Corner",
            Coordinate::new(bbox.max_latitude, bbox.max_longitude),
        );
        assert!(bbox.contains(corner.location.latitude, corner.location.longitude));

        let mut candidates = places();
        candidates.push(corner);
        let ids = places_within(candidates, center, 1.0)
            .iter()
            .map(|place| place.content.id.raw())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["here", "near"]);
    }

    #[test]
    fn deck_progress_without_location_keeps_order() {
        let progress = deck_progress(&deck(), &[visit("near"), visit("near")], None);
        assert_eq!(progress.completed_count, 1);
        assert!(!progress.is_complete());
        assert_eq!(progress.places[1].place.id.raw(), "near");
        assert!(progress.places[1].visited);
        assert!(progress.places.iter().all(|place| place.distance_km.is_none()));
    }

    #[test]
    fn deck_progress_with_location_sorts_by_distance() {
        let history = [visit("far"), visit("near"), visit("here"), visit("elsewhere")];
        let progress = deck_progress(
            &deck(),
            &history,
            Some(Coordinate::new(47.6062, -122.3321)),
        );
        assert_eq!(progress.places[0].place.id.raw(), "here");
        assert_eq!(progress.places[2].place.id.raw(), "far");
        assert_eq!(progress.completed_count, 3);
        assert!(progress.is_complete());
    }
}
