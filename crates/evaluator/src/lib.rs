//! Check-in eligibility and rewards.
//!
//! Everything in this crate is a pure function of its arguments: no clock,
//! no I/O. The instant of evaluation is always passed in as `now`.

use chrono::{DateTime, Utc};
use model::{
    check_in::CheckInRecord, decision::CheckInDecision, location::Coordinate,
    place::Place,
};
use utility::geo::{self, BoundingBox};

pub mod evaluator;
pub mod history;
pub mod policy;
pub mod ranking;

pub use evaluator::CheckInEvaluator;
pub use history::most_visited_place;
pub use policy::CheckInPolicy;
pub use ranking::{deck_progress, places_within, rank_by_distance};
pub use utility::geo::EARTH_RADIUS_KM;

/// Maximum distance between user and place for a check-in to be accepted.
pub const CHECK_IN_RADIUS_KM: f64 = 0.5;
/// Minimum time between two check-ins of the same user at the same place.
pub const COOLDOWN_HOURS: i64 = 4;
pub const CHECK_IN_POINTS: u32 = 50;

/// Great circle distance between two coordinates in kilometers.
pub fn compute_distance_km(a: Coordinate, b: Coordinate) -> f64 {
    geo::haversine_distance(a.latitude, a.longitude, b.latitude, b.longitude)
}

/// Evaluates a check-in attempt with the default policy.
///
/// `prior_check_ins` is the user's complete history at `place`, in any order.
pub fn evaluate_check_in(
    user_location: Coordinate,
    place: &Place,
    prior_check_ins: &[CheckInRecord],
    now: DateTime<Utc>,
) -> CheckInDecision {
    CheckInEvaluator::default().evaluate(user_location, place, prior_check_ins, now)
}

/// Box to query candidate places around `center` with.
pub fn nearby_bounding_box(center: Coordinate, radius_km: f64) -> BoundingBox {
    center.bounding_box(radius_km)
}
