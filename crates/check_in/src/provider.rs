use async_trait::async_trait;
use model::{
    check_in::{CheckInRecord, NewCheckIn},
    location::Coordinate,
    place::Place,
    user::User,
};
use utility::id::Id;

use crate::{CheckInResult, LocationError};

/// Source of the device's current position.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_location(&self) -> Result<Coordinate, LocationError>;
}

#[async_trait]
pub trait PlaceProvider: Send + Sync {
    /// Fails with `CheckInError::PlaceNotFound` for unknown ids.
    async fn place(&self, id: &Id<Place>) -> CheckInResult<Place>;
}

#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// All check-ins of the user, in no particular order.
    async fn check_ins_of_user(&self, user_id: &Id<User>)
        -> CheckInResult<Vec<CheckInRecord>>;
}

/// Persists the effects of an accepted check-in.
#[async_trait]
pub trait CheckInStore: Send + Sync {
    async fn record_check_in(&self, check_in: NewCheckIn) -> CheckInResult<CheckInRecord>;

    /// Adds `points` to the user's total and returns the new total.
    async fn award_points(&self, user_id: &Id<User>, points: u32) -> CheckInResult<u32>;
}

/// Everything the service needs from the remote side.
pub trait Backend: PlaceProvider + HistoryProvider + CheckInStore {}

impl<T> Backend for T where T: PlaceProvider + HistoryProvider + CheckInStore {}
