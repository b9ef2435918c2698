//! In-process collaborators, for tests and offline use.

use std::collections::HashMap;

use async_trait::async_trait;
use model::{
    check_in::{CheckInRecord, NewCheckIn},
    location::Coordinate,
    place::Place,
    user::User,
};
use tokio::sync::RwLock;
use utility::id::Id;

use crate::{
    provider::{CheckInStore, HistoryProvider, LocationProvider, PlaceProvider},
    CheckInError, CheckInResult, LocationError,
};

#[derive(Debug, Default)]
pub struct MemoryBackend {
    places: RwLock<HashMap<Id<Place>, Place>>,
    check_ins: RwLock<Vec<CheckInRecord>>,
    points: RwLock<HashMap<Id<User>, u32>>,
}

impl MemoryBackend {
    pub async fn put_place(&self, place: Place) {
        self.places.write().await.insert(place.id.clone(), place);
    }

    pub async fn points_of(&self, user_id: &Id<User>) -> u32 {
        self.points.read().await.get(user_id).copied().unwrap_or(0)
    }
}

#[async_trait]
impl PlaceProvider for MemoryBackend {
    async fn place(&self, id: &Id<Place>) -> CheckInResult<Place> {
        self.places
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(CheckInError::PlaceNotFound)
    }
}

#[async_trait]
impl HistoryProvider for MemoryBackend {
    async fn check_ins_of_user(
        &self,
        user_id: &Id<User>,
    ) -> CheckInResult<Vec<CheckInRecord>> {
        Ok(self
            .check_ins
            .read()
            .await
            .iter()
            .filter(|record| &record.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CheckInStore for MemoryBackend {
    async fn record_check_in(&self, check_in: NewCheckIn) -> CheckInResult<CheckInRecord> {
        let record = check_in.into_record();
        self.check_ins.write().await.push(record.clone());
        Ok(record)
    }

    async fn award_points(&self, user_id: &Id<User>, points: u32) -> CheckInResult<u32> {
        let mut totals = self.points.write().await;
        let total = totals.entry(user_id.clone()).or_default();
        *total = total.saturating_add(points);
        Ok(*total)
    }
}

/// A location provider that always answers the same.
#[derive(Debug, Clone)]
pub struct FixedLocation(Result<Coordinate, LocationError>);

impl FixedLocation {
    pub fn at(coordinate: Coordinate) -> Self {
        Self(Ok(coordinate))
    }

    pub fn failing(why: LocationError) -> Self {
        Self(Err(why))
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_location(&self) -> Result<Coordinate, LocationError> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[tokio::test]
    async fn history_is_per_user() {
        let backend = MemoryBackend::default();
        for user in ["a", "b", "a"] {
            backend
                .record_check_in(NewCheckIn {
                    place_id: Id::from("cafe"),
                    user_id: Id::from(user),
                    place_name: "Cafe".to_owned(),
                    latitude: 1.0,
                    longitude: 2.0,
                    timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                    photo_uri: None,
                })
                .await
                .unwrap();
        }
        assert_eq!(backend.check_ins_of_user(&Id::from("a")).await.unwrap().len(), 2);
        assert_eq!(backend.check_ins_of_user(&Id::from("b")).await.unwrap().len(), 1);
        assert!(backend.check_ins_of_user(&Id::from("c")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn points_accumulate() {
        let backend = MemoryBackend::default();
        let user = Id::from("a");
        assert_eq!(backend.award_points(&user, 50).await.unwrap(), 50);
        assert_eq!(backend.award_points(&user, 50).await.unwrap(), 100);
        assert_eq!(backend.points_of(&user).await, 100);
        assert_eq!(backend.points_of(&Id::from("b")).await, 0);
    }
}
