use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::Id;

use crate::{location::Coordinate, place::Place, user::User};

/// A completed check-in. Records are append-only.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRecord {
    pub place_id: Id<Place>,
    pub user_id: Id<User>,
    pub timestamp: DateTime<Utc>,
    /// Where the user stood when checking in.
    pub location: Option<Coordinate>,
    pub photo_uri: Option<String>,
}

impl CheckInRecord {
    pub fn new(place_id: Id<Place>, user_id: Id<User>, timestamp: DateTime<Utc>) -> Self {
        Self {
            place_id,
            user_id,
            timestamp,
            location: None,
            photo_uri: None,
        }
    }

    pub fn is_at(&self, place_id: &Id<Place>) -> bool {
        &self.place_id == place_id
    }
}

/// Payload for persisting an accepted check-in.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCheckIn {
    pub place_id: Id<Place>,
    pub user_id: Id<User>,
    pub place_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
    pub photo_uri: Option<String>,
}

impl NewCheckIn {
    pub fn into_record(self) -> CheckInRecord {
        CheckInRecord {
            place_id: self.place_id,
            user_id: self.user_id,
            timestamp: self.timestamp,
            location: Some(Coordinate::new(self.latitude, self.longitude)),
            photo_uri: self.photo_uri,
        }
    }
}
