use chrono::{DateTime, Duration, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::{id::Id, serde::duration};

use crate::place::Place;

/// Derived view of a user's history at one place. Never persisted.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceVisitSummary {
    pub place_id: Id<Place>,
    pub level: u32,
    pub last_check_in: Option<DateTime<Utc>>,
    #[serde(
        serialize_with = "duration::serialize",
        deserialize_with = "duration::deserialize"
    )]
    #[schemars(schema_with = "duration::schema")]
    pub cooldown_remaining: Duration,
    /// Whether the cooldown permits a check-in. Distance is not considered.
    pub can_check_in: bool,
}

/// The place a user has checked in to most often.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopPlace {
    pub place: Place,
    pub level: u32,
}
