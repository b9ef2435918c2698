use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::place::Place;

/// A curated collection of places, typically of one category.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: Id<Deck>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub places: Vec<Place>,
}

impl HasId for Deck {
    type IdType = i64;
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeckPlace {
    #[serde(flatten)]
    pub place: Place,
    pub visited: bool,
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeckProgress {
    pub deck_id: Id<Deck>,
    pub places: Vec<DeckPlace>,
    pub completed_count: usize,
}

impl DeckProgress {
    pub fn is_complete(&self) -> bool {
        !self.places.is_empty() && self.completed_count == self.places.len()
    }
}
