use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use serde_with;

pub mod check_in;
pub mod deck;
pub mod decision;
pub mod location;
pub mod place;
pub mod user;
pub mod visit;

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WithDistance<T> {
    pub distance_km: f64,
    #[serde(flatten)]
    pub content: T,
}

impl<T> WithDistance<T> {
    pub fn new(distance_km: f64, content: T) -> Self {
        Self {
            distance_km,
            content,
        }
    }

    pub fn distance_m(&self) -> f64 {
        self.distance_km * 1000.0
    }
}
