use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::location::Coordinate;

/// A place users can check in to. Everything but `id` and `location` is
/// descriptive and only passed through.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: Id<Place>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub subcategory: Option<String>,
    #[serde(default)]
    pub city: String,
    pub description: Option<String>,
    #[serde(flatten)]
    pub location: Coordinate,
}

impl HasId for Place {
    type IdType = String;
}

impl Place {
    pub fn new<S: Into<String>>(id: S, name: S, location: Coordinate) -> Self {
        Self {
            id: Id::new(id.into()),
            name: name.into(),
            category: String::new(),
            subcategory: None,
            city: String::new(),
            description: None,
            location,
        }
    }

    /// Category in a human readable form, e.g. `coffee_shop` to `Coffee Shop`.
    pub fn category_label(&self) -> String {
        self.category
            .split('_')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + chars.as_str()
                    }
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_api_shape() {
        let place: Place = serde_json::from_str(
            r#"{
                "id": "42",
                "name": "Cool Cafe",
                "category": "coffee_shop",
                "subcategory": "espresso",
                "lat": 47.6062,
                "lon": -122.3321,
                "city": "Seattle",
                "description": "Great coffee and vibes."
            }"#,
        )
        .unwrap();
        assert_eq!(place.id.raw_ref::<str>(), "42");
        assert_eq!(place.location, Coordinate::new(47.6062, -122.3321));
        assert_eq!(place.city, "Seattle");
        assert_eq!(place.category_label(), "Coffee Shop");
    }

    #[test]
    fn metadata_is_optional() {
        let place: Place =
            serde_json::from_str(r#"{"id": "1", "lat": 0.0, "lon": 0.0}"#).unwrap();
        assert!(place.name.is_empty());
        assert!(place.description.is_none());
    }
}
