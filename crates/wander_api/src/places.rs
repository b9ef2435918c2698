use async_trait::async_trait;
use check_in::{provider::PlaceProvider, CheckInError, CheckInResult};
use model::{location::Coordinate, place::Place, user::User, WithDistance};
use utility::{geo::BoundingBox, id::Id};

use crate::{ApiError, WanderApiClient};

const NO_QUERY: &[(&str, &str)] = &[];

impl WanderApiClient {
    pub async fn places(&self) -> Result<Vec<Place>, ApiError> {
        self.get("places", NO_QUERY).await
    }

    pub async fn place(&self, id: &Id<Place>) -> Result<Place, ApiError> {
        self.get(&format!("places/{}", id), NO_QUERY).await
    }

    pub async fn places_by_category(&self, category: &str) -> Result<Vec<Place>, ApiError> {
        self.get(&format!("places/category/{}", category), NO_QUERY)
            .await
    }

    pub async fn places_by_city(&self, city: &str) -> Result<Vec<Place>, ApiError> {
        self.get(&format!("places/city/{}", city), NO_QUERY).await
    }

    pub async fn places_by_subcategory(
        &self,
        subcategory: &str,
    ) -> Result<Vec<Place>, ApiError> {
        self.get(&format!("places/subcategory/{}", subcategory), NO_QUERY)
            .await
    }

    pub async fn search_places_by_name(&self, name: &str) -> Result<Vec<Place>, ApiError> {
        self.get("places/search", &[("name", name)]).await
    }

    pub async fn search_places_by_description(
        &self,
        keyword: &str,
    ) -> Result<Vec<Place>, ApiError> {
        self.get("places/search/description", &[("keyword", keyword)])
            .await
    }

    /// Places inside the box, as filtered by the server.
    pub async fn nearby_places(&self, area: &BoundingBox) -> Result<Vec<Place>, ApiError> {
        self.get(
            "places/nearby",
            &[
                ("minLat", area.min_latitude),
                ("maxLat", area.max_latitude),
                ("minLon", area.min_longitude),
                ("maxLon", area.max_longitude),
            ],
        )
        .await
    }

    /// Places within `radius_km` of `center`, closest first.
    ///
    /// The server only filters by bounding box, so the corners are cut off here.
    pub async fn places_near(
        &self,
        center: Coordinate,
        radius_km: f64,
    ) -> Result<Vec<WithDistance<Place>>, ApiError> {
        let area = evaluator::nearby_bounding_box(center, radius_km);
        let places = self.nearby_places(&area).await?;
        Ok(evaluator::places_within(places, center, radius_km))
    }

    pub async fn filter_places(
        &self,
        category: Option<&str>,
        city: Option<&str>,
    ) -> Result<Vec<Place>, ApiError> {
        let query = [("category", category), ("city", city)]
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key, value)))
            .collect::<Vec<_>>();
        self.get("places/filter", &query).await
    }

    pub async fn categories(&self) -> Result<Vec<String>, ApiError> {
        self.get("places/categories", NO_QUERY).await
    }

    pub async fn cities(&self) -> Result<Vec<String>, ApiError> {
        self.get("places/cities", NO_QUERY).await
    }

    pub async fn places_count(&self) -> Result<u64, ApiError> {
        self.get("places/count", NO_QUERY).await
    }

    pub async fn user(&self, id: &Id<User>) -> Result<User, ApiError> {
        self.get(&format!("users/{}", id), NO_QUERY).await
    }
}

#[async_trait]
impl PlaceProvider for WanderApiClient {
    async fn place(&self, id: &Id<Place>) -> CheckInResult<Place> {
        WanderApiClient::place(self, id).await.map_err(|e| {
            if e.is_not_found() {
                CheckInError::PlaceNotFound
            } else {
                e.into()
            }
        })
    }
}
