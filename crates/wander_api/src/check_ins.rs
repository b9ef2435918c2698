use async_trait::async_trait;
use check_in::{
    provider::{CheckInStore, HistoryProvider},
    CheckInResult,
};
use model::{
    check_in::{CheckInRecord, NewCheckIn},
    location::Coordinate,
    user::User,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utility::{id::Id, serde::date_time};

use crate::{ApiError, WanderApiClient};

/// A check-in as the server sends it. Ids may arrive as numbers or strings and
/// any field may be missing, so nothing here is trusted yet.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInDto {
    #[serde(alias = "place_id")]
    pub place_id: Option<Value>,
    #[serde(alias = "user_id")]
    pub user_id: Option<Value>,
    #[serde(alias = "createdAt")]
    pub timestamp: Option<String>,
    #[serde(alias = "lat")]
    pub latitude: Option<f64>,
    #[serde(alias = "lon", alias = "lng")]
    pub longitude: Option<f64>,
    #[serde(alias = "photo_uri", alias = "photoUrl")]
    pub photo_uri: Option<String>,
}

fn id_of(value: Option<Value>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(Value::String(id)) if !id.trim().is_empty() => Ok(id),
        Some(Value::Number(id)) => Ok(id.to_string()),
        Some(other) => Err(ApiError::MalformedRecord(format!(
            "{} is not an id: {}",
            field, other
        ))),
        None => Err(ApiError::MalformedRecord(format!("{} is missing", field))),
    }
}

impl TryFrom<CheckInDto> for CheckInRecord {
    type Error = ApiError;

    fn try_from(dto: CheckInDto) -> Result<Self, Self::Error> {
        let place_id = id_of(dto.place_id, "placeId")?;
        let user_id = id_of(dto.user_id, "userId")?;
        let timestamp = dto
            .timestamp
            .ok_or_else(|| ApiError::MalformedRecord("timestamp is missing".to_owned()))
            .and_then(|ts| {
                date_time::parse_utc(&ts).map_err(|e| {
                    ApiError::MalformedRecord(format!("bad timestamp {:?}: {}", ts, e))
                })
            })?;
        let location = match (dto.latitude, dto.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
            _ => None,
        };
        Ok(CheckInRecord {
            place_id: Id::new(place_id),
            user_id: Id::new(user_id),
            timestamp,
            location,
            photo_uri: dto.photo_uri.filter(|uri| !uri.is_empty()),
        })
    }
}

/// Converts the server's records, dropping the ones that cannot be used.
/// Records without a user are attributed to `user_id`.
pub fn normalize_check_ins(dtos: Vec<CheckInDto>, user_id: &Id<User>) -> Vec<CheckInRecord> {
    dtos.into_iter()
        .filter_map(|mut dto| {
            if dto.user_id.is_none() {
                dto.user_id = Some(Value::String(user_id.raw()));
            }
            CheckInRecord::try_from(dto)
                .inspect_err(|e| log::warn!("Skipping check-in of user {}: {}", user_id, e))
                .ok()
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct PointsRequest {
    points: u32,
}

impl WanderApiClient {
    pub async fn check_ins_of_user(
        &self,
        user_id: &Id<User>,
    ) -> Result<Vec<CheckInRecord>, ApiError> {
        let dtos: Vec<CheckInDto> = self
            .get(&format!("checkins/user/{}", user_id), &[] as &[(&str, &str)])
            .await?;
        Ok(normalize_check_ins(dtos, user_id))
    }

    /// Stores the check-in. If the server's echo cannot be read, the submitted
    /// data is returned as the record.
    pub async fn create_check_in(&self, check_in: NewCheckIn) -> Result<CheckInRecord, ApiError> {
        let dto: CheckInDto = self.post("checkins", &check_in).await?;
        Ok(CheckInRecord::try_from(dto).unwrap_or_else(|e| {
            log::warn!("Unreadable check-in echo from server: {}", e);
            check_in.into_record()
        }))
    }

    pub async fn add_points(&self, user_id: &Id<User>, points: u32) -> Result<User, ApiError> {
        self.post(
            &format!("users/{}/points", user_id),
            &PointsRequest { points },
        )
        .await
    }
}

#[async_trait]
impl HistoryProvider for WanderApiClient {
    async fn check_ins_of_user(
        &self,
        user_id: &Id<User>,
    ) -> CheckInResult<Vec<CheckInRecord>> {
        Ok(WanderApiClient::check_ins_of_user(self, user_id).await?)
    }
}

#[async_trait]
impl CheckInStore for WanderApiClient {
    async fn record_check_in(&self, check_in: NewCheckIn) -> CheckInResult<CheckInRecord> {
        Ok(self.create_check_in(check_in).await?)
    }

    async fn award_points(&self, user_id: &Id<User>, points: u32) -> CheckInResult<u32> {
        Ok(self.add_points(user_id, points).await?.points)
    }
}
