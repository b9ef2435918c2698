use std::{env, time::Duration};

use serde::{de::DeserializeOwned, Serialize};

use crate::ApiError;

pub const WANDER_API_URL: &str = "https://wander-api-196ebd783842.herokuapp.com/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConnectionInfo {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConnectionInfo {
    fn default() -> Self {
        Self {
            base_url: WANDER_API_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConnectionInfo {
    /// Reads `WANDER_API_URL` and `WANDER_API_TIMEOUT_SECS`, falling back to
    /// the hosted API and a 30 second timeout.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let base_url = lookup("WANDER_API_URL")
            .map(|url| url.trim_end_matches('/').to_owned())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.base_url);
        let timeout = lookup("WANDER_API_TIMEOUT_SECS")
            .and_then(|secs| secs.trim().parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);
        Self { base_url, timeout }
    }
}

/// Client for the Wander REST API.
#[derive(Debug, Clone)]
pub struct WanderApiClient {
    pub info: ApiConnectionInfo,
    http: reqwest::Client,
}

impl WanderApiClient {
    pub fn new(info: ApiConnectionInfo) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(info.timeout).build()?;
        Ok(Self { info, http })
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.info.base_url, endpoint.trim_start_matches('/'))
    }

    /// Fetch data from an endpoint using this client.
    pub(crate) async fn get<T, Q>(&self, endpoint: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(endpoint);
        log::debug!("GET {}", url);
        let response = self.http.get(&url).query(query).send().await?;
        Self::parse(response, url).await
    }

    pub(crate) async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(endpoint);
        log::debug!("POST {}", url);
        let response = self.http.post(&url).json(body).send().await?;
        Self::parse(response, url).await
    }

    async fn parse<T: DeserializeOwned>(
        response: reqwest::Response,
        url: String,
    ) -> Result<T, ApiError> {
        let status_code = response.status();
        if status_code.is_success() {
            let text = response.text().await?;
            Ok(serde_json::from_str(&text)?)
        } else {
            Err(ApiError::InvalidResponse {
                status_code,
                url,
                response: response.text().await.ok().filter(|text| !text.is_empty()),
            })
        }
    }
}
