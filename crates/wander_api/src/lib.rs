use std::error;
use std::fmt;
use std::sync::Arc;

use check_in::CheckInError;

pub mod check_ins;
pub mod client;
pub mod leaderboard;
pub mod places;

pub use client::{ApiConnectionInfo, WanderApiClient};

#[derive(Debug, Clone)]
pub enum ApiError {
    RequestError(Arc<reqwest::Error>),
    JsonError(Arc<serde_json::Error>),
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
        response: Option<String>,
    },
    MalformedRecord(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApiError::InvalidResponse { status_code, .. }
                if *status_code == reqwest::StatusCode::NOT_FOUND
        )
    }
}

impl error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::RequestError(e) => write!(f, "HTTP request error: {}", e),
            ApiError::JsonError(e) => write!(f, "JSON parse error: {}", e),
            ApiError::InvalidResponse {
                status_code,
                url,
                response,
            } => match response {
                Some(text) => {
                    write!(f, "Invalid Response ({}) {}: {}", status_code, text, url)
                }
                None => write!(f, "Invalid Response ({}) {}", status_code, url),
            },
            ApiError::MalformedRecord(why) => write!(f, "Malformed record: {}", why),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::RequestError(Arc::new(e))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::JsonError(Arc::new(e))
    }
}

impl From<ApiError> for CheckInError {
    fn from(value: ApiError) -> Self {
        CheckInError::provider(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_detection() {
        let not_found = ApiError::InvalidResponse {
            status_code: reqwest::StatusCode::NOT_FOUND,
            url: "https://example.org/api/places/1".to_owned(),
            response: None,
        };
        assert!(not_found.is_not_found());
        assert_eq!(
            not_found.to_string(),
            "Invalid Response (404 Not Found) https://example.org/api/places/1"
        );
        assert!(!ApiError::MalformedRecord("no id".to_owned()).is_not_found());
    }

    #[test]
    fn converts_into_provider_errors() {
        let error = CheckInError::from(ApiError::MalformedRecord("no id".to_owned()));
        assert!(matches!(error, CheckInError::Provider(_)));
        assert_eq!(error.to_string(), "Malformed record: no id");
    }
}
