use std::{error::Error, fmt};

pub mod memory;
pub mod provider;
pub mod service;

pub use service::{CheckInOutcome, CheckInService, VisitedPlace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    PermissionDenied,
    Unavailable(String),
}

impl Error for LocationError {}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::PermissionDenied => {
                write!(f, "Location access is required for check-ins.")
            }
            Self::Unavailable(why) => write!(f, "Failed to get location: {}", why),
        }
    }
}

#[derive(Debug)]
pub enum CheckInError {
    Location(LocationError),
    PlaceNotFound,
    Provider(Box<dyn Error + Send + Sync>),
}

impl CheckInError {
    pub fn provider<T: Error + Send + Sync + 'static>(why: T) -> Self {
        Self::Provider(Box::new(why))
    }
}

impl Error for CheckInError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Location(why) => Some(why),
            Self::PlaceNotFound => None,
            Self::Provider(why) => Some(why.as_ref()),
        }
    }
}

impl fmt::Display for CheckInError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Location(why) => write!(f, "{}", why),
            Self::PlaceNotFound => write!(f, "Place not found."),
            Self::Provider(why) => write!(f, "{}", why),
        }
    }
}

impl From<LocationError> for CheckInError {
    fn from(value: LocationError) -> Self {
        Self::Location(value)
    }
}

impl From<Box<dyn Error + Send + Sync>> for CheckInError {
    fn from(value: Box<dyn Error + Send + Sync>) -> Self {
        Self::Provider(value)
    }
}

pub type CheckInResult<O> = Result<O, CheckInError>;

pub fn not_found_to_none<O>(result: CheckInResult<O>) -> CheckInResult<Option<O>> {
    if let Err(CheckInError::PlaceNotFound) = result {
        Ok(None)
    } else {
        result.map(Some)
    }
}
