use std::time::Duration;

use serde::Serialize;

use crate::region::RegionKind;

/// Why a region source could not deliver a tier.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed data: {0}")]
    Parse(String),

    #[error("fetch timed out after {0:?}")]
    Timeout(Duration),
}

/// Coarse outcome of a failed fetch, as kept in the catalog's failure log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FetchErrorKind {
    NotFound,
    TransportFailure,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::NotFound(_) => FetchErrorKind::NotFound,
            _ => FetchErrorKind::TransportFailure,
        }
    }
}

/// One failed tier fetch. Countries have no code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchFailure {
    pub kind: RegionKind,
    pub iso3: Option<String>,
    pub error: FetchErrorKind,
}
