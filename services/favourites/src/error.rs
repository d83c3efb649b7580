use axum::response::{IntoResponse, Response};

use shop_core::error::{ErrorEnvelope, hash_marked, star_marked};
use shop_domain::peer::Dependency;

use crate::domain::types::FavouriteKey;

/// Message returned for a duplicate composite key, whatever the driver said.
pub const DUPLICATE_FAVOURITE_MESSAGE: &str =
    "Favourite already exists for the given userId, productId and likeDate";

/// Failure of a single outbound lookup to a peer service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("peer responded with status {0}")]
    Status(u16),
    #[error("undecodable response body: {0}")]
    Decode(String),
    #[error("peer returned id {actual}, expected {expected}")]
    IdMismatch { expected: i32, actual: i32 },
}

/// Failure reported by the favourite store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The composite key is already taken.
    #[error("unique constraint violation on favourite key")]
    UniqueViolation,
    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}

/// Favourites service error variants.
#[derive(Debug, thiserror::Error)]
pub enum FavouritesServiceError {
    /// Malformed input; carries the first field-level message.
    #[error("{0}")]
    Validation(String),
    #[error("Favourite with id: [{0}] not found!")]
    FavouriteNotFound(FavouriteKey),
    #[error("Failed to fetch {dependency} data for id {id}: {source}")]
    FetchFailed {
        dependency: Dependency,
        id: i32,
        #[source]
        source: FetchError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl FavouritesServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::FavouriteNotFound(_) => "FAVOURITE_NOT_FOUND",
            Self::FetchFailed { .. } => "FETCH_FAILED",
            Self::Store(StoreError::UniqueViolation) => "FAVOURITE_ALREADY_EXISTS",
            Self::Store(StoreError::Other(_)) => "STORE_FAILURE",
        }
    }

    /// Classify into the response envelope.
    ///
    /// Not-found is reported as 400, not 404; store failures are all 409.
    pub fn envelope(&self) -> ErrorEnvelope {
        let message = self.to_string();
        match self {
            Self::Validation(_) => ErrorEnvelope::bad_request(self.kind(), star_marked(&message)),
            Self::FavouriteNotFound(_) | Self::FetchFailed { .. } => {
                ErrorEnvelope::bad_request(self.kind(), hash_marked(&message))
            }
            Self::Store(StoreError::UniqueViolation) => {
                ErrorEnvelope::conflict(self.kind(), DUPLICATE_FAVOURITE_MESSAGE)
            }
            Self::Store(StoreError::Other(_)) => {
                ErrorEnvelope::conflict(self.kind(), hash_marked(&message))
            }
        }
    }
}

impl IntoResponse for FavouritesServiceError {
    fn into_response(self) -> Response {
        if let Self::Store(StoreError::Other(ref e)) = self {
            tracing::error!(error = %format!("{e:#}"), kind = self.kind(), "store failure");
        }
        self.envelope().into_response()
    }
}
