//! Gateway error type and HTTP translation
//!
//! Taxonomy: validation failures map to 400, missing buckets/objects
//! to 404, bucket conflicts to 409, admission-gate rejection to 429,
//! and everything else collapses to a logged 500 with a generic body
//! so no backend detail leaks to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shardgate_store::StoreError;
use thiserror::Error;

/// Gateway-level request outcome
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed identifier or request body
    #[error("{0}")]
    Validation(String),

    /// Bucket or object absent
    #[error("{0}")]
    NotFound(String),

    /// Bucket already exists or is not empty
    #[error("{0}")]
    Conflict(String),

    /// Rejected by the admission gate
    #[error("Too Many Requests")]
    RateLimited,

    /// Backend or gateway failure; detail is logged, never returned
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::BucketNotFound(_) => Self::NotFound("Bucket not found".to_string()),
            StoreError::ObjectNotFound { .. } => Self::NotFound("Object not found".to_string()),
            StoreError::BucketAlreadyOwned(_) => {
                Self::Conflict("Bucket already exists".to_string())
            }
            StoreError::BucketNameTaken(_) => {
                Self::Conflict("Bucket name already taken".to_string())
            }
            StoreError::BucketNotEmpty(_) => {
                Self::Conflict("The bucket you tried to delete is not empty".to_string())
            }
            other => Self::Internal(other.to_string()),
        }
    }
}

impl ApiError {
    /// HTTP status for this outcome
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_gateway_outcomes() {
        let cases = [
            (
                StoreError::BucketNotFound("b".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                StoreError::ObjectNotFound {
                    bucket: "b".into(),
                    key: "k".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                StoreError::BucketAlreadyOwned("b".into()),
                StatusCode::CONFLICT,
            ),
            (
                StoreError::BucketNameTaken("b".into()),
                StatusCode::CONFLICT,
            ),
            (StoreError::BucketNotEmpty("b".into()), StatusCode::CONFLICT),
            (
                StoreError::Backend("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                StoreError::Stream("cut".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (store_err, status) in cases {
            assert_eq!(ApiError::from(store_err).status_code(), status);
        }
    }

    #[test]
    fn conflict_messages_match_api_contract() {
        let err = ApiError::from(StoreError::BucketAlreadyOwned("b1".into()));
        assert_eq!(err.to_string(), "Bucket already exists");
        let err = ApiError::from(StoreError::BucketNameTaken("b1".into()));
        assert_eq!(err.to_string(), "Bucket name already taken");
    }
}
