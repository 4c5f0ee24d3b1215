//! Bucket operation handlers
//!
//! Bucket requests route by the bucket name. Object requests route by
//! the object id, so a bucket and its objects may live on different
//! backend instances.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use shardgate_store::StoreError;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBucketRequest {
    pub bucket_name: String,
}

/// POST /buckets - Create bucket
pub async fn create_bucket(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let req: CreateBucketRequest = serde_json::from_slice(&body).map_err(|err| {
        tracing::warn!(error = %err, "failed to decode create bucket request");
        ApiError::Validation("Invalid request body".to_string())
    })?;

    let client = state.backend_for(&req.bucket_name)?;
    client.make_bucket(&req.bucket_name).await?;

    tracing::info!(bucket = %req.bucket_name, "bucket created");
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "Bucket created successfully" })),
    )
        .into_response())
}

/// DELETE /buckets/{bucketName} - Delete bucket
pub async fn delete_bucket(
    State(state): State<Arc<AppState>>,
    Path(bucket_name): Path<String>,
) -> Result<Response, ApiError> {
    let client = state.backend_for(&bucket_name)?;

    match client.remove_bucket(&bucket_name).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(StoreError::BucketNotEmpty(_)) => {
            tracing::info!(bucket = %bucket_name, "attempted to delete non-empty bucket");
            Err(ApiError::Conflict(
                "The bucket you tried to delete is not empty".to_string(),
            ))
        }
        Err(StoreError::BucketNotFound(_)) => {
            tracing::info!(bucket = %bucket_name, "attempted to delete non-existent bucket");
            Err(ApiError::NotFound(
                "The specified bucket does not exist".to_string(),
            ))
        }
        Err(err) => Err(err.into()),
    }
}
