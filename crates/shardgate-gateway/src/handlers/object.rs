//! Object operation handlers
//!
//! Every object operation first confirms the bucket exists on the
//! selected instance: one extra round trip for a clean 404 instead of
//! a backend-specific failure. The check and the following primitive
//! are independent calls with no atomicity between them.

use crate::error::ApiError;
use crate::handlers::validate_id;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use futures::TryStreamExt;
use shardgate_store::{ObjectBody, StorageBackend, StoreError};
use std::sync::Arc;

async fn ensure_bucket(client: &dyn StorageBackend, bucket: &str) -> Result<(), ApiError> {
    if !client.bucket_exists(bucket).await? {
        tracing::info!(bucket = %bucket, "bucket does not exist");
        return Err(ApiError::NotFound("Bucket not found".to_string()));
    }
    Ok(())
}

fn content_length_hint(headers: &HeaderMap) -> Option<i64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

/// PUT /buckets/{bucketName}/objects/{id} - Put object
pub async fn put_object(
    State(state): State<Arc<AppState>>,
    Path((bucket_name, id)): Path<(String, String)>,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, ApiError> {
    validate_id(&id)?;

    let client = state.backend_for(&id)?;
    ensure_bucket(client.as_ref(), &bucket_name).await?;

    let size = content_length_hint(&headers);
    let stream: ObjectBody = Box::pin(
        body.into_data_stream()
            .map_err(|err| StoreError::Stream(err.to_string())),
    );
    client.put_object(&bucket_name, &id, stream, size).await?;

    tracing::info!(bucket = %bucket_name, id = %id, "object stored");
    Ok(StatusCode::OK.into_response())
}

/// GET /buckets/{bucketName}/objects/{id} - Get object
///
/// Streams the payload; Content-Type and Content-Length come from the
/// backend's object metadata. A copy failure after the headers are
/// sent aborts the connection, the 200 cannot be revised.
pub async fn get_object(
    State(state): State<Arc<AppState>>,
    Path((bucket_name, id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    validate_id(&id)?;

    let client = state.backend_for(&id)?;
    ensure_bucket(client.as_ref(), &bucket_name).await?;

    let reader = client.get_object(&bucket_name, &id).await?;
    tracing::debug!(
        bucket = %bucket_name,
        id = %id,
        content_type = %reader.stat.content_type,
        size = reader.stat.size,
        "streaming object"
    );

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, reader.stat.content_type)
        .header(header::CONTENT_LENGTH, reader.stat.size.to_string())
        .body(Body::from_stream(reader.body))
        .unwrap())
}

/// DELETE /buckets/{bucketName}/objects/{id} - Delete object
pub async fn delete_object(
    State(state): State<Arc<AppState>>,
    Path((bucket_name, id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    validate_id(&id)?;

    let client = state.backend_for(&id)?;
    ensure_bucket(client.as_ref(), &bucket_name).await?;

    client.remove_object(&bucket_name, &id).await?;

    tracing::info!(bucket = %bucket_name, id = %id, "object deleted");
    Ok(StatusCode::NO_CONTENT.into_response())
}
