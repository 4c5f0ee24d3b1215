//! S3-compatible production backend
//!
//! Wraps `aws-sdk-s3` configured for MinIO-style nodes: custom
//! endpoint, static credentials, path-style addressing, plain HTTP.
//! Backend failures are classified by their S3 error code and
//! translated into [`StoreError`] variants at this boundary.

use crate::backend::{BackendFactory, ObjectBody, ObjectReader, ObjectStat, StorageBackend};
use crate::error::{Result, StoreError};
use crate::instance::StorageInstance;
use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use futures::{StreamExt, TryStreamExt};
use http_body::Frame;
use http_body_util::StreamBody;
use tokio_stream::wrappers::ReceiverStream;

/// Fallback content type when the backend reports none
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Builds one [`S3Backend`] per request. No pooling: every request
/// pays full client-construction cost, which is pure in-memory work.
#[derive(Debug, Default, Clone)]
pub struct S3BackendFactory;

impl S3BackendFactory {
    pub fn new() -> Self {
        Self
    }
}

impl BackendFactory for S3BackendFactory {
    fn build(&self, instance: &StorageInstance) -> Result<Box<dyn StorageBackend>> {
        if instance.endpoint.is_empty()
            || instance.access_key.is_empty()
            || instance.secret_key.is_empty()
        {
            return Err(StoreError::InvalidCredentials(instance.endpoint.clone()));
        }

        let credentials = Credentials::new(
            instance.access_key.clone(),
            instance.secret_key.clone(),
            None,
            None,
            "shardgate-static",
        );
        let config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .endpoint_url(endpoint_url(&instance.endpoint))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Ok(Box::new(S3Backend {
            client: Client::from_conf(config),
        }))
    }
}

/// Nodes are addressed as `host:port`; the fleet speaks plain HTTP.
fn endpoint_url(endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("http://{}", endpoint)
    }
}

/// One request's client handle against a single backend instance
pub struct S3Backend {
    client: Client,
}

#[async_trait]
impl StorageBackend for S3Backend {
    async fn make_bucket(&self, bucket: &str) -> Result<()> {
        self.client
            .create_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|err| classify(err, bucket, None))?;
        Ok(())
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                if err
                    .as_service_error()
                    .map(|e| e.is_not_found())
                    .unwrap_or(false)
                {
                    Ok(false)
                } else {
                    Err(classify(err, bucket, None))
                }
            }
        }
    }

    async fn remove_bucket(&self, bucket: &str) -> Result<()> {
        self.client
            .delete_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|err| classify(err, bucket, None))?;
        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: ObjectBody,
        size: Option<i64>,
    ) -> Result<()> {
        // The SDK body must be Sync; pump the inbound chunks through a
        // channel instead of buffering the payload.
        let (tx, rx) = tokio::sync::mpsc::channel::<std::result::Result<Bytes, StoreError>>(16);
        tokio::spawn(async move {
            let mut body = body;
            while let Some(item) = body.next().await {
                let failed = item.is_err();
                if tx.send(item).await.is_err() || failed {
                    break;
                }
            }
        });
        let frames = ReceiverStream::new(rx)
            .map_ok(Frame::data)
            .map_err(|err| Box::new(err) as Box<dyn std::error::Error + Send + Sync>);

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .set_content_length(size)
            .body(ByteStream::from_body_1_x(StreamBody::new(frames)))
            .send()
            .await
            .map_err(|err| classify(err, bucket, Some(key)))?;
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectReader> {
        let resp = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| classify(err, bucket, Some(key)))?;

        let stat = ObjectStat {
            content_type: resp
                .content_type()
                .unwrap_or(DEFAULT_CONTENT_TYPE)
                .to_string(),
            size: resp.content_length().unwrap_or(0),
        };

        let body = futures::stream::try_unfold(resp.body, |mut stream| async move {
            match stream.try_next().await {
                Ok(Some(chunk)) => Ok(Some((chunk, stream))),
                Ok(None) => Ok(None),
                Err(err) => Err(StoreError::Stream(err.to_string())),
            }
        });

        Ok(ObjectReader {
            stat,
            body: Box::pin(body),
        })
    }

    async fn remove_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| classify(err, bucket, Some(key)))?;
        Ok(())
    }
}

/// Translate an SDK error into a [`StoreError`] by S3 error code
fn classify<E, R>(err: SdkError<E, R>, bucket: &str, key: Option<&str>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    match err.code() {
        Some("NoSuchBucket") => StoreError::BucketNotFound(bucket.to_string()),
        Some("NoSuchKey") => StoreError::ObjectNotFound {
            bucket: bucket.to_string(),
            key: key.unwrap_or_default().to_string(),
        },
        Some("BucketNotEmpty") => StoreError::BucketNotEmpty(bucket.to_string()),
        Some("BucketAlreadyOwnedByYou") => StoreError::BucketAlreadyOwned(bucket.to_string()),
        Some("BucketAlreadyExists") => StoreError::BucketNameTaken(bucket.to_string()),
        _ => StoreError::Backend(format!("{}", DisplayErrorContext(&err))),
    }
}
