use std::io::Cursor;

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use serde::Deserialize;
use tokio::io::AsyncReadExt;

use super::error::StorageError;
use super::key::BlobKey;
use super::traits::{BlobStore, BoxReader};

/// Connection settings for an S3-compatible bucket.
#[derive(Debug, Deserialize, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    /// Address objects as `{endpoint}/{bucket}/{key}` (MinIO and friends).
    #[serde(default = "default_path_style")]
    pub path_style: bool,
}

fn default_path_style() -> bool {
    true
}

/// Object store backed by an S3-compatible bucket.
pub struct S3BlobStore {
    bucket: Box<Bucket>,
    max_size: u64,
}

impl S3BlobStore {
    pub fn new(config: &S3Config, max_size: u64) -> Result<Self, StorageError> {
        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Backend(format!("invalid credentials: {e}")))?;

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        if config.path_style {
            bucket = bucket.with_path_style();
        }

        Ok(Self { bucket, max_size })
    }

    fn check_status(key: &BlobKey, status: u16) -> Result<(), StorageError> {
        match status {
            200..=299 => Ok(()),
            404 => Err(StorageError::NotFound(key.to_string())),
            other => Err(StorageError::Backend(format!(
                "unexpected status {other} for {key}"
            ))),
        }
    }

    async fn exists(&self, key: &BlobKey) -> Result<bool, StorageError> {
        let (_, status) = self
            .bucket
            .head_object(key.as_str())
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        match Self::check_status(key, status) {
            Ok(()) => Ok(true),
            Err(StorageError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put_stream(&self, key: &BlobKey, reader: BoxReader) -> Result<u64, StorageError> {
        let mut data = Vec::new();
        let read = reader
            .take(self.max_size + 1)
            .read_to_end(&mut data)
            .await? as u64;
        if read > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: read,
                limit: self.max_size,
            });
        }

        let response = self
            .bucket
            .put_object(key.as_str(), &data)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Self::check_status(key, response.status_code())?;

        Ok(read)
    }

    async fn get_stream(&self, key: &BlobKey) -> Result<BoxReader, StorageError> {
        let response = self
            .bucket
            .get_object(key.as_str())
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Self::check_status(key, response.status_code())?;

        Ok(Box::new(Cursor::new(response.bytes().to_vec())))
    }

    async fn delete(&self, key: &BlobKey) -> Result<bool, StorageError> {
        if !self.exists(key).await? {
            return Ok(false);
        }
        let response = self
            .bucket
            .delete_object(key.as_str())
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Self::check_status(key, response.status_code())?;
        Ok(true)
    }
}
