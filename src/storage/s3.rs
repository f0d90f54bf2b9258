//! AWS S3 storage implementation.
//!
//! Documents are stored as `{prefix}/{file}` in a single bucket, using the
//! same file names as the local backend.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{AppError, Result};
use crate::models::{CURATED_FILE, CuratedSnapshot, Region, RegionSnapshot};
use crate::storage::SnapshotStorage;

/// S3-based snapshot storage.
pub struct S3Storage {
    client: Client,
    bucket: String,
    prefix: String,
}

impl S3Storage {
    /// Create a new S3 storage instance.
    pub fn new(client: Client, bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }

    /// Create S3 storage from environment configuration.
    ///
    /// Reads `S3_BUCKET` (required) and `S3_PREFIX` (default `stations`).
    pub async fn from_env() -> Result<Self> {
        let bucket = std::env::var("S3_BUCKET")
            .map_err(|_| AppError::config("S3_BUCKET must be set for S3 storage"))?;
        let prefix = std::env::var("S3_PREFIX").unwrap_or_else(|_| "stations".to_string());

        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Ok(Self::new(Client::new(&config), bucket, prefix))
    }

    fn key(&self, file: &str) -> String {
        let prefix = self.prefix.trim_end_matches('/');
        if prefix.is_empty() {
            file.to_string()
        } else {
            format!("{prefix}/{file}")
        }
    }

    fn uri(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket, key)
    }

    /// Read JSON from S3, `None` when the key does not exist.
    async fn read_json<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>> {
        let key = self.key(file);
        let result = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await;

        match result {
            Ok(output) => {
                let bytes = output.body.collect().await.map_err(AppError::storage)?;
                Ok(Some(serde_json::from_slice(&bytes.into_bytes())?))
            }
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    log::info!("No existing document at {}", self.uri(&key));
                    Ok(None)
                } else {
                    Err(AppError::storage(service_err))
                }
            }
        }
    }

    /// Write JSON to S3.
    async fn write_json<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<String> {
        let key = self.key(file);
        let json = serde_json::to_vec_pretty(value)?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(json))
            .content_type("application/json")
            .send()
            .await
            .map_err(AppError::storage)?;

        Ok(self.uri(&key))
    }
}

#[async_trait]
impl SnapshotStorage for S3Storage {
    async fn write_curated(&self, snapshot: &CuratedSnapshot) -> Result<()> {
        let location = self.write_json(CURATED_FILE, snapshot).await?;
        log::info!("Wrote {} stations to {}", snapshot.total_stations, location);
        Ok(())
    }

    async fn write_region(&self, snapshot: &RegionSnapshot) -> Result<()> {
        let location = self
            .write_json(&snapshot.region.file_name(), snapshot)
            .await?;
        log::info!(
            "Wrote {} {} stations to {}",
            snapshot.total_stations,
            snapshot.region,
            location
        );
        Ok(())
    }

    async fn read_curated(&self) -> Result<Option<CuratedSnapshot>> {
        self.read_json(CURATED_FILE).await
    }

    async fn read_region(&self, region: Region) -> Result<Option<RegionSnapshot>> {
        self.read_json(&region.file_name()).await
    }

    fn location(&self) -> String {
        self.uri(&self.key(""))
    }
}
