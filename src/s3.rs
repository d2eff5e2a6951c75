//! `aws-sdk-s3` backed implementations of the listing and download collaborators.
//!
//! Listing covers a single `ListObjectsV2` page. Retries and timeouts are whatever
//! the SDK client is configured with.

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::Client;
use tracing::{debug, error, info, warn};

use crate::config::S3Config;
use crate::contract::{DownloadError, Downloader, ListedObject, ListingClient, ListingError};

/// Builds an S3 client from the default AWS provider chain plus the overrides in `config`.
pub async fn connect(config: &S3Config) -> Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(region) = &config.region {
        loader = loader.region(aws_config::Region::new(region.clone()));
    }
    if let Some(endpoint_url) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint_url);
    }
    let sdk_config = loader.load().await;

    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(config.force_path_style)
        .build();
    info!(
        bucket = %config.bucket,
        region = ?sdk_config.region(),
        "S3 client constructed"
    );
    Client::from_conf(s3_config)
}

pub struct S3ListingClient {
    client: Client,
    bucket: String,
    prefix: Option<String>,
}

impl S3ListingClient {
    pub fn new(client: Client, config: &S3Config) -> Self {
        Self {
            client,
            bucket: config.bucket.clone(),
            prefix: config.prefix.clone(),
        }
    }
}

#[async_trait]
impl ListingClient for S3ListingClient {
    async fn list_objects(&self) -> Result<Vec<ListedObject>, ListingError> {
        debug!(bucket = %self.bucket, prefix = ?self.prefix, "Sending ListObjectsV2");
        let output = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .set_prefix(self.prefix.clone())
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                error!(bucket = %self.bucket, error = %message, "ListObjectsV2 failed");
                ListingError::from(format!("ListObjectsV2 on {}: {message}", self.bucket))
            })?;

        let objects = output
            .contents()
            .iter()
            .filter_map(|object| match object.key() {
                Some(key) => Some(ListedObject::new(key, object.size().unwrap_or_default())),
                None => {
                    warn!(bucket = %self.bucket, "Skipping listed object without a key");
                    None
                }
            })
            .collect::<Vec<_>>();

        if output.is_truncated().unwrap_or(false) {
            warn!(
                bucket = %self.bucket,
                listed = objects.len(),
                "Listing truncated, only the first page is served"
            );
        }
        Ok(objects)
    }
}

pub struct S3Downloader {
    client: Client,
    bucket: String,
}

impl S3Downloader {
    pub fn new(client: Client, config: &S3Config) -> Self {
        Self {
            client,
            bucket: config.bucket.clone(),
        }
    }
}

#[async_trait]
impl Downloader for S3Downloader {
    async fn download(&self, key: &str) -> Result<Vec<u8>, DownloadError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                DownloadError::from(format!(
                    "GetObject {}/{key}: {}",
                    self.bucket,
                    DisplayErrorContext(&e)
                ))
            })?;

        let body = output.body.collect().await?;
        Ok(body.into_bytes().to_vec())
    }
}
