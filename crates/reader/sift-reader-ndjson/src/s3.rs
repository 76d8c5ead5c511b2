//! S3 object fetcher.

use crate::fetch::{ByteStream, ObjectFetcher};
use crate::locator::ObjectLocator;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::operation::get_object::GetObjectError;
use sift_error::{FetchError, Result};
use tracing::debug;

/// Configuration for S3 access.
///
/// Credentials always come from the ambient AWS provider chain
/// (environment, profile, IMDS).
#[derive(Debug, Clone, Default)]
pub struct S3FetcherConfig {
    /// AWS region (falls back to the ambient region when unset)
    pub region: Option<String>,

    /// Custom endpoint URL (for LocalStack)
    pub endpoint: Option<String>,
}

impl S3FetcherConfig {
    /// Create a configuration that relies entirely on ambient settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the AWS region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set a custom endpoint (for LocalStack).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
}

/// Fetcher for `s3://` locators backed by the AWS SDK.
#[derive(Clone)]
pub struct S3Fetcher {
    client: Client,
}

impl S3Fetcher {
    /// Create a new S3 fetcher from the ambient AWS configuration.
    ///
    /// A custom endpoint switches to path-style addressing, which is what
    /// LocalStack and most S3-compatible stores expect.
    pub async fn new(config: &S3FetcherConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(aws_sdk_s3::config::Region::new(region.clone()));
        }
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.endpoint.is_some())
            .build();

        Self {
            client: Client::from_conf(s3_config),
        }
    }

    /// Wrap an already-configured client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectFetcher for S3Fetcher {
    async fn fetch(&self, locator: &ObjectLocator) -> Result<ByteStream> {
        let ObjectLocator::S3 { bucket, key } = locator else {
            return Err(FetchError::InvalidUri(format!(
                "S3 fetcher cannot read {locator}"
            ))
            .into());
        };

        debug!(bucket = %bucket, key = %key, "Requesting object from S3");

        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| classify_get_object_error(locator, e))?;

        debug!(
            bucket = %bucket,
            key = %key,
            content_length = output.content_length().unwrap_or(0),
            content_encoding = output.content_encoding().unwrap_or("none"),
            "Streaming object body"
        );

        Ok(Box::pin(output.body.into_async_read()))
    }
}

/// Map a GetObject failure onto the fetch error taxonomy.
fn classify_get_object_error(
    locator: &ObjectLocator,
    error: SdkError<GetObjectError>,
) -> FetchError {
    if error
        .as_service_error()
        .is_some_and(GetObjectError::is_no_such_key)
    {
        return FetchError::NotFound(locator.to_string());
    }

    let status = error.raw_response().map(|r| r.status().as_u16());
    let detail = DisplayErrorContext(&error);

    match status {
        Some(404) => FetchError::NotFound(format!("{locator}: {detail}")),
        Some(401) | Some(403) => FetchError::AccessDenied(format!("{locator}: {detail}")),
        _ => FetchError::Transport(format!("Failed to get {locator}: {detail}")),
    }
}
