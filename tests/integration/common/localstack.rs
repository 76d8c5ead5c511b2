//! LocalStack test context and utilities.

use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::config::{Credentials, Region};
use flate2::Compression;
use flate2::write::GzEncoder;
use sift_reader_ndjson::S3Fetcher;
use std::io::Write;

/// LocalStack test context providing an S3 client.
pub struct LocalStackTestContext {
    pub s3: S3Client,
    pub endpoint: String,
    pub region: String,
}

impl LocalStackTestContext {
    /// Create a new LocalStack test context.
    ///
    /// Uses the `LOCALSTACK_ENDPOINT` environment variable if set,
    /// otherwise defaults to `http://localhost:4566`.
    pub async fn new() -> Self {
        let endpoint = std::env::var("LOCALSTACK_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:4566".to_string());
        let region = "us-east-1".to_string();

        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(region.clone()))
            .endpoint_url(&endpoint)
            .credentials_provider(Credentials::new("test", "test", None, None, "localstack"))
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(true)
            .build();

        Self {
            s3: S3Client::from_conf(s3_config),
            endpoint,
            region,
        }
    }

    /// Check if LocalStack is available and healthy.
    pub async fn is_available(&self) -> bool {
        // Fails quickly if LocalStack isn't running
        self.s3.list_buckets().send().await.is_ok()
    }

    /// A fetcher sharing this context's client and credentials.
    pub fn fetcher(&self) -> S3Fetcher {
        S3Fetcher::from_client(self.s3.clone())
    }

    /// Create an S3 bucket for testing.
    pub async fn create_bucket(&self, name: &str) -> Result<(), aws_sdk_s3::Error> {
        let buckets = self.s3.list_buckets().send().await?;
        let exists = buckets
            .buckets()
            .iter()
            .any(|b| b.name().unwrap_or_default() == name);

        if !exists {
            self.s3.create_bucket().bucket(name).send().await?;
        }
        Ok(())
    }

    /// Upload an object to S3.
    pub async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
    ) -> Result<(), aws_sdk_s3::Error> {
        self.s3
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(data.into())
            .content_type("application/gzip")
            .send()
            .await?;
        Ok(())
    }

    /// Delete an S3 object.
    pub async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), aws_sdk_s3::Error> {
        self.s3
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await?;
        Ok(())
    }
}

/// Generate concatenated JSON records with ids `1..=num_records`.
///
/// Every third record carries the word `"fizz"`; times advance one minute per
/// record from 2023-01-01T00:00:00Z.
pub fn generate_test_records(num_records: usize) -> String {
    (1..=num_records)
        .map(|i| {
            let words = if i % 3 == 0 { r#"["fizz","n"]"# } else { r#"["n"]"# };
            format!(
                r#"{{"id":{},"time":"2023-01-01T{:02}:{:02}:00Z","words":{}}}"#,
                i,
                (i / 60) % 24,
                i % 60,
                words
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Gzip `data` as a single member.
pub fn gzip(data: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data.as_bytes())
        .expect("Failed to compress test data");
    encoder.finish().expect("Failed to finish gzip stream")
}
