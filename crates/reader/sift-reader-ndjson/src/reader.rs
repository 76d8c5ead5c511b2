//! Record reader wiring fetch, decompression, and decoding together.
//!
//! The reader streams an object with bounded memory: nothing beyond the
//! decompressor's window and one record's worth of bytes is held at a time.

use crate::compression::{Compression, decompress};
use crate::decoder::{DEFAULT_CHUNK_SIZE, RecordDecoder};
use crate::fetch::{LocalFetcher, ObjectFetcher};
use crate::locator::ObjectLocator;
use crate::s3::{S3Fetcher, S3FetcherConfig};
use sift_error::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Configuration for the record reader.
#[derive(Debug, Clone)]
pub struct RecordReaderConfig {
    /// AWS region for S3 access (ambient region when unset)
    pub region: Option<String>,

    /// Optional S3 endpoint URL (for LocalStack)
    pub endpoint: Option<String>,

    /// Compression of the source object
    pub compression: Compression,

    /// Minimum number of uncompressed bytes requested per read
    pub chunk_size: usize,
}

impl Default for RecordReaderConfig {
    fn default() -> Self {
        Self {
            region: None,
            endpoint: None,
            compression: Compression::Gzip,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl RecordReaderConfig {
    /// Create a new configuration for gzip input with ambient AWS settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the AWS region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the S3 endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the source compression.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Set the read chunk size.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    fn s3_config(&self) -> S3FetcherConfig {
        let mut config = S3FetcherConfig::new();
        if let Some(region) = &self.region {
            config = config.with_region(region);
        }
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint);
        }
        config
    }
}

/// Opens input URIs as lazy record sequences.
///
/// By default the fetcher is picked from the URI scheme (`s3://` or `file://`).
/// A fixed fetcher can be injected with [`RecordReader::with_fetcher`].
pub struct RecordReader {
    config: RecordReaderConfig,
    fetcher: Option<Arc<dyn ObjectFetcher>>,
}

impl RecordReader {
    /// Create a new reader with the given configuration.
    pub fn new(config: RecordReaderConfig) -> Self {
        Self {
            config,
            fetcher: None,
        }
    }

    /// Create a reader that always uses `fetcher`.
    pub fn with_fetcher(config: RecordReaderConfig, fetcher: Arc<dyn ObjectFetcher>) -> Self {
        Self {
            config,
            fetcher: Some(fetcher),
        }
    }

    /// Create a reader for local files only (no S3 support).
    pub fn local_only() -> Self {
        Self::with_fetcher(RecordReaderConfig::new(), Arc::new(LocalFetcher))
    }

    /// The reader's configuration.
    pub fn config(&self) -> &RecordReaderConfig {
        &self.config
    }

    /// Pick the fetcher for a locator.
    ///
    /// The S3 client is only built when an `s3://` locator is opened.
    async fn fetcher_for(&self, locator: &ObjectLocator) -> Arc<dyn ObjectFetcher> {
        if let Some(fetcher) = &self.fetcher {
            return Arc::clone(fetcher);
        }

        match locator {
            ObjectLocator::S3 { .. } => {
                debug!(
                    region = ?self.config.region,
                    endpoint = ?self.config.endpoint,
                    "Creating S3 fetcher"
                );
                Arc::new(S3Fetcher::new(&self.config.s3_config()).await)
            }
            ObjectLocator::Local(_) => Arc::new(LocalFetcher),
        }
    }

    /// Open `uri` and return a decoder positioned at its first record.
    ///
    /// Fetch failures and a wrong compression signature are reported here;
    /// decode and truncation failures surface from the returned decoder.
    pub async fn open(&self, uri: &str) -> Result<RecordDecoder> {
        info!(uri = uri, compression = ?self.config.compression, "Opening object for streaming");

        let locator = ObjectLocator::parse(uri)?;
        let fetcher = self.fetcher_for(&locator).await;

        let raw = fetcher.fetch(&locator).await?;
        let stream = decompress(raw, self.config.compression).await?;

        debug!(uri = uri, "Object opened, decoding records");

        Ok(RecordDecoder::new(stream)
            .with_chunk_size(self.config.chunk_size)
            .with_compression(self.config.compression))
    }
}
