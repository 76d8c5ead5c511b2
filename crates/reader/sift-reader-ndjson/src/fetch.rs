//! Object fetcher trait and the local filesystem implementation.

use crate::locator::ObjectLocator;
use async_trait::async_trait;
use sift_error::{FetchError, Result};
use std::io::ErrorKind;
use std::pin::Pin;
use tokio::io::AsyncRead;
use tracing::debug;

/// A readable byte stream positioned at the start of an object's content.
pub type ByteStream = Pin<Box<dyn AsyncRead + Send>>;

/// Resolves a locator into the raw bytes of the object it names.
///
/// A fetch is attempted once. Failures are returned as-is and never retried.
#[async_trait]
pub trait ObjectFetcher: Send + Sync {
    /// Open the object and return its content as a stream.
    async fn fetch(&self, locator: &ObjectLocator) -> Result<ByteStream>;
}

/// Fetcher for `file://` locators.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFetcher;

#[async_trait]
impl ObjectFetcher for LocalFetcher {
    async fn fetch(&self, locator: &ObjectLocator) -> Result<ByteStream> {
        let ObjectLocator::Local(path) = locator else {
            return Err(FetchError::InvalidUri(format!(
                "Local fetcher cannot read {locator}"
            ))
            .into());
        };

        debug!(path = %path.display(), "Opening local file");

        let file = tokio::fs::File::open(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => FetchError::NotFound(locator.to_string()),
            ErrorKind::PermissionDenied => {
                FetchError::AccessDenied(format!("{locator}: {e}"))
            }
            _ => FetchError::Transport(format!("Failed to open {locator}: {e}")),
        })?;

        Ok(Box::pin(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_error::SiftError;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_local_fetch_reads_content() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"payload").unwrap();

        let locator = ObjectLocator::Local(file.path().to_path_buf());
        let mut stream = LocalFetcher.fetch(&locator).await.unwrap();

        let mut content = Vec::new();
        stream.read_to_end(&mut content).await.unwrap();
        assert_eq!(content, b"payload");
    }

    #[tokio::test]
    async fn test_local_fetch_not_found() {
        let locator = ObjectLocator::Local("/nonexistent/data.json.gz".into());
        let result = LocalFetcher.fetch(&locator).await;

        match result.err().unwrap() {
            SiftError::Fetch(FetchError::NotFound(_)) => {}
            e => panic!("Expected NotFound error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_local_fetch_rejects_s3_locator() {
        let locator = ObjectLocator::S3 {
            bucket: "bucket".to_string(),
            key: "key".to_string(),
        };
        let result = LocalFetcher.fetch(&locator).await;
        assert!(matches!(
            result.err().unwrap(),
            SiftError::Fetch(FetchError::InvalidUri(_))
        ));
    }
}
