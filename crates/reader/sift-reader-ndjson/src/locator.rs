//! Source locator parsing.

use sift_error::{Result, SiftError};
use std::fmt;
use std::path::PathBuf;

/// Parsed form of an input URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectLocator {
    /// An object in an S3 bucket (`s3://bucket/key`)
    S3 { bucket: String, key: String },

    /// A file on the local filesystem (`file:///path`)
    Local(PathBuf),
}

impl ObjectLocator {
    /// Parse an input URI.
    ///
    /// The S3 key is taken verbatim from the text after `s3://{bucket}/`, so
    /// keys containing `?`, `#` or spaces are not altered by URL normalization.
    pub fn parse(uri: &str) -> Result<Self> {
        let url = url::Url::parse(uri)
            .map_err(|e| SiftError::Config(format!("Invalid input URI '{uri}': {e}")))?;

        match url.scheme() {
            "s3" => {
                let rest = uri.split_once("://").map_or("", |(_, rest)| rest);
                let (bucket, key) = rest.split_once('/').unwrap_or((rest, ""));

                if bucket.is_empty() {
                    return Err(SiftError::Config(format!(
                        "Missing bucket in S3 URI: {uri}"
                    )));
                }
                if key.is_empty() {
                    return Err(SiftError::Config(format!("Missing key in S3 URI: {uri}")));
                }

                Ok(Self::S3 {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                })
            }
            "file" => {
                let path = url.to_file_path().map_err(|()| {
                    SiftError::Config(format!("Invalid file URI (expected file:///path): {uri}"))
                })?;
                Ok(Self::Local(path))
            }
            other => Err(SiftError::Config(format!(
                "Unsupported URI scheme '{other}' in '{uri}', expected s3:// or file://"
            ))),
        }
    }
}

impl fmt::Display for ObjectLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::S3 { bucket, key } => write!(f, "s3://{bucket}/{key}"),
            Self::Local(path) => write!(f, "file://{}", path.display()),
        }
    }
}
