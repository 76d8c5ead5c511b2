//! Error types for s3sift.
//!
//! This crate provides:
//! - [`SiftError`] - Top-level error enum for every pipeline failure
//! - Domain-specific errors ([`FetchError`], [`DecodeError`])
//! - [`ProcessingStage`] for attributing an error to the pipeline step that raised it
//!
//! Every error is fatal to a run. Nothing here is retried.

use thiserror::Error;

/// Top-level error type for s3sift.
#[derive(Error, Debug)]
pub enum SiftError {
    /// Bad or missing flags, unparsable time bounds, unusable input URI
    #[error("Configuration error: {0}")]
    Config(String),

    /// Object store errors (unreachable, missing object, auth failure)
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Input is not gzip, or the compressed stream is truncated/corrupt
    #[error("Decompression error: {0}")]
    Decompress(String),

    /// A record is malformed JSON or does not fit the record shape
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A selected record could not be serialized or written
    #[error("Emit error: {0}")]
    Emit(String),
}

/// Object store errors.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The locator could not be resolved to a bucket and key
    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// Object or file does not exist
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Credentials were rejected or lack permission
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Any other transport or service failure
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Record decoding errors.
///
/// `record` is the 1-based position of the offending value in the stream.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Bytes are not well-formed JSON
    #[error("Malformed JSON in record {record}: {message}")]
    Malformed { record: u64, message: String },

    /// Well-formed JSON that is not a record (wrong type, missing field)
    #[error("Invalid record shape in record {record}: {message}")]
    Shape { record: u64, message: String },

    /// Stream ended inside a value
    #[error("Truncated record {record}: stream ended mid-value")]
    Truncated { record: u64 },
}

impl DecodeError {
    /// Position of the record that failed to decode.
    pub fn record(&self) -> u64 {
        match self {
            Self::Malformed { record, .. } => *record,
            Self::Shape { record, .. } => *record,
            Self::Truncated { record } => *record,
        }
    }
}

/// Pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    /// Flag validation and filter construction
    Config,

    /// Retrieving the object from the store
    Fetch,

    /// Gzip decoding
    Decompress,

    /// JSON record decoding
    Decode,

    /// Writing selected records
    Emit,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config => write!(f, "Config"),
            Self::Fetch => write!(f, "Fetch"),
            Self::Decompress => write!(f, "Decompress"),
            Self::Decode => write!(f, "Decode"),
            Self::Emit => write!(f, "Emit"),
        }
    }
}

impl SiftError {
    /// The stage that raised this error.
    pub fn stage(&self) -> ProcessingStage {
        match self {
            Self::Config(_) => ProcessingStage::Config,
            Self::Fetch(FetchError::InvalidUri(_)) => ProcessingStage::Config,
            Self::Fetch(_) => ProcessingStage::Fetch,
            Self::Decompress(_) => ProcessingStage::Decompress,
            Self::Decode(_) => ProcessingStage::Decode,
            Self::Emit(_) => ProcessingStage::Emit,
        }
    }
}

/// Result type alias using SiftError.
pub type Result<T> = std::result::Result<T, SiftError>;
