//! Streaming JSON record reader with S3 support.
//!
//! This crate turns an object locator into a lazy sequence of [`Record`]s:
//!
//! 1. [`ObjectFetcher`] resolves an `s3://bucket/key` (or `file://`) locator to a byte stream
//! 2. [`decompress`] wraps that stream in a gzip decoder
//! 3. [`RecordDecoder`] parses concatenated JSON objects one at a time
//!
//! [`RecordReader`] wires the three together.
//!
//! # Example
//!
//! ```ignore
//! use sift_reader_ndjson::{RecordReader, RecordReaderConfig};
//!
//! let reader = RecordReader::new(RecordReaderConfig::new().with_region("us-east-1"));
//! let mut records = reader.open("s3://bucket/data.json.gz").await?;
//!
//! while let Some(record) = records.next_record().await? {
//!     println!("{}", record.id());
//! }
//! ```
//!
//! [`Record`]: sift_types::Record

mod compression;
mod decoder;
mod fetch;
mod locator;
mod reader;
mod s3;

pub use compression::{Compression, decompress};
pub use decoder::{DEFAULT_CHUNK_SIZE, RecordDecoder};
pub use fetch::{ByteStream, LocalFetcher, ObjectFetcher};
pub use locator::ObjectLocator;
pub use reader::{RecordReader, RecordReaderConfig};
pub use s3::{S3Fetcher, S3FetcherConfig};
