//! CLI argument definitions for s3sift.

use clap::{Parser, ValueEnum};
use sift_reader_ndjson::Compression;

/// Filter gzip-compressed JSON records stored in S3.
///
/// Streams the object, decodes concatenated JSON records of the form
/// `{"id": .., "time": .., "words": [..]}`, and writes every record that
/// matches all given filters to stdout as JSON Lines.
///
/// ## Examples
///
/// Records containing a word:
///   s3sift --input s3://my-bucket/events.json.gz --with-word beta
///
/// Records in a time window:
///   s3sift --input s3://my-bucket/events.json.gz \
///     --from-time 2023-01-01T00:00:00Z --to-time 2023-12-31T23:59:59Z
///
/// Against LocalStack:
///   s3sift --input s3://test/events.json.gz --s3-endpoint http://localhost:4566
#[derive(Parser, Debug)]
#[command(name = "s3sift")]
#[command(version, about, long_about = None)]
pub struct Cli {
    // === Input ===
    /// Object to read (s3://bucket/key or file:///path)
    #[arg(long)]
    pub input: Option<String>,

    /// Compression of the input object
    #[arg(long, value_enum, default_value = "gzip")]
    pub compression: CompressionArg,

    // === Filters ===
    /// Only records with this id (0 disables the filter)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub with_id: i64,

    /// Only records at or after this RFC3339 time
    #[arg(long, default_value = "")]
    pub from_time: String,

    /// Only records at or before this RFC3339 time
    #[arg(long, default_value = "")]
    pub to_time: String,

    /// Only records whose words contain this exact word
    #[arg(long, default_value = "")]
    pub with_word: String,

    // === AWS Configuration ===
    /// AWS region (defaults to the ambient AWS configuration)
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Custom S3 endpoint URL (for LocalStack)
    #[arg(long, env = "SIFT_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    // === Output ===
    /// Print a run summary to stderr
    #[arg(long)]
    pub summary: bool,

    // === Logging ===
    /// Log level
    #[arg(short = 'l', long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

/// Compression of the input object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompressionArg {
    /// Gzip (single or multi-member)
    Gzip,
    /// Plain JSON
    None,
}

impl From<CompressionArg> for Compression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::Gzip => Compression::Gzip,
            CompressionArg::None => Compression::None,
        }
    }
}

/// Log level for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Trace level (most verbose)
    Trace,
    /// Debug level
    Debug,
    /// Info level
    Info,
    /// Warning level (default)
    Warn,
    /// Error level (least verbose)
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
