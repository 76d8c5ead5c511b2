//! Core types for s3sift.
//!
//! This crate provides the foundational types used throughout the system:
//! - [`Record`] - One decoded JSON object (id, timestamp, word list)
//! - [`rfc3339`] - Serde helpers that keep timestamps lossless across parse/serialize

pub mod record;

pub use record::*;
