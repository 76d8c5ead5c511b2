//! Filter pipeline for s3sift.
//!
//! This crate provides the runtime half of a run:
//!
//! - [`Pipeline`] - drains a record stream through a [`FilterSet`] into a destination
//! - [`RecordDestination`] and [`JsonLinesDestination`] - where selected records go
//! - [`PipelineStats`] - counters and timing for one run
//!
//! # Example
//!
//! ```ignore
//! use sift_filter::FilterSet;
//! use sift_reader_ndjson::{RecordReader, RecordReaderConfig};
//! use sift_runner::{JsonLinesDestination, Pipeline};
//!
//! let reader = RecordReader::new(RecordReaderConfig::new());
//! let filters = FilterSet::from_options(0, "", "", "beta")?;
//! let mut stdout = JsonLinesDestination::stdout();
//!
//! let stats = Pipeline::new(reader, filters)
//!     .run("s3://bucket/data.json.gz", &mut stdout)
//!     .await?;
//! ```
//!
//! [`FilterSet`]: sift_filter::FilterSet

pub mod destination;
mod pipeline;
mod stats;

pub use destination::{JsonLinesDestination, RecordDestination};
pub use pipeline::Pipeline;
pub use stats::PipelineStats;
