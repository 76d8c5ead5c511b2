//! Record selection for s3sift.
//!
//! A record is selected when every active predicate accepts it:
//!
//! - [`IdFilter`] - exact id match
//! - [`TimeRangeFilter`] - inclusive lower and/or upper time bound
//! - [`WordFilter`] - exact, case-sensitive word membership
//!
//! [`FilterSet`] holds the predicates configured for a run and combines them
//! with AND logic.
//!
//! # Example
//!
//! ```
//! use sift_filter::{FilterSet, RecordFilter};
//! use sift_types::{Record, rfc3339};
//!
//! let filters = FilterSet::from_options(0, "2023-01-01T00:00:00Z", "", "alpha").unwrap();
//!
//! let time = rfc3339::parse("2023-06-01T00:00:00Z").unwrap();
//! let record = Record::new(7, time, vec!["alpha".to_string()]);
//!
//! assert!(filters.matches(&record));
//! ```

mod id;
mod set;
mod time;
mod word;

pub use id::IdFilter;
pub use set::FilterSet;
pub use time::TimeRangeFilter;
pub use word::WordFilter;

use sift_types::Record;

/// A predicate over decoded records.
pub trait RecordFilter: Send + Sync {
    /// Whether the record is selected by this predicate.
    fn matches(&self, record: &Record) -> bool;

    /// Short human-readable form, used in logs.
    fn description(&self) -> String;
}
