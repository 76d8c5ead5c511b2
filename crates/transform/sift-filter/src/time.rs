//! Time range matching.
//!
//! Bounds are compared as instants, so `2023-01-01T05:30:00+05:30` and
//! `2023-01-01T00:00:00Z` are equal for filtering purposes.

use crate::RecordFilter;
use sift_types::{Record, Timestamp, rfc3339};

/// Selects records whose time lies within inclusive bounds.
///
/// Either bound may be absent, in which case that side is unbounded.
///
/// # Example
///
/// ```
/// use sift_filter::{RecordFilter, TimeRangeFilter};
/// use sift_types::{Record, rfc3339};
///
/// let from = rfc3339::parse("2023-01-01T00:00:00Z").unwrap();
/// let filter = TimeRangeFilter::new().with_from(from);
///
/// // The bound itself is included
/// assert!(filter.matches(&Record::new(1, from, vec![])));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRangeFilter {
    /// Include records at or after this time
    from: Option<Timestamp>,
    /// Include records at or before this time
    to: Option<Timestamp>,
}

impl TimeRangeFilter {
    /// Create a filter with no bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inclusive lower bound.
    pub fn with_from(mut self, time: Timestamp) -> Self {
        self.from = Some(time);
        self
    }

    /// Set the inclusive upper bound.
    pub fn with_to(mut self, time: Timestamp) -> Self {
        self.to = Some(time);
        self
    }

    /// Whether `time` lies within the bounds.
    pub fn contains(&self, time: &Timestamp) -> bool {
        if let Some(from) = &self.from {
            if time < from {
                return false;
            }
        }
        if let Some(to) = &self.to {
            if time > to {
                return false;
            }
        }
        true
    }

    /// The lower bound, if set.
    pub fn from(&self) -> Option<&Timestamp> {
        self.from.as_ref()
    }

    /// The upper bound, if set.
    pub fn to(&self) -> Option<&Timestamp> {
        self.to.as_ref()
    }

    /// Check if this filter has any bound.
    pub fn has_constraints(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    /// Whether the bounds exclude every instant (`from > to`).
    pub fn is_empty_range(&self) -> bool {
        matches!((&self.from, &self.to), (Some(from), Some(to)) if from > to)
    }
}

impl RecordFilter for TimeRangeFilter {
    fn matches(&self, record: &Record) -> bool {
        self.contains(record.time())
    }

    fn description(&self) -> String {
        match (&self.from, &self.to) {
            (Some(from), Some(to)) => format!(
                "time(from={}, to={})",
                rfc3339::format(from),
                rfc3339::format(to)
            ),
            (Some(from), None) => format!("time(from={})", rfc3339::format(from)),
            (None, Some(to)) => format!("time(to={})", rfc3339::format(to)),
            (None, None) => "time(any)".to_string(),
        }
    }
}
