//! The set of predicates configured for a run.

use crate::{IdFilter, RecordFilter, TimeRangeFilter, WordFilter};
use sift_error::{Result, SiftError};
use sift_types::{Record, Timestamp, rfc3339};
use tracing::{debug, warn};

/// Active selection criteria, combined with AND logic.
///
/// Absent criteria are vacuously true, so an empty set selects every record.
/// Predicates are evaluated cheapest first and evaluation stops at the first
/// rejection.
///
/// # Example
///
/// ```
/// use sift_filter::FilterSet;
/// use sift_types::rfc3339;
///
/// let filters = FilterSet::new()
///     .with_id(42)
///     .with_from_time(rfc3339::parse("2023-01-01T00:00:00Z").unwrap())
///     .with_word("alpha");
///
/// assert_eq!(filters.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    id: Option<IdFilter>,
    time: TimeRangeFilter,
    word: Option<WordFilter>,
}

impl FilterSet {
    /// Create a set with no criteria (selects everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw CLI values.
    ///
    /// `with_id == 0` and empty strings mean the criterion is absent. Time
    /// bounds must be RFC3339; anything else is a configuration error.
    pub fn from_options(
        with_id: i64,
        from_time: &str,
        to_time: &str,
        with_word: &str,
    ) -> Result<Self> {
        let mut filters = Self::new();

        if with_id != 0 {
            filters = filters.with_id(with_id);
        }
        if let Some(from) = parse_bound("--from-time", from_time)? {
            filters = filters.with_from_time(from);
        }
        if let Some(to) = parse_bound("--to-time", to_time)? {
            filters = filters.with_to_time(to);
        }
        if !with_word.is_empty() {
            filters = filters.with_word(with_word);
        }

        if filters.time.is_empty_range() {
            warn!(
                from_time = from_time,
                to_time = to_time,
                "Lower time bound is after upper bound, no records will be selected"
            );
        }

        debug!(filters = %filters.description(), "Filters configured");

        Ok(filters)
    }

    /// Require an exact id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(IdFilter::new(id));
        self
    }

    /// Require `time >= from`.
    pub fn with_from_time(mut self, from: Timestamp) -> Self {
        self.time = self.time.with_from(from);
        self
    }

    /// Require `time <= to`.
    pub fn with_to_time(mut self, to: Timestamp) -> Self {
        self.time = self.time.with_to(to);
        self
    }

    /// Require `word` to be an element of `words`.
    pub fn with_word(mut self, word: impl Into<String>) -> Self {
        self.word = Some(WordFilter::new(word));
        self
    }

    /// The required id, if any.
    pub fn id_filter(&self) -> Option<i64> {
        self.id.map(|f| f.id())
    }

    /// The inclusive lower time bound, if any.
    pub fn from_time(&self) -> Option<&Timestamp> {
        self.time.from()
    }

    /// The inclusive upper time bound, if any.
    pub fn to_time(&self) -> Option<&Timestamp> {
        self.time.to()
    }

    /// The required word, if any.
    pub fn word_filter(&self) -> Option<&str> {
        self.word.as_ref().map(|f| f.word())
    }

    /// Active predicates in evaluation order.
    fn active(&self) -> impl Iterator<Item = &dyn RecordFilter> {
        let id = self.id.as_ref().map(|f| f as &dyn RecordFilter);
        let time = self
            .time
            .has_constraints()
            .then_some(&self.time as &dyn RecordFilter);
        let word = self.word.as_ref().map(|f| f as &dyn RecordFilter);

        id.into_iter().chain(time).chain(word)
    }

    /// Number of active predicates.
    pub fn len(&self) -> usize {
        self.active().count()
    }

    /// Check if no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Descriptions of the active predicates.
    pub fn filter_descriptions(&self) -> Vec<String> {
        self.active().map(|f| f.description()).collect()
    }
}

impl RecordFilter for FilterSet {
    fn matches(&self, record: &Record) -> bool {
        self.active().all(|f| f.matches(record))
    }

    fn description(&self) -> String {
        if self.is_empty() {
            "all".to_string()
        } else {
            self.filter_descriptions().join(" AND ")
        }
    }
}

fn parse_bound(flag: &str, value: &str) -> Result<Option<Timestamp>> {
    if value.is_empty() {
        return Ok(None);
    }

    rfc3339::parse(value).map(Some).map_err(|e| {
        SiftError::Config(format!(
            "Invalid {flag} '{value}': {e} (expected RFC3339, e.g. 2023-01-01T00:00:00Z)"
        ))
    })
}
