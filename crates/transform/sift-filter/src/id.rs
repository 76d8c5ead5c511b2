//! Exact id matching.

use crate::RecordFilter;
use sift_types::Record;

/// Selects records whose id equals a fixed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdFilter {
    id: i64,
}

impl IdFilter {
    /// Create a filter for `id`.
    pub fn new(id: i64) -> Self {
        Self { id }
    }

    /// The id this filter selects.
    pub fn id(&self) -> i64 {
        self.id
    }
}

impl RecordFilter for IdFilter {
    fn matches(&self, record: &Record) -> bool {
        record.id() == self.id
    }

    fn description(&self) -> String {
        format!("id({})", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_types::rfc3339;

    fn record(id: i64) -> Record {
        Record::new(id, rfc3339::parse("2023-01-01T00:00:00Z").unwrap(), vec![])
    }

    #[test]
    fn test_id_filter_exact_match() {
        let filter = IdFilter::new(42);

        assert!(filter.matches(&record(42)));
        assert!(!filter.matches(&record(41)));
        assert!(!filter.matches(&record(43)));
        assert!(!filter.matches(&record(-42)));
    }

    #[test]
    fn test_id_filter_extremes() {
        assert!(IdFilter::new(i64::MIN).matches(&record(i64::MIN)));
        assert!(IdFilter::new(i64::MAX).matches(&record(i64::MAX)));
        assert!(!IdFilter::new(i64::MAX).matches(&record(i64::MIN)));
    }

    #[test]
    fn test_id_filter_description() {
        assert_eq!(IdFilter::new(-5).description(), "id(-5)");
    }
}
