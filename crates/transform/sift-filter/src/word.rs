//! Word membership matching.

use crate::RecordFilter;
use sift_types::Record;

/// Selects records whose `words` contain an exact, case-sensitive match.
///
/// Substrings and case variants do not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordFilter {
    word: String,
}

impl WordFilter {
    /// Create a filter for `word`.
    pub fn new(word: impl Into<String>) -> Self {
        Self { word: word.into() }
    }

    /// The word this filter looks for.
    pub fn word(&self) -> &str {
        &self.word
    }
}

impl RecordFilter for WordFilter {
    fn matches(&self, record: &Record) -> bool {
        record.has_word(&self.word)
    }

    fn description(&self) -> String {
        format!("word({:?})", self.word)
    }
}
