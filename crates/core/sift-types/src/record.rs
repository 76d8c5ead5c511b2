//! Record type representing one object of the input stream.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

/// Timestamp with the offset it was written with.
pub type Timestamp = DateTime<FixedOffset>;

/// A single record decoded from the input stream.
///
/// Records are read-only once decoded. Serialization uses the same shape and
/// key order as the input: `{"id": .., "time": .., "words": [..]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    id: i64,

    #[serde(with = "rfc3339")]
    time: Timestamp,

    /// Absent or `null` decodes to an empty list
    #[serde(default, deserialize_with = "null_as_empty")]
    words: Vec<String>,
}

impl Record {
    /// Create a record from its parts.
    pub fn new(id: i64, time: Timestamp, words: Vec<String>) -> Self {
        Self { id, time, words }
    }

    /// Record identifier.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Record timestamp, including its original offset.
    pub fn time(&self) -> &Timestamp {
        &self.time
    }

    /// Words in their original order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Whether `word` is an exact (case-sensitive) element of `words`.
    pub fn has_word(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// RFC3339 (de)serialization for [`Timestamp`].
///
/// UTC is written with a `Z` suffix and fractional seconds only appear when
/// non-zero, so a parsed value always serializes back to the same instant
/// and offset.
pub mod rfc3339 {
    use super::Timestamp;
    use chrono::{DateTime, SecondsFormat};
    use serde::{Deserialize, Deserializer, Serializer, de};

    /// Parse an RFC3339 timestamp, keeping its offset.
    pub fn parse(input: &str) -> Result<Timestamp, chrono::ParseError> {
        DateTime::parse_from_rfc3339(input)
    }

    /// Format a timestamp as RFC3339.
    pub fn format(time: &Timestamp) -> String {
        time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    pub fn serialize<S>(time: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(|e| de::Error::custom(format_args!("invalid RFC3339 time '{raw}': {e}")))
    }
}
