//! Destinations for selected records.

mod stdout;

pub use stdout::JsonLinesDestination;

use sift_error::Result;
use sift_types::Record;

/// Sink for records that passed the filters.
///
/// Records arrive in input order. Any error aborts the run.
pub trait RecordDestination {
    /// Write one record, returning the number of bytes written.
    fn emit(&mut self, record: &Record) -> Result<u64>;

    /// Flush anything the destination still holds.
    fn flush(&mut self) -> Result<()>;
}
