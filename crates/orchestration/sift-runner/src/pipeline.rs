//! Pipeline that drives records from the reader through the filters.

use crate::destination::RecordDestination;
use crate::stats::PipelineStats;
use sift_error::Result;
use sift_filter::{FilterSet, RecordFilter};
use sift_reader_ndjson::RecordReader;
use tracing::{debug, info, trace};

/// One sequential pass over an input object.
///
/// Records are decoded, tested against the filters, and emitted one at a time
/// in input order. The first error aborts the run; records already emitted
/// stay emitted.
pub struct Pipeline {
    reader: RecordReader,
    filters: FilterSet,
}

impl Pipeline {
    /// Create a pipeline from a configured reader and filter set.
    pub fn new(reader: RecordReader, filters: FilterSet) -> Self {
        Self { reader, filters }
    }

    /// The filters applied by this pipeline.
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Stream `uri` into `destination`, emitting every selected record.
    ///
    /// The destination is flushed once the input is exhausted.
    pub async fn run<D>(&self, uri: &str, destination: &mut D) -> Result<PipelineStats>
    where
        D: RecordDestination + ?Sized,
    {
        let mut stats = PipelineStats::new();

        info!(uri = uri, filters = %self.filters.description(), "Starting pipeline");

        let mut records = self.reader.open(uri).await?;

        while let Some(record) = records.next_record().await? {
            stats.record_decoded();

            if !self.filters.matches(&record) {
                trace!(id = record.id(), "Record skipped");
                continue;
            }

            let bytes = destination.emit(&record)?;
            stats.record_selected(bytes);
            trace!(id = record.id(), bytes = bytes, "Record emitted");
        }

        destination.flush()?;
        stats.complete();

        debug!(bytes_read = records.bytes_read(), "Input exhausted");
        info!(
            uri = uri,
            records_decoded = stats.records_decoded,
            records_selected = stats.records_selected,
            bytes_emitted = stats.bytes_emitted,
            duration_ms = stats.duration().num_milliseconds(),
            "Pipeline complete"
        );

        Ok(stats)
    }
}
