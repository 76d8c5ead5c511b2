//! Statistics for pipeline runs.

use chrono::{DateTime, Duration, Utc};

/// Counters and timing collected during one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStats {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run reached end of stream
    pub completed_at: Option<DateTime<Utc>>,

    /// Records decoded from the input
    pub records_decoded: u64,

    /// Records that passed the filters and were emitted
    pub records_selected: u64,

    /// Bytes written to the destination
    pub bytes_emitted: u64,
}

impl Default for PipelineStats {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStats {
    /// Create a new stats tracker with the current time as start time.
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            completed_at: None,
            records_decoded: 0,
            records_selected: 0,
            bytes_emitted: 0,
        }
    }

    /// Mark the run as complete with the current time.
    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    /// Count a decoded record.
    pub fn record_decoded(&mut self) {
        self.records_decoded += 1;
    }

    /// Count an emitted record and its size.
    pub fn record_selected(&mut self, bytes: u64) {
        self.records_selected += 1;
        self.bytes_emitted += bytes;
    }

    /// Records that were decoded but not selected.
    pub fn records_skipped(&self) -> u64 {
        self.records_decoded - self.records_selected
    }

    /// Get the duration of the run (up to now if still running).
    pub fn duration(&self) -> Duration {
        self.completed_at.unwrap_or_else(Utc::now) - self.started_at
    }

    /// Calculate the decode throughput in records per second.
    pub fn records_per_second(&self) -> f64 {
        let secs = self.duration().num_milliseconds() as f64 / 1000.0;
        if secs > 0.0 {
            self.records_decoded as f64 / secs
        } else {
            0.0
        }
    }
}
