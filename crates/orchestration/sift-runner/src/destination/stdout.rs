//! JSON Lines destination.

use super::RecordDestination;
use sift_error::{Result, SiftError};
use sift_types::Record;
use std::io::{self, StdoutLock, Write};

/// Destination that writes each record as one JSON object per line.
///
/// Keys are written in `id`, `time`, `words` order. Each line is handed to the
/// writer in a single `write_all`, so nothing beyond one line is held here.
pub struct JsonLinesDestination<W: Write> {
    writer: W,
    line: Vec<u8>,
    records_written: u64,
    bytes_written: u64,
}

impl JsonLinesDestination<StdoutLock<'static>> {
    /// Create a destination writing to the process stdout.
    ///
    /// Stdout stays locked for the lifetime of the destination.
    pub fn stdout() -> Self {
        Self::new(io::stdout().lock())
    }
}

impl<W: Write> JsonLinesDestination<W> {
    /// Create a destination writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            line: Vec::with_capacity(256),
            records_written: 0,
            bytes_written: 0,
        }
    }

    /// Get the number of records written.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Get the number of bytes written, including newlines.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Consume the destination and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordDestination for JsonLinesDestination<W> {
    fn emit(&mut self, record: &Record) -> Result<u64> {
        self.line.clear();
        serde_json::to_writer(&mut self.line, record).map_err(|e| {
            SiftError::Emit(format!("Failed to serialize record {}: {e}", record.id()))
        })?;
        self.line.push(b'\n');

        self.writer
            .write_all(&self.line)
            .map_err(|e| SiftError::Emit(format!("Failed to write record {}: {e}", record.id())))?;

        let bytes = self.line.len() as u64;
        self.records_written += 1;
        self.bytes_written += bytes;
        Ok(bytes)
    }

    fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| SiftError::Emit(format!("Failed to flush output: {e}")))
    }
}
