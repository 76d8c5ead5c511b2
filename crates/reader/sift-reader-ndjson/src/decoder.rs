//! Incremental record decoder.
//!
//! Parses a byte stream of concatenated JSON objects into [`Record`]s one at a
//! time. Objects may be separated by newlines, any other JSON whitespace, or
//! nothing at all.
//!
//! # Memory Model
//!
//! Only the unconsumed tail of the stream is buffered: at most one partially
//! read record plus one read chunk. Decoded records advance a cursor into the
//! buffer and the tail is moved to the front once per refill. When a single
//! record spans many chunks the read size grows with the buffer, so reparsing
//! the partial record stays linear in its length.

use crate::compression::Compression;
use crate::fetch::ByteStream;
use serde_json::error::Category;
use sift_error::{DecodeError, FetchError, Result, SiftError};
use sift_types::Record;
use std::io::ErrorKind;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, trace};

/// Default number of bytes requested from the stream per read.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Outcome of one attempt to decode from the buffer.
enum Decoded {
    /// A full record and the number of buffer bytes it consumed
    Record(Record, usize),

    /// The buffer holds only whitespace or a prefix of a value
    Incomplete,

    /// The buffered bytes can never form a record
    Failed(serde_json::Error),
}

/// Lazy, forward-only sequence of records read from a byte stream.
///
/// The sequence is not restartable. Once it reports end-of-stream or an error,
/// every later call to [`next_record`](Self::next_record) returns `Ok(None)`.
pub struct RecordDecoder<R = ByteStream> {
    reader: R,
    buffer: Vec<u8>,
    /// Offset of the first unconsumed byte in `buffer`
    start: usize,
    chunk_size: usize,
    compression: Compression,
    eof: bool,
    finished: bool,
    records_decoded: u64,
    bytes_read: u64,
}

impl<R: AsyncRead + Unpin> RecordDecoder<R> {
    /// Create a decoder over an uncompressed byte stream.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            start: 0,
            chunk_size: DEFAULT_CHUNK_SIZE,
            compression: Compression::None,
            eof: false,
            finished: false,
            records_decoded: 0,
            bytes_read: 0,
        }
    }

    /// Set the minimum read size.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }

    /// Record the compression the stream was read through.
    ///
    /// Only used to attribute read failures to the decompressor or the
    /// transport.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Number of records decoded so far.
    pub fn records_decoded(&self) -> u64 {
        self.records_decoded
    }

    /// Number of uncompressed bytes read from the stream so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Decode the next record.
    ///
    /// Returns `Ok(None)` at end-of-stream. Trailing whitespace is not an error;
    /// any other leftover bytes are reported as a truncated record.
    pub async fn next_record(&mut self) -> Result<Option<Record>> {
        if self.finished {
            return Ok(None);
        }

        loop {
            match self.decode_buffered() {
                Decoded::Record(record, consumed) => {
                    self.start += consumed;
                    self.records_decoded += 1;
                    trace!(
                        record = self.records_decoded,
                        id = record.id(),
                        "Decoded record"
                    );
                    return Ok(Some(record));
                }
                Decoded::Incomplete if self.eof => {
                    self.finished = true;

                    if self.pending().iter().all(u8::is_ascii_whitespace) {
                        debug!(
                            records = self.records_decoded,
                            bytes = self.bytes_read,
                            "Reached end of record stream"
                        );
                        return Ok(None);
                    }

                    return Err(DecodeError::Truncated {
                        record: self.records_decoded + 1,
                    }
                    .into());
                }
                Decoded::Incomplete => {
                    if let Err(e) = self.fill().await {
                        self.finished = true;
                        return Err(e);
                    }
                }
                Decoded::Failed(e) => {
                    self.finished = true;
                    return Err(classify_json_error(e, self.records_decoded + 1));
                }
            }
        }
    }

    /// Buffered bytes not yet decoded.
    fn pending(&self) -> &[u8] {
        &self.buffer[self.start..]
    }

    /// Try to decode one record from the front of the pending bytes.
    fn decode_buffered(&self) -> Decoded {
        let pending = self.pending();
        let mut values = serde_json::Deserializer::from_slice(pending).into_iter::<Record>();

        match values.next() {
            None => Decoded::Incomplete,
            Some(Ok(record)) => Decoded::Record(record, values.byte_offset()),
            Some(Err(e)) if e.is_eof() => Decoded::Incomplete,
            // A number cut after `.` or `e` is reported as a syntax error
            Some(Err(e)) if !self.eof && error_at_buffer_end(pending, &e) => {
                Decoded::Incomplete
            }
            Some(Err(e)) => Decoded::Failed(e),
        }
    }

    /// Append the next chunk of the stream to the buffer.
    ///
    /// Consumed bytes are dropped first, so the pending tail starts at zero.
    async fn fill(&mut self) -> Result<()> {
        if self.start > 0 {
            let len = self.buffer.len();
            self.buffer.copy_within(self.start..len, 0);
            self.buffer.truncate(len - self.start);
            self.start = 0;
        }

        let want = self.chunk_size.max(self.buffer.len());
        self.buffer.reserve(want);

        let compression = self.compression;
        let n = self
            .reader
            .read_buf(&mut self.buffer)
            .await
            .map_err(|e| classify_read_error(e, compression))?;

        if n == 0 {
            self.eof = true;
        }
        self.bytes_read += n as u64;
        Ok(())
    }
}

/// Whether a parse error points at the last buffered byte, where more input
/// could still complete the value.
fn error_at_buffer_end(buffer: &[u8], error: &serde_json::Error) -> bool {
    let line_start: usize = buffer
        .split(|&b| b == b'\n')
        .take(error.line().saturating_sub(1))
        .map(|line| line.len() + 1)
        .sum();
    line_start + error.column() + 1 >= buffer.len()
}

/// Map a serde_json failure for the record at position `record`.
fn classify_json_error(error: serde_json::Error, record: u64) -> SiftError {
    let message = error.to_string();
    let error = match error.classify() {
        Category::Data => DecodeError::Shape { record, message },
        Category::Eof => DecodeError::Truncated { record },
        Category::Syntax | Category::Io => DecodeError::Malformed { record, message },
    };
    error.into()
}

/// Map a read failure from the (possibly decompressing) stream.
///
/// The gzip decoder reports corrupt data as `InvalidData` and a stream cut off
/// mid-member as `UnexpectedEof`. Anything else, and every failure of an
/// uncompressed stream, came from the transport.
fn classify_read_error(error: std::io::Error, compression: Compression) -> SiftError {
    match (compression, error.kind()) {
        (Compression::Gzip, ErrorKind::InvalidData | ErrorKind::UnexpectedEof) => {
            SiftError::Decompress(format!("Corrupt or truncated compressed stream: {error}"))
        }
        _ => SiftError::Fetch(FetchError::Transport(format!(
            "Failed to read object content: {error}"
        ))),
    }
}
