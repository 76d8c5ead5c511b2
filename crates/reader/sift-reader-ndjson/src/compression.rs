//! Decompression adapter.

use crate::fetch::ByteStream;
use async_compression::tokio::bufread::GzipDecoder;
use sift_error::{FetchError, Result, SiftError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

/// Leading bytes of every gzip member.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Buffer size between the fetched stream and the decoder.
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Compression applied to the source object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// Gzip, possibly multi-member
    #[default]
    Gzip,

    /// Stored as plain JSON
    None,
}

/// Wrap a fetched stream so that reads yield decompressed bytes.
///
/// For gzip the signature is verified before returning, so a wrong format is
/// reported here rather than on the first record. Truncation and corruption
/// surface later as read errors from the returned stream.
pub async fn decompress(stream: ByteStream, compression: Compression) -> Result<ByteStream> {
    let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, stream);

    match compression {
        Compression::None => Ok(Box::pin(reader)),
        Compression::Gzip => {
            check_gzip_signature(&mut reader).await?;
            debug!("Gzip signature verified, decoding stream");

            let mut decoder = GzipDecoder::new(reader);
            decoder.multiple_members(true);
            Ok(Box::pin(decoder))
        }
    }
}

/// Verify the buffered head of the stream starts with the gzip magic bytes.
async fn check_gzip_signature<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<()> {
    let head = reader.fill_buf().await.map_err(|e| {
        SiftError::Fetch(FetchError::Transport(format!(
            "Failed to read object content: {e}"
        )))
    })?;

    if head.is_empty() {
        return Err(SiftError::Decompress(
            "Empty input, expected a gzip stream".to_string(),
        ));
    }

    // fill_buf may hand back a single byte; the decoder rejects a bad second byte
    let n = head.len().min(GZIP_MAGIC.len());
    if head[..n] != GZIP_MAGIC[..n] {
        return Err(SiftError::Decompress(format!(
            "Invalid gzip header: expected 1f 8b, found {}",
            head[..n]
                .iter()
                .map(|b| format!("{b:02x}"))
                .collect::<Vec<_>>()
                .join(" ")
        )));
    }

    Ok(())
}
