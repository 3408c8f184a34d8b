//! LZ decompression for DL1 entries.
//!
//! Compressed entries start with a 10-byte header:
//!
//! | Offset | Size | Field             |
//! |--------|------|-------------------|
//! | 0      | 2    | `"LZ"`            |
//! | 2      | 4    | compressed size   |
//! | 6      | 4    | uncompressed size |
//!
//! followed by an LZSS-style stream (see [`decoder`]). The compressed size
//! is not used to bound decoding; the stream is decoded until the buffer
//! ends, so trailing padding is harmless.
//!
//! Entries that do not start with `LZ` are stored as-is.
//! [`decompress_if_required`] handles both cases.

pub mod decoder;
mod header;

pub use decoder::{MAX_MATCH, MIN_MATCH, WINDOW_SIZE, WINDOW_START};
pub use header::{LZ_MAGIC, LzHeader};

use std::borrow::Cow;

use tracing::debug;

use crate::error::Result;

/// Whether `data` carries the `LZ` magic
pub fn is_compressed(data: &[u8]) -> bool {
    data.starts_with(LZ_MAGIC)
}

/// Decompress an `LZ` buffer.
///
/// # Errors
///
/// - [`crate::Error::InvalidStream`] if `data` does not start with `LZ`
///   or declares a negative uncompressed size
/// - [`crate::Error::TruncatedInput`] if `data` is shorter than the header
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let header = LzHeader::parse(data)?;
    let out = decoder::decode(&data[LzHeader::SIZE..], header.uncompressed_size as usize);

    debug!(
        "LZ: {} bytes -> {} bytes (declared compressed size {})",
        data.len(),
        out.len(),
        header.compressed_size
    );

    Ok(out)
}

/// Decompress `data` if it is an `LZ` buffer, otherwise return it unchanged
pub fn decompress_if_required(data: &[u8]) -> Result<Cow<'_, [u8]>> {
    if is_compressed(data) {
        decompress(data).map(Cow::Owned)
    } else {
        Ok(Cow::Borrowed(data))
    }
}
