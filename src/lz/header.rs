use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

use crate::error::{Error, Result};

/// Magic at the start of every compressed buffer
pub const LZ_MAGIC: &[u8; 2] = b"LZ";

/// Compressed buffer header - 10 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzHeader {
    /// Declared size of the compressed stream. Informational only
    pub compressed_size: i32,
    /// Exact length of the decoded output
    pub uncompressed_size: u32,
}

impl LzHeader {
    pub const SIZE: usize = 10;

    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE {
            return Err(Error::TruncatedInput {
                offset: 0,
                expected: Self::SIZE as u64,
                actual: data.len() as u64,
            });
        }

        if &data[..2] != LZ_MAGIC {
            return Err(Error::InvalidStream(format!(
                "expected magic 'LZ', got {:02x?}",
                &data[..2]
            )));
        }

        let mut cursor = Cursor::new(&data[2..Self::SIZE]);
        let compressed_size = cursor.read_i32::<LittleEndian>()?;
        let uncompressed_size = cursor.read_i32::<LittleEndian>()?;
        let uncompressed_size = u32::try_from(uncompressed_size).map_err(|_| {
            Error::InvalidStream(format!("negative uncompressed size {uncompressed_size}"))
        })?;

        Ok(Self {
            compressed_size,
            uncompressed_size,
        })
    }
}
