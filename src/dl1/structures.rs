use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

use crate::error::{Error, Result};

/// Magic string at the start of every DL1 archive (NUL-padded to 8 bytes on disk)
pub const DL1_MAGIC: &[u8] = b"DL1.0\x1A";

/// Offset of the first entry's data; the data region starts right after the header
pub const DATA_START: u64 = ArchiveHeader::SIZE as u64;

/// Fixed archive header - 16 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveHeader {
    pub entry_count: u16,
    pub table_offset: i32,
}

impl ArchiveHeader {
    pub const SIZE: usize = 16;
    pub const MAGIC_LEN: usize = 8;

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE {
            return Err(Error::TruncatedInput {
                offset: 0,
                expected: Self::SIZE as u64,
                actual: data.len() as u64,
            });
        }

        let magic = read_stringz(&data[..Self::MAGIC_LEN]);
        if magic != DL1_MAGIC {
            return Err(Error::invalid_format(format!(
                "magic {:?}",
                String::from_utf8_lossy(magic)
            )));
        }

        let mut cursor = Cursor::new(&data[Self::MAGIC_LEN..]);
        let entry_count = cursor.read_u16::<LittleEndian>()?;
        let _padding = cursor.read_u16::<LittleEndian>()?;
        let table_offset = cursor.read_i32::<LittleEndian>()?;

        Ok(Self {
            entry_count,
            table_offset,
        })
    }

    /// Entry table position, rejecting offsets that point before the file start
    pub fn table_offset(&self) -> Result<u64> {
        u64::try_from(self.table_offset).map_err(|_| {
            Error::invalid_format(format!("negative entry table offset {}", self.table_offset))
        })
    }

    pub fn table_len(&self) -> usize {
        self.entry_count as usize * EntryRecord::SIZE
    }
}

/// Entry table record - 16 bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    /// Uppercased name with padding removed
    pub name: String,
    pub size: i32,
}

impl EntryRecord {
    pub const SIZE: usize = 16;
    pub const NAME_LEN: usize = 12;

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut name = [0u8; Self::NAME_LEN];
        reader.read_exact(&mut name)?;
        let size = reader.read_i32::<LittleEndian>()?;

        Ok(Self {
            name: decode_name(&name),
            size,
        })
    }
}

/// Location of one entry's bytes inside the archive source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDescriptor {
    pub name: String,
    pub offset: u64,
    pub size: u64,
}

impl EntryDescriptor {
    /// Exclusive end offset of the entry's bytes
    pub fn end(&self) -> u64 {
        self.offset + self.size
    }
}

/// Existence and size of an entry, answered from the entry table alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryStat {
    pub exists: bool,
    pub size: u64,
}

/// Bytes up to the first NUL
fn read_stringz(field: &[u8]) -> &[u8] {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    &field[..end]
}

fn decode_name(field: &[u8]) -> String {
    let raw = read_stringz(field);
    String::from_utf8_lossy(raw).trim_end_matches(' ').to_uppercase()
}
