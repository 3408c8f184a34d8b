//! DL1 container parser.
//!
//! Reading an archive takes a single pass:
//! 1. Read the 16-byte header at offset 0 and check the magic
//! 2. Read the whole entry table (`count * 16` bytes) at the table offset
//! 3. Walk the records in order, assigning each entry the next slice of
//!    the data region that starts right after the header
//!
//! The table does not store data offsets. They are implied by the sizes,
//! so the entries are packed back to back from offset 0x10 no matter where
//! the table itself lives.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::io::ReadAt;

use super::entry::EntryView;
use super::structures::*;

/// An opened DL1 archive.
///
/// The entry mapping is built once by [`Archive::open`] and never changes
/// afterwards, so an `Archive` can be shared freely between threads when
/// the source allows it.
///
/// ## Example
///
/// ```ignore
/// let archive = Archive::open(Arc::new(LocalFileReader::new(path)?))?;
/// for name in archive.list() {
///     let bytes = archive.open_entry(name)?.read_all()?;
/// }
/// ```
pub struct Archive<R: ReadAt> {
    /// The underlying data source
    reader: Arc<R>,
    header: ArchiveHeader,
    /// Descriptors in table order
    entries: Vec<EntryDescriptor>,
    /// Uppercased name -> index into `entries`
    index: HashMap<String, usize>,
}

impl<R: ReadAt> Archive<R> {
    /// Parse the header and entry table of `reader`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidFormat`] if the magic does not match, or the table
    ///   offset or an entry size is negative
    /// - [`Error::TruncatedInput`] if the header or the table runs past the
    ///   end of the source
    pub fn open(reader: Arc<R>) -> Result<Self> {
        let mut header_buf = [0u8; ArchiveHeader::SIZE];
        reader.read_exact_at(0, &mut header_buf)?;
        let header = ArchiveHeader::from_bytes(&header_buf)?;

        debug!(
            "Loading entries from DL1 {}: {}",
            header.entry_count, header.table_offset
        );

        let table_offset = header.table_offset()?;
        let mut table = vec![0u8; header.table_len()];
        reader.read_exact_at(table_offset, &mut table)?;

        let mut entries: Vec<EntryDescriptor> = Vec::with_capacity(header.entry_count as usize);
        let mut index = HashMap::with_capacity(header.entry_count as usize);
        let mut cursor = Cursor::new(&table);
        let mut pos = DATA_START;

        for _ in 0..header.entry_count {
            let record = EntryRecord::read_from(&mut cursor)?;
            let size = u64::try_from(record.size).map_err(|_| {
                Error::invalid_format(format!(
                    "entry {} has negative size {}",
                    record.name, record.size
                ))
            })?;

            trace!("Entry {} at {:#x} ({} bytes)", record.name, pos, size);

            let descriptor = EntryDescriptor {
                name: record.name,
                offset: pos,
                size,
            };
            pos += size;

            // Same name twice: the later record wins, the earlier position in
            // the listing is kept
            match index.get(&descriptor.name) {
                Some(&i) => {
                    debug!("Duplicate entry name {}, keeping the later record", descriptor.name);
                    entries[i] = descriptor;
                }
                None => {
                    index.insert(descriptor.name.clone(), entries.len());
                    entries.push(descriptor);
                }
            }
        }

        Ok(Self {
            reader,
            header,
            entries,
            index,
        })
    }

    pub fn header(&self) -> &ArchiveHeader {
        &self.header
    }

    /// Entry names in table order
    pub fn list(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Entry descriptors in table order
    pub fn entries(&self) -> &[EntryDescriptor] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by name. Matching is case-insensitive and ignores
    /// leading slashes.
    pub fn descriptor(&self, name: &str) -> Result<&EntryDescriptor> {
        let key = normalize_name(name);
        self.index
            .get(&key)
            .map(|&i| &self.entries[i])
            .ok_or(Error::EntryNotFound(key))
    }

    /// Existence and size of an entry, without touching the source
    pub fn stat(&self, name: &str) -> EntryStat {
        match self.descriptor(name) {
            Ok(entry) => EntryStat {
                exists: true,
                size: entry.size,
            },
            Err(_) => EntryStat {
                exists: false,
                size: 0,
            },
        }
    }

    /// Open a read-only view over an entry's raw bytes
    pub fn open_entry(&self, name: &str) -> Result<EntryView<R>> {
        let entry = self.descriptor(name)?;
        Ok(self.view(entry))
    }

    /// View over the bytes a descriptor points at
    pub fn view(&self, entry: &EntryDescriptor) -> EntryView<R> {
        EntryView::new(self.reader.clone(), entry.offset, entry.size)
    }

    /// `[start, end)` of the packed entry data, as declared by the table
    pub fn data_region(&self) -> (u64, u64) {
        let end = self.entries.iter().map(|e| e.end()).max().unwrap_or(DATA_START);
        (DATA_START, end)
    }

    /// `[start, end)` of the entry table
    pub fn table_region(&self) -> (u64, u64) {
        let start = self.header.table_offset.max(0) as u64;
        (start, start + self.header.table_len() as u64)
    }

    /// Get a reference to the underlying reader.
    pub fn reader(&self) -> &Arc<R> {
        &self.reader
    }
}

fn normalize_name(name: &str) -> String {
    name.trim_start_matches('/').to_uppercase()
}
