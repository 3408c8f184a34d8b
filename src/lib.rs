//! # dl1x
//!
//! A reader for DL1 archives and their LZ-compressed entries.
//!
//! DL1 is a simple container: a fixed header, entry data packed back to
//! back, and a table of 12-character names with sizes. Entries may be
//! compressed with a small LZSS variant using a 4096-byte window.
//!
//! ## Features
//!
//! - Parse DL1 archives from local files or in-memory buffers
//! - Case-insensitive entry lookup and listing in table order
//! - Independent, seekable views over entry bytes without copying
//! - Byte-exact LZ decompression
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use dl1x::{Archive, LocalFileReader, lz};
//!
//! fn main() -> dl1x::Result<()> {
//!     let reader = Arc::new(LocalFileReader::new(Path::new("SG.DL1"))?);
//!     let archive = Archive::open(reader)?;
//!
//!     for name in archive.list() {
//!         let raw = archive.open_entry(name)?.read_all()?;
//!         let data = lz::decompress_if_required(&raw)?;
//!         println!("{name}: {} bytes", data.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod dl1;
pub mod error;
pub mod io;
pub mod lz;

pub use cli::Cli;
pub use dl1::{Archive, Dl1Extractor, EntryDescriptor, EntryStat, EntryView};
pub use error::{Error, Result};
pub use io::{LocalFileReader, ReadAt};
