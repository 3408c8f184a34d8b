//! DL1 archive parsing and extraction.
//!
//! ## Format Overview
//!
//! A DL1 file consists of:
//! 1. A 16-byte header: magic `"DL1.0\x1A"` (NUL-padded to 8 bytes),
//!    entry count (`u16`), 2 padding bytes, entry table offset (`i32`)
//! 2. The entry data, packed back to back starting at offset 0x10
//! 3. The entry table, `count` records of a 12-byte name and an `i32` size
//!
//! All integers are little-endian. Names are matched case-insensitively;
//! they are uppercased when the table is read.
//!
//! Entry data may be stored as-is or LZ-compressed (see [`crate::lz`]).
//! This module only hands out raw bytes; [`Dl1Extractor`] applies
//! decompression on the way out.
//!
//! ## Architecture
//!
//! - [`structures`]: header, record and descriptor types
//! - [`parser`]: [`Archive`], the parsed entry mapping
//! - [`entry`]: [`EntryView`], a seekable window over one entry
//! - [`extractor`]: writing entries to files or stdout

pub mod entry;
pub mod extractor;
pub mod parser;
pub mod structures;

pub use entry::EntryView;
pub use extractor::{Dl1Extractor, Extracted, jailed_path};
pub use parser::Archive;
pub use structures::*;
