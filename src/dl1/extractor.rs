use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::io::ReadAt;
use crate::lz;

use super::parser::Archive;
use super::structures::EntryDescriptor;

/// Outcome of [`Dl1Extractor::extract_into`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    /// The entry was written to this path
    Written(PathBuf),
    /// A file already existed at this path and was left alone
    Exists(PathBuf),
    /// The entry name would land outside the output directory
    Escapes,
}

/// DL1 entry extractor
pub struct Dl1Extractor<R: ReadAt> {
    archive: Archive<R>,
    decompress: bool,
}

impl<R: ReadAt> Dl1Extractor<R> {
    /// Open the archive behind `reader`. Entries are decompressed on
    /// extraction unless [`Dl1Extractor::raw`] is set.
    pub fn new(reader: Arc<R>) -> Result<Self> {
        Ok(Self {
            archive: Archive::open(reader)?,
            decompress: true,
        })
    }

    /// Keep LZ entries compressed when extracting
    pub fn raw(mut self, raw: bool) -> Self {
        self.decompress = !raw;
        self
    }

    pub fn archive(&self) -> &Archive<R> {
        &self.archive
    }

    /// List all entries in the archive
    pub fn list_files(&self) -> &[EntryDescriptor] {
        self.archive.entries()
    }

    /// Read the LZ header of an entry, if it has one.
    ///
    /// An entry that starts with `LZ` but carries no usable header (such as a
    /// negative uncompressed size) is reported as `None`.
    pub fn lz_header(&self, entry: &EntryDescriptor) -> Result<Option<lz::LzHeader>> {
        if entry.size < lz::LzHeader::SIZE as u64 {
            return Ok(None);
        }
        let mut buf = [0u8; lz::LzHeader::SIZE];
        self.archive.reader().read_exact_at(entry.offset, &mut buf)?;
        if !lz::is_compressed(&buf) {
            return Ok(None);
        }
        match lz::LzHeader::parse(&buf) {
            Ok(header) => Ok(Some(header)),
            Err(Error::InvalidStream(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Extract entry data to memory
    pub fn extract_to_memory(&self, entry: &EntryDescriptor) -> Result<Vec<u8>> {
        let data = self.archive.view(entry).read_all()?;
        if !self.decompress || !lz::is_compressed(&data) {
            return Ok(data);
        }
        lz::decompress(&data)
    }

    /// Extract entry to disk
    pub async fn extract_to_file(
        &self,
        entry: &EntryDescriptor,
        output_path: &Path,
    ) -> Result<()> {
        // Create parent directories if needed
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let data = self.extract_to_memory(entry)?;

        let mut file = fs::File::create(output_path).await?;
        file.write_all(&data).await?;
        file.flush().await?;

        Ok(())
    }

    /// Extract entry under its own name inside `dir`.
    ///
    /// An existing file is kept unless `overwrite` is set.
    pub async fn extract_into(
        &self,
        dir: &Path,
        entry: &EntryDescriptor,
        overwrite: bool,
    ) -> Result<Extracted> {
        let Some(output_path) = jailed_path(dir, &entry.name) else {
            return Ok(Extracted::Escapes);
        };

        if !overwrite && fs::try_exists(&output_path).await? {
            return Ok(Extracted::Exists(output_path));
        }

        self.extract_to_file(entry, &output_path).await?;
        Ok(Extracted::Written(output_path))
    }

    /// Extract entry to stdout
    pub async fn extract_to_stdout(&self, entry: &EntryDescriptor) -> Result<()> {
        let data = self.extract_to_memory(entry)?;

        let mut stdout = tokio::io::stdout();
        stdout.write_all(&data).await?;
        stdout.flush().await?;

        Ok(())
    }
}

/// Path of `name` inside `dir`, or `None` if the name would land outside it
pub fn jailed_path(dir: &Path, name: &str) -> Option<PathBuf> {
    let relative = Path::new(name);
    let mut has_file = false;
    for component in relative.components() {
        match component {
            Component::Normal(_) => has_file = true,
            Component::CurDir => {}
            _ => return None,
        }
    }
    has_file.then(|| dir.join(relative))
}
