use std::io::{self, Read, Seek, SeekFrom};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::io::ReadAt;

/// Read-only window over one entry's bytes in the archive source.
///
/// Each view carries its own cursor; reading or seeking one view never
/// affects another, even when both cover the same entry.
pub struct EntryView<R: ReadAt> {
    reader: Arc<R>,
    offset: u64,
    size: u64,
    pos: u64,
}

impl<R: ReadAt> EntryView<R> {
    pub(crate) fn new(reader: Arc<R>, offset: u64, size: u64) -> Self {
        Self {
            reader,
            offset,
            size,
            pos: 0,
        }
    }

    /// Length of the entry in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Absolute offset of the entry in the source
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Current cursor position, relative to the entry start
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Another view over the same bytes, with its cursor at the start
    pub fn duplicate(&self) -> Self {
        Self::new(self.reader.clone(), self.offset, self.size)
    }

    /// Read the whole entry, regardless of the cursor position.
    ///
    /// Fails with [`crate::Error::TruncatedInput`] when the source is shorter
    /// than the entry claims.
    pub fn read_all(&self) -> Result<Vec<u8>> {
        // Check the declared range before allocating for it
        let available = self.reader.size().saturating_sub(self.offset);
        if self.size > available {
            return Err(Error::TruncatedInput {
                offset: self.offset,
                expected: self.size,
                actual: available,
            });
        }

        let mut buf = vec![0u8; self.size as usize];
        self.reader.read_exact_at(self.offset, &mut buf)?;
        Ok(buf)
    }

    /// Positional read relative to the entry start, clamped to the entry
    pub fn read_at(&self, pos: u64, buf: &mut [u8]) -> io::Result<usize> {
        if pos >= self.size {
            return Ok(0);
        }
        let len = buf.len().min((self.size - pos) as usize);
        self.reader.read_at(self.offset + pos, &mut buf[..len])
    }
}

impl<R: ReadAt> Clone for EntryView<R> {
    fn clone(&self) -> Self {
        self.duplicate()
    }
}

impl<R: ReadAt> Read for EntryView<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.read_at(self.pos, buf)?;
        self.pos += n as u64;
        Ok(n)
    }
}

impl<R: ReadAt> Seek for EntryView<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(p) => Some(p),
            SeekFrom::End(d) => self.size.checked_add_signed(d),
            SeekFrom::Current(d) => self.pos.checked_add_signed(d),
        };
        match target {
            Some(p) => {
                self.pos = p;
                Ok(p)
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(data: &[u8], offset: u64, size: u64) -> EntryView<Vec<u8>> {
        EntryView::new(Arc::new(data.to_vec()), offset, size)
    }

    #[test]
    fn test_read_is_bounded_to_entry() {
        let mut v = view(b"xxhello worldyy", 2, 11);
        let mut out = Vec::new();
        v.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"hello world");
        assert_eq!(v.read(&mut [0u8; 4]).unwrap(), 0);
    }

    #[test]
    fn test_seek_and_read() {
        let mut v = view(b"xxhello worldyy", 2, 11);
        assert_eq!(v.seek(SeekFrom::End(-5)).unwrap(), 6);
        let mut buf = [0u8; 5];
        v.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"world");

        v.seek(SeekFrom::Current(-11)).unwrap();
        assert_eq!(v.position(), 0);
        assert!(v.seek(SeekFrom::Current(-1)).is_err());
    }

    #[test]
    fn test_views_are_independent() {
        let mut a = view(b"abcdef", 0, 6);
        a.seek(SeekFrom::Start(4)).unwrap();
        let mut b = a.duplicate();

        let mut buf = [0u8; 2];
        b.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"ab");
        a.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"ef");
    }

    #[test]
    fn test_read_all_ignores_cursor() {
        let mut v = view(b"abcdef", 1, 3);
        v.seek(SeekFrom::Start(2)).unwrap();
        assert_eq!(v.read_all().unwrap(), b"bcd");
    }

    #[test]
    fn test_read_all_truncated() {
        let v = view(b"abc", 1, 10);
        assert!(matches!(
            v.read_all(),
            Err(crate::Error::TruncatedInput {
                offset: 1,
                expected: 10,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_huge_declared_size_fails_before_reading() {
        let v = view(&[0u8; 20], 16, i32::MAX as u64);
        assert!(matches!(
            v.read_all(),
            Err(crate::Error::TruncatedInput {
                offset: 16,
                expected: 2147483647,
                actual: 4
            })
        ));
    }
}
