//! Virtual file handles over rendered content.

use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use log::{trace, warn};

/// Permission and type bits of a virtual file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FileMode(u32);

impl FileMode {
    /// Directory bit.
    pub const DIR: u32 = 1 << 31;

    /// `rwxr-xr-x` directory.
    pub const DIRECTORY: FileMode = FileMode(Self::DIR | 0o755);

    /// `rw-r--r--` regular file.
    pub const REGULAR: FileMode = FileMode(0o644);

    /// Mode for a handle name: directory when it ends in `/`.
    pub fn for_name(name: &str) -> Self {
        if name.ends_with('/') {
            Self::DIRECTORY
        } else {
            Self::REGULAR
        }
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn permissions(&self) -> u32 {
        self.0 & 0o777
    }

    pub fn is_dir(&self) -> bool {
        self.0 & Self::DIR != 0
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_dir() { "d" } else { "-" })?;
        for shift in [6, 3, 0] {
            let bits = (self.0 >> shift) & 0o7;
            write!(
                f,
                "{}{}{}",
                if bits & 0o4 != 0 { 'r' } else { '-' },
                if bits & 0o2 != 0 { 'w' } else { '-' },
                if bits & 0o1 != 0 { 'x' } else { '-' },
            )?;
        }
        Ok(())
    }
}

/// What `stat` reports for a handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Metadata {
    name: String,
    len: u64,
    mode: FileMode,
    modified: DateTime<Utc>,
}

impl Metadata {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Content length, fixed when the handle was opened.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    /// Always `false`, even when `mode` has the directory bit.
    ///
    /// Content servers that see a directory go looking for an index document
    /// inside it. Listings are plain content here, so there is nothing to find.
    pub fn is_dir(&self) -> bool {
        false
    }

    /// When the content was rendered.
    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }
}

/// A read-only handle over content rendered at open time.
///
/// Each handle owns its cursor. Handles opened on the same mount never see
/// each other's position.
#[derive(Clone, Debug)]
pub struct VirtualFile {
    name: String,
    content: Bytes,
    offset: u64,
    modified: DateTime<Utc>,
}

impl VirtualFile {
    /// Wrap rendered content, stamped with the current time.
    pub fn new(name: impl Into<String>, content: Bytes) -> Self {
        Self {
            name: name.into(),
            content,
            offset: 0,
            modified: Utc::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full rendered content, independent of the cursor.
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Current cursor position.
    pub fn position(&self) -> u64 {
        self.offset
    }

    pub fn metadata(&self) -> Metadata {
        Metadata {
            name: self.name.clone(),
            len: self.content.len() as u64,
            mode: FileMode::for_name(&self.name),
            modified: self.modified,
        }
    }

    /// Directory entries are never enumerated; listings are file content.
    pub fn read_dir(&self, _count: usize) -> io::Result<Vec<Metadata>> {
        Ok(Vec::new())
    }

    /// Release the handle. There is nothing to flush or free.
    pub fn close(self) -> io::Result<()> {
        Ok(())
    }
}

impl Read for VirtualFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = self.content.len() as u64;
        if self.offset >= len {
            trace!("{}: eof at {}", self.name, self.offset);
            return Ok(0);
        }

        let start = self.offset as usize;
        let n = buf.len().min(self.content.len() - start);
        buf[..n].copy_from_slice(&self.content[start..start + n]);
        self.offset += n as u64;
        trace!("{}: read {} bytes, offset {}", self.name, n, self.offset);
        Ok(n)
    }
}

impl Seek for VirtualFile {
    /// Move the cursor, clamped to `[0, len]`.
    ///
    /// Overflowing the offset arithmetic fails with `InvalidInput` and leaves
    /// the cursor where it was.
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let len = self.content.len() as u64;
        let target = match pos {
            SeekFrom::Start(offset) => i128::from(offset),
            SeekFrom::Current(delta) => checked_offset(self.offset, delta)?,
            SeekFrom::End(delta) => checked_offset(len, delta)?,
        };

        let clamped = target.clamp(0, i128::from(len)) as u64;
        if i128::from(clamped) != target {
            warn!(
                "{}: seek to {} clamped to {} (len {})",
                self.name, target, clamped, len
            );
        }
        self.offset = clamped;
        Ok(self.offset)
    }
}

fn checked_offset(base: u64, delta: i64) -> io::Result<i128> {
    i64::try_from(base)
        .ok()
        .and_then(|base| base.checked_add(delta))
        .map(i128::from)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("seek offset overflow: {} + {}", base, delta),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content: &'static str) -> VirtualFile {
        VirtualFile::new("/dns/nameservers", Bytes::from_static(content.as_bytes()))
    }

    #[test]
    fn read_whole_content() {
        let mut f = file("8.8.8.8\n8.8.4.4");
        let mut out = String::new();
        f.read_to_string(&mut out).unwrap();
        assert_eq!(out, "8.8.8.8\n8.8.4.4");
        assert_eq!(f.position(), 15);
    }

    #[test]
    fn content_ignores_cursor() {
        let mut f = file("nyc3");
        f.seek(SeekFrom::Start(2)).unwrap();
        assert_eq!(&f.content()[..], b"nyc3");
        let mut rest = String::new();
        f.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "c3");
    }

    #[test]
    fn read_in_chunks_advances_offset() {
        let mut f = file("abcdef");
        let mut buf = [0u8; 4];
        assert_eq!(f.read(&mut buf).unwrap(), 4);
        assert_eq!(&buf, b"abcd");
        assert_eq!(f.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"ef");
        assert_eq!(f.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn seek_end_then_read_is_empty_twice() {
        let mut f = file("nyc3");
        assert_eq!(f.seek(SeekFrom::End(0)).unwrap(), 4);
        let mut buf = [0u8; 8];
        assert_eq!(f.read(&mut buf).unwrap(), 0);
        assert_eq!(f.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn seek_start_rereads_everything() {
        let mut f = file("nyc3");
        let mut out = Vec::new();
        f.read_to_end(&mut out).unwrap();
        f.seek(SeekFrom::Start(0)).unwrap();
        let mut again = [0u8; 4];
        assert_eq!(f.read(&mut again).unwrap(), 4);
        assert_eq!(&again, b"nyc3");
    }

    #[test]
    fn seek_current_and_end_relative() {
        let mut f = file("0123456789");
        assert_eq!(f.seek(SeekFrom::Current(3)).unwrap(), 3);
        assert_eq!(f.seek(SeekFrom::Current(2)).unwrap(), 5);
        assert_eq!(f.seek(SeekFrom::End(-4)).unwrap(), 6);
        let mut buf = [0u8; 2];
        f.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"67");
    }

    #[test]
    fn seek_clamps_out_of_range() {
        let mut f = file("abc");
        assert_eq!(f.seek(SeekFrom::End(-10)).unwrap(), 0);
        assert_eq!(f.seek(SeekFrom::Start(99)).unwrap(), 3);
        assert_eq!(f.seek(SeekFrom::Current(5)).unwrap(), 3);
    }

    #[test]
    fn seek_overflow_is_rejected() {
        let mut f = file("abc");
        f.seek(SeekFrom::Start(2)).unwrap();
        let err = f.seek(SeekFrom::Current(i64::MAX)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(f.position(), 2);
    }

    #[test]
    fn metadata_reports_length_and_mode() {
        let f = file("abc");
        let meta = f.metadata();
        assert_eq!(meta.name(), "/dns/nameservers");
        assert_eq!(meta.len(), 3);
        assert_eq!(meta.mode(), FileMode::REGULAR);
        assert!(!meta.is_dir());
        assert!(meta.modified() <= Utc::now());
    }

    #[test]
    fn trailing_slash_sets_directory_mode_but_not_is_dir() {
        let f = VirtualFile::new("/dns/", Bytes::from_static(b"nameservers"));
        let meta = f.metadata();
        assert!(meta.mode().is_dir());
        assert_eq!(meta.mode().permissions(), 0o755);
        assert!(!meta.is_dir());
    }

    #[test]
    fn mode_display() {
        assert_eq!(FileMode::DIRECTORY.to_string(), "drwxr-xr-x");
        assert_eq!(FileMode::REGULAR.to_string(), "-rw-r--r--");
    }

    #[test]
    fn mode_bits() {
        assert_eq!(FileMode::DIRECTORY.bits(), FileMode::DIR | 0o755);
        assert_eq!(FileMode::REGULAR.bits(), 0o644);
        assert_eq!(FileMode::for_name("/dns/").bits() & FileMode::DIR, FileMode::DIR);
    }

    #[test]
    fn read_dir_is_empty_and_close_succeeds() {
        let f = file("abc");
        assert!(f.read_dir(10).unwrap().is_empty());
        f.close().unwrap();
    }

    #[test]
    fn cloned_handles_keep_separate_cursors() {
        let mut a = file("abcdef");
        let mut b = a.clone();
        let mut buf = [0u8; 3];
        a.read_exact(&mut buf).unwrap();
        assert_eq!(a.position(), 3);
        assert_eq!(b.position(), 0);
        b.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"abc");
    }
}
