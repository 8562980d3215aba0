//! Mounting a record as a file tree.

use std::borrow::Cow;

use log::debug;
use tagfs_record::Record;

use crate::{resolve, Error, VirtualFile};

/// A record bound to the tag key that names its paths.
///
/// The record is never modified through the mount. `open` takes `&self`, so
/// a mount can be shared between threads serving concurrent requests as long
/// as the record itself is `Sync`.
///
/// Pointer-held records mount directly: `Mount<Arc<T>>`, `Mount<&T>` and
/// `Mount<Box<T>>` all resolve through to `T`.
#[derive(Clone, Debug)]
pub struct Mount<R> {
    record: R,
    tag: String,
}

impl<R: Record> Mount<R> {
    pub fn new(record: R, tag: impl Into<String>) -> Self {
        Self {
            record,
            tag: tag.into(),
        }
    }

    pub fn record(&self) -> &R {
        &self.record
    }

    /// The tag key used for every lookup at every level.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Resolve `path` and return a fresh handle over its rendering.
    ///
    /// Paths without a leading `/` are treated as if they had one. Any lookup
    /// failure becomes [`Error::NotFound`].
    pub fn open(&self, path: &str) -> Result<VirtualFile, Error> {
        let path = normalize(path);
        match resolve(&path, &self.record, &self.tag) {
            Ok(content) => {
                debug!("open {}: {} bytes", path, content.len());
                Ok(VirtualFile::new(path, content))
            }
            Err(source) => {
                debug!("open {}: {}", path, source);
                Err(Error::NotFound {
                    path: path.into_owned(),
                    source,
                })
            }
        }
    }
}

fn normalize(path: &str) -> Cow<'_, str> {
    if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{}", path))
    }
}
