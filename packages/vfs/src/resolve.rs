//! Path resolution against a record.

use bytes::Bytes;
use tagfs_record::{field_by_name, fields_of, IndexError, Record};

use crate::render;

/// Resolve a slash-delimited path against `record` and render the result.
///
/// At each level the text after the leading slash decides what happens:
/// - nothing, or a slash right away: list the current record
/// - `name/rest`: descend into field `name` and resolve `/rest` there
/// - `name` with no further slash: render field `name`
///
/// A path without a leading slash is read as if it had one.
pub fn resolve(path: &str, record: &dyn Record, tag: &str) -> Result<Bytes, IndexError> {
    let rest = path.strip_prefix('/').unwrap_or(path);
    if rest.is_empty() {
        return render::listing(record, tag);
    }

    match rest.find('/') {
        Some(0) => render::listing(record, tag),
        Some(idx) => {
            let child = field_by_name(record, tag, &rest[..idx])?;
            resolve(&rest[idx..], fields_of(child), tag)
        }
        None => render::leaf_value(record, tag, rest),
    }
}
