//! Rendering resolved nodes into file content.
//!
//! - Listings: tag annotations joined by `\n`, declaration order
//! - Scalars: their `Display` form
//! - Sequences: each element's form joined by `\n`
//!
//! None of these end with a newline. Structs nested inside a sequence have no
//! tag key to list them by, so they fall back to an aggregate form:
//! `{a b c}` over all declared fields, with inner sequences as `[x y]`.

use std::fmt;

use bytes::Bytes;
use tagfs_record::{field_by_name, list_names, FieldValue, IndexError, Node, Record};

/// Render the directory listing of `record`.
pub fn listing(record: &dyn Record, tag: &str) -> Result<Bytes, IndexError> {
    let names = list_names(record, tag)?;
    Ok(Bytes::from(names.join("\n")))
}

/// Render a single node without tag context.
pub fn value(node: &dyn Node) -> Bytes {
    let text = match node.node() {
        FieldValue::Scalar(scalar) => scalar.to_string(),
        FieldValue::Text(text) => text.to_owned(),
        FieldValue::Sequence(items) => items
            .into_iter()
            .map(|item| Aggregate(item).to_string())
            .collect::<Vec<_>>()
            .join("\n"),
        FieldValue::Struct(_) => Aggregate(node).to_string(),
    };
    Bytes::from(text)
}

/// Render the field of `record` annotated `name` under `tag`.
///
/// Struct-shaped fields render as their own listing, so `/dns` and `/dns/`
/// show the same content.
pub fn leaf_value(record: &dyn Record, tag: &str, name: &str) -> Result<Bytes, IndexError> {
    let node = field_by_name(record, tag, name)?;
    match node.node() {
        FieldValue::Struct(inner) => listing(inner, tag),
        _ => Ok(value(node)),
    }
}

/// Default textual form of any node, used for sequence elements.
struct Aggregate<'a>(&'a dyn Node);

impl fmt::Display for Aggregate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.node() {
            FieldValue::Scalar(scalar) => fmt::Display::fmt(scalar, f),
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Sequence(items) => {
                f.write_str("[")?;
                write_spaced(f, items.into_iter())?;
                f.write_str("]")
            }
            FieldValue::Struct(record) => {
                f.write_str("{")?;
                write_spaced(f, record.fields().into_iter().map(|field| field.value()))?;
                f.write_str("}")
            }
        }
    }
}

fn write_spaced<'a>(
    f: &mut fmt::Formatter<'_>,
    nodes: impl Iterator<Item = &'a dyn Node>,
) -> fmt::Result {
    for (i, node) in nodes.enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        fmt::Display::fmt(&Aggregate(node), f)?;
    }
    Ok(())
}
