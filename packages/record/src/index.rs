//! Field lookups keyed by tag annotation.

use crate::{Field, FieldValue, IndexError, Node, Record};

/// A record with no fields, standing in for nodes that are not struct-shaped.
struct Opaque;

impl Record for Opaque {
    fn fields(&self) -> Vec<Field<'_>> {
        Vec::new()
    }
}

static OPAQUE: Opaque = Opaque;

/// View a node as a record.
///
/// Struct-shaped nodes are returned as-is. Scalars and sequences have no
/// fields, so every listing on them fails with `NoTaggedFields` and every
/// lookup with `FieldNotFound`.
pub fn fields_of(node: &dyn Node) -> &dyn Record {
    match node.node() {
        FieldValue::Struct(record) => record,
        _ => &OPAQUE,
    }
}

/// Iterate over the fields visible under `tag`, paired with their annotation.
pub fn visible_fields<'a>(
    record: &'a dyn Record,
    tag: &'a str,
) -> impl Iterator<Item = (&'static str, Field<'a>)> + 'a {
    record
        .fields()
        .into_iter()
        .map(move |field| (field.tag(tag), field))
        .filter(|(annotation, _)| !annotation.is_empty())
}

/// List the annotations of every visible field, in declaration order.
///
/// Duplicate annotations are kept as declared.
pub fn list_names(record: &dyn Record, tag: &str) -> Result<Vec<&'static str>, IndexError> {
    let names: Vec<&'static str> = visible_fields(record, tag)
        .map(|(annotation, _)| annotation)
        .collect();

    if names.is_empty() {
        return Err(IndexError::no_tagged_fields(tag));
    }
    Ok(names)
}

/// Find the value of the first field whose annotation under `tag` is `name`.
///
/// No shape check is made: the caller finds out whether the value can be
/// descended into when it tries.
pub fn field_by_name<'a>(
    record: &'a dyn Record,
    tag: &str,
    name: &str,
) -> Result<&'a dyn Node, IndexError> {
    if name.is_empty() {
        return Err(IndexError::field_not_found(tag, name));
    }
    record
        .fields()
        .into_iter()
        .find(|field| field.tag(tag) == name)
        .map(|field| field.value())
        .ok_or_else(|| IndexError::field_not_found(tag, name))
}
