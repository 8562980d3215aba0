//! The Record trait and its field descriptors.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::Node;

/// A struct-shaped value that can describe its own fields.
///
/// `fields` returns every declared field, in declaration order, whether or
/// not it carries a tag. Filtering by tag key happens in the index functions.
///
/// Usually implemented by [`record!`](crate::record). A hand-written impl must
/// also implement [`Node`] returning [`FieldValue::Struct`](crate::FieldValue)
/// so the record can be nested inside other records.
pub trait Record {
    /// The field table for this value.
    fn fields(&self) -> Vec<Field<'_>>;
}

/// One declared field of a record.
///
/// Tag annotations are a static table of `(key, annotation)` pairs, so a
/// field can be named differently under several tag keys.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    name: &'static str,
    tags: &'static [(&'static str, &'static str)],
    value: &'a dyn Node,
}

impl<'a> Field<'a> {
    /// Describe a field.
    pub fn new(
        name: &'static str,
        tags: &'static [(&'static str, &'static str)],
        value: &'a dyn Node,
    ) -> Self {
        Self { name, tags, value }
    }

    /// The Rust identifier of the field.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The annotation stored under `key`, or `""` when there is none.
    pub fn tag(&self, key: &str) -> &'static str {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, annotation)| *annotation)
            .unwrap_or("")
    }

    /// All tag annotations of this field.
    pub fn tags(&self) -> &'static [(&'static str, &'static str)] {
        self.tags
    }

    /// Check if this field is visible under `key`.
    pub fn is_tagged(&self, key: &str) -> bool {
        !self.tag(key).is_empty()
    }

    /// The field's value.
    pub fn value(&self) -> &'a dyn Node {
        self.value
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

// Pointers to records are records

impl<T: Record + ?Sized> Record for &T {
    fn fields(&self) -> Vec<Field<'_>> {
        (**self).fields()
    }
}

impl<T: Record + ?Sized> Record for Box<T> {
    fn fields(&self) -> Vec<Field<'_>> {
        (**self).fields()
    }
}

impl<T: Record + ?Sized> Record for Rc<T> {
    fn fields(&self) -> Vec<Field<'_>> {
        (**self).fields()
    }
}

impl<T: Record + ?Sized> Record for Arc<T> {
    fn fields(&self) -> Vec<Field<'_>> {
        (**self).fields()
    }
}
