//! The Node trait - what a field can hold.

use std::collections::VecDeque;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::rc::Rc;
use std::sync::Arc;

use crate::Record;

/// The shape of a field's value.
///
/// Resolution dispatches on this instead of inspecting types:
/// - `Scalar`: rendered with its `Display` form
/// - `Text`: borrowed string data, rendered as is
/// - `Sequence`: rendered element by element, in order
/// - `Struct`: a nested record that can be listed and descended into
pub enum FieldValue<'a> {
    /// A single displayable value (number, bool, address...).
    Scalar(&'a dyn fmt::Display),
    /// String data. `str` is unsized and cannot be viewed as `dyn Display`.
    Text(&'a str),
    /// An ordered list of nodes.
    Sequence(Vec<&'a dyn Node>),
    /// A nested struct-shaped record.
    Struct(&'a dyn Record),
}

impl FieldValue<'_> {
    /// Check if this value is a scalar or text.
    pub fn is_scalar(&self) -> bool {
        matches!(self, FieldValue::Scalar(_) | FieldValue::Text(_))
    }

    /// Check if this value is struct-shaped.
    pub fn is_struct(&self) -> bool {
        matches!(self, FieldValue::Struct(_))
    }

    /// Check if this value is a sequence.
    pub fn is_sequence(&self) -> bool {
        matches!(self, FieldValue::Sequence(_))
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Scalar(value) => write!(f, "Scalar({})", value),
            FieldValue::Text(text) => write!(f, "Text({:?})", text),
            FieldValue::Sequence(items) => write!(f, "Sequence(len={})", items.len()),
            FieldValue::Struct(record) => write!(f, "Struct(fields={})", record.fields().len()),
        }
    }
}

/// A value that can sit in a record field.
///
/// Implemented for the common scalars, for sequences of nodes, and for
/// every struct declared with [`record!`](crate::record). Smart pointers and
/// references forward to the value they point at.
pub trait Node {
    /// Classify this value.
    fn node(&self) -> FieldValue<'_>;
}

macro_rules! scalar_node {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Node for $ty {
                fn node(&self) -> FieldValue<'_> {
                    FieldValue::Scalar(self)
                }
            }
        )*
    };
}

scalar_node!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, IpAddr,
    Ipv4Addr, Ipv6Addr,
);

impl Node for str {
    fn node(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

impl Node for String {
    fn node(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

/// `None` renders as an empty string.
impl<T: Node> Node for Option<T> {
    fn node(&self) -> FieldValue<'_> {
        match self {
            Some(value) => value.node(),
            None => FieldValue::Text(""),
        }
    }
}

impl<T: Node> Node for [T] {
    fn node(&self) -> FieldValue<'_> {
        FieldValue::Sequence(self.iter().map(|item| item as &dyn Node).collect())
    }
}

impl<T: Node, const N: usize> Node for [T; N] {
    fn node(&self) -> FieldValue<'_> {
        self.as_slice().node()
    }
}

impl<T: Node> Node for Vec<T> {
    fn node(&self) -> FieldValue<'_> {
        self.as_slice().node()
    }
}

impl<T: Node> Node for VecDeque<T> {
    fn node(&self) -> FieldValue<'_> {
        FieldValue::Sequence(self.iter().map(|item| item as &dyn Node).collect())
    }
}

// Pointers resolve to their target

impl<T: Node + ?Sized> Node for &T {
    fn node(&self) -> FieldValue<'_> {
        (**self).node()
    }
}

impl<T: Node + ?Sized> Node for Box<T> {
    fn node(&self) -> FieldValue<'_> {
        (**self).node()
    }
}

impl<T: Node + ?Sized> Node for Rc<T> {
    fn node(&self) -> FieldValue<'_> {
        (**self).node()
    }
}

impl<T: Node + ?Sized> Node for Arc<T> {
    fn node(&self) -> FieldValue<'_> {
        (**self).node()
    }
}
