//! Records: structs described by tag-keyed field tables.
//!
//! This layer tells the rest of tagfs what a mounted value looks like without
//! any runtime reflection:
//! - `Record`: a struct-shaped value that lists its fields in declaration order
//! - `Field`: one declared field with its tag annotations and an accessor
//! - `Node`: anything a field can hold, classified as a `FieldValue`
//! - `record!`: declares a struct and its field table in one go
//!
//! The index functions (`list_names`, `field_by_name`) look fields up by the
//! annotation stored under a tag key. A field with an empty annotation for that
//! key is invisible to them.
//!
//! # Example
//!
//! ```rust
//! use tagfs_record::{field_by_name, list_names, record, FieldValue};
//!
//! record! {
//!     pub struct Dns {
//!         pub nameservers: Vec<String> => { json: "nameservers" },
//!         pub cache: bool,
//!     }
//! }
//!
//! let dns = Dns {
//!     nameservers: vec!["8.8.8.8".to_string()],
//!     cache: false,
//! };
//!
//! assert_eq!(list_names(&dns, "json").unwrap(), vec!["nameservers"]);
//! let node = field_by_name(&dns, "json", "nameservers").unwrap();
//! assert!(matches!(node.node(), FieldValue::Sequence(_)));
//! ```

mod error;
mod index;
mod macros;
mod node;
mod record;

pub use error::IndexError;
pub use index::{field_by_name, fields_of, list_names, visible_fields};
pub use node::{FieldValue, Node};
pub use record::{Field, Record};
