//! tagfs VFS: records as a read-only file tree
//!
//! A mounted record becomes a hierarchy of paths:
//! - `/` lists the record's tagged fields, one per line
//! - `/name` renders a field: its value, its elements, or its listing
//! - `/name/` forces a listing of `name`
//! - `/name/child` descends into a nested record
//!
//! Every `open` resolves and renders from scratch and returns an independent
//! `VirtualFile` that implements `Read` and `Seek`. Nothing is cached and no
//! state is shared between handles.
//!
//! # Example
//!
//! ```rust
//! use std::io::Read;
//! use tagfs_record::record;
//! use tagfs_vfs::Mount;
//!
//! record! {
//!     pub struct Dns {
//!         pub nameservers: Vec<String> => { json: "nameservers" },
//!     }
//! }
//!
//! let dns = Dns {
//!     nameservers: vec!["8.8.8.8".to_string(), "8.8.4.4".to_string()],
//! };
//! let mount = Mount::new(dns, "json");
//!
//! let mut content = String::new();
//! mount.open("/nameservers").unwrap().read_to_string(&mut content).unwrap();
//! assert_eq!(content, "8.8.8.8\n8.8.4.4");
//! ```

mod error;
mod file;
mod mount;
pub mod render;
mod resolve;

pub use error::Error;
pub use file::{FileMode, Metadata, VirtualFile};
pub use mount::Mount;
pub use resolve::resolve;

// Re-export record types for convenience
pub use tagfs_record::{IndexError, Node, Record};
