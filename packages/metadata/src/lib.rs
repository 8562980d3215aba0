//! Provider metadata records for tagfs.
//!
//! Each provider module declares its metadata document with `record!`, so the
//! same struct can be deserialized from the provider's JSON and mounted as a
//! file tree.
//!
//! ```rust
//! use tagfs_metadata::digitalocean::{Droplet, TAG};
//! use tagfs_record::list_names;
//!
//! let droplet = Droplet::from_json(br#"{"droplet_id": 2756294}"#).unwrap();
//! assert_eq!(droplet.droplet_id, 2756294);
//! assert_eq!(list_names(&droplet, TAG).unwrap()[0], "droplet_id");
//! ```

pub mod digitalocean;
mod error;

pub use error::Error;
