//! # tagfs-http
//!
//! Serving tagfs mounts over HTTP.
//!
//! The file tree semantics live in `tagfs-vfs`; this crate only maps requests
//! onto `Mount::open` and hands the resulting handle to a content server.
//!
//! ## Pieces
//!
//! - `FileServer`: opens the request path on a mount, answers `404` when it
//!   does not resolve, and delegates everything else to a `ContentServer`.
//! - `ContentServer`: turns a seekable handle into a response. Range
//!   requests, HEAD and validators belong here.
//! - `BasicContentServer`: the default, with `GET`/`HEAD` and single byte ranges.
//! - `StripPrefix`: routes requests under a prefix to an inner handler.
//! - `StripSegment`: drops a leading path segment, such as an instance address.
//!
//! ```
//! use http::{Request, StatusCode};
//! use tagfs_http::{FileServer, Handler, StripPrefix};
//! use tagfs_record::record;
//! use tagfs_vfs::Mount;
//!
//! record! {
//!     pub struct Meta {
//!         pub region: String => { json: "region" },
//!     }
//! }
//!
//! let meta = Meta { region: "nyc3".to_string() };
//! let server = StripPrefix::new("/metadata/v1", FileServer::new(Mount::new(meta, "json")));
//!
//! let request = Request::get("/metadata/v1/region").body(()).unwrap();
//! let response = server.handle(request);
//! assert_eq!(response.status(), StatusCode::OK);
//! assert_eq!(&response.body()[..], b"nyc3");
//! ```

pub mod content;
pub mod error;
mod server;

pub use content::{BasicContentServer, ByteRange, ContentServer, ReadSeek};
pub use error::Error;
pub use server::{FileServer, Handler, StripPrefix, StripSegment};
