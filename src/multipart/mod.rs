//! Blocking multipart parsing over [`std::io::Read`] sources.
//!
//! - [`parse`] - Entry point from a request content type and body reader
//! - [`Multipart`] - The parse session yielding parts in wire order
//! - [`Part`] - Per-part handle: headers plus a pull-based payload stream

mod session;

pub use session::{parse, parse_with_config, Multipart, Part};
