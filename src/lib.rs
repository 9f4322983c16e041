//! # partrs
//!
//! Streaming multipart body parsing for Rust.
//!
//! `partrs` consumes an HTTP `multipart/*` request body (RFC 7578 /
//! RFC 2046) as a lazy byte stream and produces parts one at a time, each
//! exposing its headers and a lazy payload stream. It is built for
//! server-side request handling where payloads may be large file uploads
//! and must not be buffered in memory in full:
//!
//! - **Incremental** - Delimiters are recognized across arbitrary chunk
//!   boundaries; payload bytes flow through a bounded window
//! - **Pull-based** - Nothing is read from the source unless the caller
//!   asks for the next part or the next payload chunk
//! - **Limit-enforcing** - Per-part header and payload size limits fail
//!   fast, before oversized data accumulates
//!
//! ## Design Philosophy
//!
//! This crate intentionally maintains a narrow scope and focuses on doing
//! one thing well: **frame a multipart byte stream into parts**. It
//! deliberately does not:
//!
//! - Decode transfer encodings (`base64`, `quoted-printable`) - payload
//!   bytes are returned verbatim
//! - Convert charsets (the caller decides; [`Part::text`] assumes UTF-8)
//! - Recurse into nested multiparts (a nested body is an opaque payload
//!   the caller may re-parse)
//! - Spool large parts to disk (the caller owns storage policy)
//!
//! ## Synchronous API
//!
//! ```
//! use std::io::Cursor;
//! use partrs::{parse, MultipartError};
//!
//! fn main() -> Result<(), MultipartError> {
//!     let body = concat!(
//!         "--boundary123\r\n",
//!         "Content-Disposition: form-data; name=\"file1\"; filename=\"test.txt\"\r\n",
//!         "Content-Type: text/plain\r\n",
//!         "\r\n",
//!         "File content\r\n",
//!         "--boundary123--",
//!     );
//!     let content_type = "multipart/form-data; boundary=boundary123";
//!
//!     let mut multipart = parse(content_type, Cursor::new(body.as_bytes()))?;
//!     while let Some(mut part) = multipart.next_part()? {
//!         if part.is_file() {
//!             println!("upload {:?}", part.filename());
//!         }
//!         let payload = part.bytes()?;
//!         assert_eq!(payload.as_ref(), b"File content");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Asynchronous API
//!
//! Requires the `async-io` feature (enabled by default). The async session
//! reads through `futures_io::AsyncRead`, so it is runtime-agnostic; tokio
//! readers convert via `tokio_util::compat`.
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use partrs::parse_async;
//!
//! let mut multipart = parse_async(content_type, body_reader)?;
//! while let Some(mut part) = multipart.next_part().await? {
//!     while let Some(chunk) = part.next().await {
//!         handle(chunk?);
//!     }
//! }
//! ```
//!
//! ## Limits
//!
//! Both limits are per part and configurable via [`ParseConfig`]:
//!
//! ```
//! use partrs::ParseConfig;
//!
//! let config = ParseConfig::default()
//!     .with_max_header_size(4096)
//!     .with_max_file_size(10 * 1024 * 1024);
//! # let _ = config;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

// Public modules
mod config;
mod error;
mod headers;
mod multipart;

// Internal modules (implementation details)
mod buffer; // Sliding byte window over the input stream
mod scanner; // Boundary-recognition state machine
mod util;

// Async session support (feature-gated)
#[cfg(feature = "async-io")]
mod async_stream;

//
// Public API surface
//
// The public API is intentionally minimal. Only essential types are
// exported to keep the surface area small and the API stable.
//

/// Configuration options for parsing limits.
pub use config::{ParseConfig, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_HEADER_SIZE};

/// Error type for parsing operations.
pub use error::MultipartError;

/// Part headers and content-type helpers.
pub use headers::{is_multipart, parse_boundary, PartHeaders};

/// Blocking parse session over `std::io::Read`.
pub use multipart::{parse, parse_with_config, Multipart, Part};

/// Async parse session (requires `async-io` feature).
#[cfg(feature = "async-io")]
pub use async_stream::{parse_async, parse_async_with_config, MultipartStream, PartStream};
