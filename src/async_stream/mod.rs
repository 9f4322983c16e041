//! Async multipart parsing over `futures-io` readers.
//!
//! This module provides asynchronous parsing using the
//! `futures-io::AsyncRead` trait, making it runtime-agnostic and
//! compatible with tokio, async-std, smol, and other async runtimes.
//!
//! - [`parse_async`] - Entry point from a content type and async body reader
//! - [`MultipartStream`] - The async parse session
//! - [`PartStream`] - Per-part handle implementing `Stream` over payload chunks
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;

pub use stream::{parse_async, parse_async_with_config, MultipartStream, PartStream};
