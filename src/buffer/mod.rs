//! Internal buffer management for the boundary scanner.
//!
//! This module provides the sliding byte window the scanner searches and
//! drains. It is an implementation detail and not part of the public API.

mod window;

pub(crate) use window::ChunkBuffer;
