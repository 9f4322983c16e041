//! Blocking multipart session - Multipart and Part.
//!
//! This module implements the synchronous front-end over the boundary
//! scanner. The session owns the reader and pulls from it only when the
//! scanner needs bytes to make progress, so multi-megabyte uploads flow
//! through a bounded buffer instead of materializing in memory.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use partrs::{parse, MultipartError};
//!
//! fn main() -> Result<(), MultipartError> {
//!     let body = concat!(
//!         "--boundary123\r\n",
//!         "Content-Disposition: form-data; name=\"field1\"\r\n",
//!         "\r\n",
//!         "value1\r\n",
//!         "--boundary123--",
//!     );
//!     let content_type = "multipart/form-data; boundary=boundary123";
//!
//!     let mut multipart = parse(content_type, Cursor::new(body.as_bytes()))?;
//!     while let Some(mut part) = multipart.next_part()? {
//!         let name = part.name();
//!         let data = part.bytes()?;
//!         println!("{:?}: {} bytes", name, data.len());
//!     }
//!     Ok(())
//! }
//! ```

use std::io::Read;

use bytes::Bytes;

use crate::config::ParseConfig;
use crate::error::MultipartError;
use crate::headers::{is_multipart, parse_boundary, PartHeaders};
use crate::scanner::{BoundaryScanner, ScanEvent};

/// How many bytes one pull requests from the reader.
const READ_CHUNK_SIZE: usize = 8192;

/// Opens a blocking parse session from a request's content type and body.
///
/// Validates the content type before touching the reader: a non-multipart
/// media type fails with [`MultipartError::NotMultipart`] and a missing
/// `boundary` parameter with [`MultipartError::MissingBoundary`]. Default
/// limits apply; use [`parse_with_config`] to override them.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use partrs::{parse, MultipartError};
///
/// let err = parse("application/json", Cursor::new(&b""[..])).unwrap_err();
/// assert!(matches!(err, MultipartError::NotMultipart));
/// ```
pub fn parse<R: Read>(content_type: &str, reader: R) -> Result<Multipart<R>, MultipartError> {
    parse_with_config(content_type, reader, ParseConfig::default())
}

/// Opens a blocking parse session with explicit limits.
pub fn parse_with_config<R: Read>(
    content_type: &str,
    reader: R,
    config: ParseConfig,
) -> Result<Multipart<R>, MultipartError> {
    if !is_multipart(content_type) {
        return Err(MultipartError::NotMultipart);
    }
    let boundary = parse_boundary(content_type).ok_or(MultipartError::MissingBoundary)?;
    Ok(Multipart::with_config(reader, &boundary, config))
}

/// A blocking multipart parse session.
///
/// `Multipart` owns the body reader and yields [`Part`] handles in wire
/// order. Each handle mutably borrows the session, so the borrow checker
/// enforces the iteration contract: the next part cannot be requested
/// while the current one is still being drained, and two parts can never
/// be consumed interleaved. Dropping a part without draining it is fine;
/// the session reads past its remaining payload before yielding the next
/// part (the stream is single-pass, so those bytes must be consumed to be
/// skipped).
///
/// Dropping the session releases the reader; any epilogue after the close
/// delimiter is never read.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use partrs::Multipart;
///
/// let body = b"--b\r\n\r\nhello\r\n--b--";
/// let mut multipart = Multipart::new(Cursor::new(&body[..]), "b");
///
/// let mut part = multipart.next_part()?.expect("one part");
/// assert_eq!(part.bytes()?.as_ref(), b"hello");
/// assert!(multipart.next_part()?.is_none());
/// # Ok::<(), partrs::MultipartError>(())
/// ```
pub struct Multipart<R> {
    reader: R,
    scanner: BoundaryScanner,
    read_buf: Vec<u8>,
    finished: bool,
}

impl<R: Read> Multipart<R> {
    /// Creates a session with default limits from a reader and a boundary
    /// already extracted from the content type.
    pub fn new(reader: R, boundary: &str) -> Self {
        Self::with_config(reader, boundary, ParseConfig::default())
    }

    /// Creates a session with explicit limits.
    pub fn with_config(reader: R, boundary: &str, config: ParseConfig) -> Self {
        Self {
            reader,
            scanner: BoundaryScanner::new(boundary, config),
            read_buf: vec![0u8; READ_CHUNK_SIZE],
            finished: false,
        }
    }

    /// Advances to the next part.
    ///
    /// Returns `Ok(None)` once the close-delimiter has been recognized.
    /// If the previous part was dropped with payload unread, that payload
    /// is consumed and discarded first.
    pub fn next_part(&mut self) -> Result<Option<Part<'_, R>>, MultipartError> {
        loop {
            if self.finished {
                return Ok(None);
            }
            match self.pump()? {
                ScanEvent::PartStart(headers) => {
                    return Ok(Some(Part {
                        session: self,
                        headers,
                        done: false,
                        consumed: false,
                    }));
                }
                ScanEvent::Finished => {
                    self.finished = true;
                    return Ok(None);
                }
                // Remnants of an abandoned part.
                ScanEvent::PayloadChunk(_) | ScanEvent::PartEnd | ScanEvent::NeedData => {}
            }
        }
    }

    /// Runs the scanner, reading from the source whenever it asks.
    fn pump(&mut self) -> Result<ScanEvent, MultipartError> {
        loop {
            match self.scanner.next_event()? {
                ScanEvent::NeedData => {
                    let n = self.reader.read(&mut self.read_buf)?;
                    if n == 0 {
                        self.scanner.finish();
                    } else {
                        self.scanner.push(&self.read_buf[..n]);
                    }
                }
                event => return Ok(event),
            }
        }
    }
}

impl<R> std::fmt::Debug for Multipart<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Multipart")
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

/// One part of a blocking session: its headers and its payload stream.
///
/// The payload is pulled chunk by chunk with [`chunk`](Part::chunk), or
/// collected with [`bytes`](Part::bytes) / [`text`](Part::text). The
/// concatenation of the chunks is exactly the wire bytes between the
/// part's header terminator and the delimiter that follows, verbatim; no
/// transfer-encoding decoding and no charset conversion is applied.
pub struct Part<'a, R> {
    session: &'a mut Multipart<R>,
    headers: PartHeaders,
    done: bool,
    consumed: bool,
}

impl<'a, R: Read> Part<'a, R> {
    /// The part's parsed header block.
    pub fn headers(&self) -> &PartHeaders {
        &self.headers
    }

    /// The `name` parameter of `Content-Disposition`, if any.
    pub fn name(&self) -> Option<String> {
        self.headers.name()
    }

    /// The `filename` parameter of `Content-Disposition`, if any.
    pub fn filename(&self) -> Option<String> {
        self.headers.filename()
    }

    /// The media type from `Content-Type`, with parameters stripped.
    pub fn media_type(&self) -> Option<String> {
        self.headers.media_type()
    }

    /// True iff the part carries a filename.
    pub fn is_file(&self) -> bool {
        self.headers.filename().is_some()
    }

    /// Pulls the next payload chunk, or `Ok(None)` once the payload is
    /// complete. Chunks arrive in wire order.
    pub fn chunk(&mut self) -> Result<Option<Bytes>, MultipartError> {
        if self.done {
            return Ok(None);
        }
        // Only payload events can arrive while a part is active.
        match self.session.pump()? {
            ScanEvent::PayloadChunk(data) => Ok(Some(data)),
            _ => {
                self.done = true;
                self.consumed = true;
                Ok(None)
            }
        }
    }

    /// Collects the whole payload.
    ///
    /// Fails with [`MultipartError::StreamAlreadyConsumed`] if the payload
    /// was already drained, through this method or through
    /// [`chunk`](Part::chunk).
    pub fn bytes(&mut self) -> Result<Bytes, MultipartError> {
        if self.consumed {
            return Err(MultipartError::StreamAlreadyConsumed);
        }
        let mut out = Vec::new();
        while let Some(chunk) = self.chunk()? {
            out.extend_from_slice(&chunk);
        }
        Ok(Bytes::from(out))
    }

    /// Collects the whole payload and decodes it as UTF-8.
    ///
    /// Invalid sequences are replaced with U+FFFD; use
    /// [`bytes`](Part::bytes) for the verbatim payload.
    pub fn text(&mut self) -> Result<String, MultipartError> {
        let data = self.bytes()?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }
}

impl<'a, R> std::fmt::Debug for Part<'a, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Part")
            .field("headers", &self.headers)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}
