//! Async session adapter for multipart parsing.
//!
//! This module drives the same boundary scanner as the blocking front-end,
//! but pulls input through `futures_io::AsyncRead`. The only suspension
//! points are the reads issued when the scanner cannot make progress
//! without more input; parts and payload chunks are produced strictly on
//! demand.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use futures_io::AsyncRead;
//! use partrs::parse_async;
//!
//! async fn demo<R: AsyncRead + Unpin>(content_type: &str, body: R) -> Result<(), partrs::MultipartError> {
//!     let mut multipart = parse_async(content_type, body)?;
//!
//!     while let Some(mut part) = multipart.next_part().await? {
//!         println!("part: {:?}", part.name());
//!         while let Some(chunk) = part.next().await {
//!             let chunk = chunk?;
//!             println!("  {} payload bytes", chunk.len());
//!         }
//!     }
//!     Ok(())
//! }
//! ```

use std::future::poll_fn;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use futures_io::AsyncRead;

use crate::config::ParseConfig;
use crate::error::MultipartError;
use crate::headers::{is_multipart, parse_boundary, PartHeaders};
use crate::scanner::{BoundaryScanner, ScanEvent};

/// How many bytes one pull requests from the reader.
const READ_CHUNK_SIZE: usize = 8192;

/// Opens an async parse session from a request's content type and body.
///
/// Validates the content type before the first read: a non-multipart media
/// type fails with [`MultipartError::NotMultipart`] and a missing
/// `boundary` parameter with [`MultipartError::MissingBoundary`].
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic I/O. For tokio
/// readers, convert with `tokio_util::compat`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use partrs::parse_async;
///
/// let body = tokio::fs::File::open("upload.bin").await?;
/// let multipart = parse_async(content_type, body.compat())?;
/// ```
pub fn parse_async<R: AsyncRead>(
    content_type: &str,
    reader: R,
) -> Result<MultipartStream<R>, MultipartError> {
    parse_async_with_config(content_type, reader, ParseConfig::default())
}

/// Opens an async parse session with explicit limits.
pub fn parse_async_with_config<R: AsyncRead>(
    content_type: &str,
    reader: R,
    config: ParseConfig,
) -> Result<MultipartStream<R>, MultipartError> {
    if !is_multipart(content_type) {
        return Err(MultipartError::NotMultipart);
    }
    let boundary = parse_boundary(content_type).ok_or(MultipartError::MissingBoundary)?;
    Ok(MultipartStream::with_config(reader, &boundary, config))
}

/// An async multipart parse session.
///
/// The async counterpart of [`Multipart`](crate::Multipart): it owns the
/// reader and yields [`PartStream`] handles in wire order. Each handle
/// mutably borrows the session, so the next part cannot be requested while
/// the current one is still live, and interleaved consumption of two
/// parts is ruled out at compile time. A handle dropped with payload
/// unread is drained by the next [`next_part`](MultipartStream::next_part)
/// call.
///
/// Dropping the session releases the reader at the next suspension point
/// in the caller; no further reads occur.
pub struct MultipartStream<R> {
    reader: R,
    scanner: BoundaryScanner,
    read_buf: Vec<u8>,
    finished: bool,
}

impl<R> MultipartStream<R> {
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
}

impl<R: AsyncRead + Unpin> MultipartStream<R> {
    /// Advances to the next part.
    ///
    /// Returns `Ok(None)` once the close-delimiter has been recognized.
    /// If the previous part was dropped with payload unread, that payload
    /// is consumed and discarded first.
    pub async fn next_part(&mut self) -> Result<Option<PartStream<'_, R>>, MultipartError> {
        let headers = poll_fn(|cx| self.poll_next_headers(cx)).await?;
        Ok(headers.map(move |headers| PartStream {
            session: self,
            headers,
            done: false,
            consumed: false,
        }))
    }

    fn poll_next_headers(
        &mut self,
        cx: &mut Context<'_>,
    ) -> Poll<Result<Option<PartHeaders>, MultipartError>> {
        loop {
            if self.finished {
                return Poll::Ready(Ok(None));
            }
            match ready!(self.poll_event(cx)) {
                Ok(ScanEvent::PartStart(headers)) => return Poll::Ready(Ok(Some(headers))),
                Ok(ScanEvent::Finished) => {
                    self.finished = true;
                    return Poll::Ready(Ok(None));
                }
                // Remnants of an abandoned part.
                Ok(ScanEvent::PayloadChunk(_) | ScanEvent::PartEnd | ScanEvent::NeedData) => {}
                Err(e) => return Poll::Ready(Err(e)),
            }
        }
    }

    /// Runs the scanner, polling the reader whenever it asks for input.
    fn poll_event(&mut self, cx: &mut Context<'_>) -> Poll<Result<ScanEvent, MultipartError>> {
        loop {
            match self.scanner.next_event() {
                Ok(ScanEvent::NeedData) => {
                    match ready!(Pin::new(&mut self.reader).poll_read(cx, &mut self.read_buf)) {
                        Ok(0) => self.scanner.finish(),
                        Ok(n) => self.scanner.push(&self.read_buf[..n]),
                        Err(e) => return Poll::Ready(Err(MultipartError::Io(e))),
                    }
                }
                event => return Poll::Ready(event),
            }
        }
    }
}

impl<R> std::fmt::Debug for MultipartStream<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultipartStream")
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

/// One part of an async session: its headers and its payload stream.
///
/// `PartStream` implements [`Stream`] with
/// `Item = Result<Bytes, MultipartError>`; chunks arrive in wire order and
/// their concatenation is the verbatim payload. The
/// [`bytes`](PartStream::bytes) and [`text`](PartStream::text)
/// conveniences collect the stream and refuse to run twice
/// ([`MultipartError::StreamAlreadyConsumed`]).
pub struct PartStream<'a, R> {
    session: &'a mut MultipartStream<R>,
    headers: PartHeaders,
    done: bool,
    consumed: bool,
}

impl<'a, R: AsyncRead + Unpin> PartStream<'a, R> {
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

    /// Collects the whole payload.
    ///
    /// Fails with [`MultipartError::StreamAlreadyConsumed`] if the payload
    /// was already drained, through this method or through the `Stream`
    /// implementation.
    pub async fn bytes(&mut self) -> Result<Bytes, MultipartError> {
        if self.consumed {
            return Err(MultipartError::StreamAlreadyConsumed);
        }
        let mut out = Vec::new();
        loop {
            match poll_fn(|cx| Pin::new(&mut *self).poll_next(cx)).await {
                Some(Ok(chunk)) => out.extend_from_slice(&chunk),
                Some(Err(e)) => return Err(e),
                None => return Ok(Bytes::from(out)),
            }
        }
    }

    /// Collects the whole payload and decodes it as UTF-8.
    ///
    /// Invalid sequences are replaced with U+FFFD; use
    /// [`bytes`](PartStream::bytes) for the verbatim payload.
    pub async fn text(&mut self) -> Result<String, MultipartError> {
        let data = self.bytes().await?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }
}

impl<'a, R: AsyncRead + Unpin> Stream for PartStream<'a, R> {
    type Item = Result<Bytes, MultipartError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.done {
            return Poll::Ready(None);
        }
        // Only payload events can arrive while a part is active.
        match ready!(this.session.poll_event(cx)) {
            Ok(ScanEvent::PayloadChunk(data)) => Poll::Ready(Some(Ok(data))),
            Ok(_) => {
                this.done = true;
                this.consumed = true;
                Poll::Ready(None)
            }
            Err(e) => {
                this.done = true;
                Poll::Ready(Some(Err(e)))
            }
        }
    }
}

impl<'a, R> std::fmt::Debug for PartStream<'a, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartStream")
            .field("headers", &self.headers)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}
