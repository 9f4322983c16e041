//! Error types for partrs.
//!
//! This module defines the error type used throughout the crate.
//!
//! - [`MultipartError`] - Represents all possible errors during parsing

use std::fmt;

/// Errors that can occur while parsing a multipart body.
///
/// `MultipartError` represents all possible error conditions that may occur
/// while locating, framing, and draining parts, including I/O errors from
/// the underlying byte stream. Every variant is fatal to the parse session;
/// none are recovered internally.
///
/// Malformed individual header lines (no `:`) are deliberately *not* an
/// error. They degrade to `None` accessors on the part, see
/// [`PartHeaders::raw_lines`](crate::PartHeaders::raw_lines).
///
/// # Example
///
/// ```
/// use partrs::MultipartError;
///
/// fn handle_error(err: MultipartError) {
///     match err {
///         MultipartError::Io(io_err) => eprintln!("I/O error: {}", io_err),
///         MultipartError::PartTooLarge { limit } => eprintln!("limit: {}", limit),
///         _ => eprintln!("Other error"),
///     }
/// }
/// ```
#[derive(Debug)]
pub enum MultipartError {
    /// The request content type does not start with `multipart/`.
    NotMultipart,

    /// The content type has no `boundary` parameter.
    MissingBoundary,

    /// The stream ended during the preamble without a dash-boundary.
    MissingInitialBoundary,

    /// The bytes following a dash-boundary were neither CRLF (optionally
    /// preceded by linear whitespace) nor `--`.
    MalformedDelimiter,

    /// A part's header block exceeded the configured limit without a
    /// terminating CRLF CRLF.
    HeaderTooLarge {
        /// The configured maximum header block size in bytes.
        limit: usize,
    },

    /// A part's payload would exceed the configured limit.
    ///
    /// Raised before the overshooting bytes are emitted.
    PartTooLarge {
        /// The configured maximum payload size in bytes.
        limit: u64,
    },

    /// The stream ended mid-header-block or mid-payload, before the
    /// close-delimiter was seen.
    UnexpectedEnd,

    /// A part's body was read a second time.
    StreamAlreadyConsumed,

    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
}

impl fmt::Display for MultipartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MultipartError::NotMultipart => {
                write!(f, "content type is not multipart")
            }
            MultipartError::MissingBoundary => {
                write!(f, "missing boundary parameter in content type")
            }
            MultipartError::MissingInitialBoundary => {
                write!(f, "stream ended before the first boundary")
            }
            MultipartError::MalformedDelimiter => {
                write!(f, "malformed delimiter after boundary")
            }
            MultipartError::HeaderTooLarge { limit } => {
                write!(f, "part header block exceeds limit of {} bytes", limit)
            }
            MultipartError::PartTooLarge { limit } => {
                write!(f, "part payload exceeds limit of {} bytes", limit)
            }
            MultipartError::UnexpectedEnd => {
                write!(f, "unexpected end of multipart stream")
            }
            MultipartError::StreamAlreadyConsumed => {
                write!(f, "part body already consumed")
            }
            MultipartError::Io(e) => write!(f, "io error: {}", e),
        }
    }
}

impl std::error::Error for MultipartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MultipartError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MultipartError {
    fn from(e: std::io::Error) -> Self {
        MultipartError::Io(e)
    }
}
