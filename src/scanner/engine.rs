//! Core scanning engine - incremental boundary recognition.
//!
//! This module implements the state machine that frames a multipart body.
//! It is sans-IO: callers feed raw input via `push()`, signal end-of-input
//! via `finish()`, and drive it with `next_event()`. The engine never
//! blocks; when it cannot make progress it asks for more input, which is
//! what makes the same machine serve both the blocking and the async
//! front-ends.
//!
//! Boundary matching is byte-exact over three derived patterns:
//!
//! - dash-boundary: `--` + boundary (opens the body)
//! - delimiter: CRLF + dash-boundary (separates parts)
//! - close-delimiter: delimiter + `--` (terminates the body)
//!
//! Any delimiter may arrive split across arbitrarily many input chunks;
//! the engine holds back just enough trailing bytes to recognize a split
//! match, so payloads flow through without accumulating.

use bytes::Bytes;
use tracing::{debug, trace};

use crate::buffer::ChunkBuffer;
use crate::config::ParseConfig;
use crate::error::MultipartError;
use crate::headers::PartHeaders;
use crate::util::is_lws;

/// One advance of the scanner.
#[derive(Debug)]
pub(crate) enum ScanEvent {
    /// The buffered input is insufficient; push more and call again.
    NeedData,
    /// A part's header block is complete; its payload follows.
    PartStart(PartHeaders),
    /// A slice of the active part's payload, in wire order.
    PayloadChunk(Bytes),
    /// The active part's payload is complete.
    PartEnd,
    /// The close-delimiter was recognized; the body is done and any
    /// further input is epilogue to be discarded.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Discarding bytes until the first dash-boundary.
    Preamble,
    /// Just past a dash-boundary: `--` closes, optional LWS then CRLF
    /// opens a part.
    DelimiterSuffix,
    /// Accumulating a header block until CRLF CRLF.
    HeaderBlock,
    /// Emitting payload until the next delimiter.
    Payload,
    /// Delimiter consumed; the part-end event is still owed.
    PartDone,
    /// Close-delimiter seen; everything else is epilogue.
    Epilogue,
}

/// Incremental boundary scanner over a [`ChunkBuffer`].
pub(crate) struct BoundaryScanner {
    buffer: ChunkBuffer,
    dash_boundary: Vec<u8>,
    delimiter: Vec<u8>,
    state: State,
    config: ParseConfig,
    payload_len: u64,
    eof: bool,
}

impl BoundaryScanner {
    pub(crate) fn new(boundary: &str, config: ParseConfig) -> Self {
        let dash_boundary = format!("--{}", boundary).into_bytes();
        let delimiter = format!("\r\n--{}", boundary).into_bytes();
        Self {
            buffer: ChunkBuffer::new(),
            dash_boundary,
            delimiter,
            state: State::Preamble,
            config,
            payload_len: 0,
            eof: false,
        }
    }

    /// Appends one chunk of raw input.
    pub(crate) fn push(&mut self, chunk: &[u8]) {
        debug_assert!(!self.eof);
        self.buffer.extend(chunk);
    }

    /// Signals that the input stream has ended. After this, the scanner
    /// never asks for more data; missing bytes become errors.
    pub(crate) fn finish(&mut self) {
        self.eof = true;
    }

    /// Advances the machine one visible step.
    pub(crate) fn next_event(&mut self) -> Result<ScanEvent, MultipartError> {
        loop {
            match self.state {
                State::Preamble => {
                    if let Some(i) = self.buffer.find(&self.dash_boundary, 0) {
                        if i > 0 {
                            trace!(discarded = i, "preamble discarded");
                        }
                        self.buffer.drop_prefix(i + self.dash_boundary.len());
                        self.state = State::DelimiterSuffix;
                        continue;
                    }
                    if self.eof {
                        return Err(MultipartError::MissingInitialBoundary);
                    }
                    // Keep only a tail that could still begin a match.
                    let keep = self.dash_boundary.len() - 1;
                    if self.buffer.len() > keep {
                        let n = self.buffer.len() - keep;
                        self.buffer.drop_prefix(n);
                    }
                    return Ok(ScanEvent::NeedData);
                }

                State::DelimiterSuffix => match self.scan_suffix()? {
                    Some(next) => {
                        self.state = next;
                        continue;
                    }
                    None => return Ok(ScanEvent::NeedData),
                },

                State::HeaderBlock => return self.scan_header_block(),

                State::Payload => match self.scan_payload()? {
                    Some(event) => return Ok(event),
                    None => continue,
                },

                State::PartDone => {
                    self.state = State::DelimiterSuffix;
                    return Ok(ScanEvent::PartEnd);
                }

                State::Epilogue => {
                    self.buffer.clear();
                    return Ok(ScanEvent::Finished);
                }
            }
        }
    }

    /// Classifies the two suffix bytes after a dash-boundary: `--` closes
    /// the body, CRLF (optionally preceded by linear whitespace) opens a
    /// part. Returns `None` when the suffix is not fully buffered yet.
    fn scan_suffix(&mut self) -> Result<Option<State>, MultipartError> {
        let s = self.buffer.as_slice();

        if s.len() >= 2 && &s[..2] == b"--" {
            debug!("close delimiter reached");
            self.buffer.drop_prefix(2);
            return Ok(Some(State::Epilogue));
        }

        let mut j = 0;
        while j < s.len() && is_lws(s[j]) {
            j += 1;
        }
        if j + 2 <= s.len() {
            if s[j] == b'\r' && s[j + 1] == b'\n' {
                self.buffer.drop_prefix(j + 2);
                return Ok(Some(State::HeaderBlock));
            }
            return Err(MultipartError::MalformedDelimiter);
        }

        if self.eof {
            return Err(MultipartError::UnexpectedEnd);
        }
        Ok(None)
    }

    fn scan_header_block(&mut self) -> Result<ScanEvent, MultipartError> {
        // A part with no headers terminates the (empty) block with a lone
        // CRLF right after the delimiter line.
        if self.buffer.starts_with(b"\r\n") {
            self.buffer.drop_prefix(2);
            self.start_payload();
            return Ok(ScanEvent::PartStart(PartHeaders::empty()));
        }

        let limit = self.config.max_header_size();
        if let Some(i) = self.buffer.find(b"\r\n\r\n", 0) {
            if i > limit {
                return Err(MultipartError::HeaderTooLarge { limit });
            }
            let block = self.buffer.take_prefix(i);
            self.buffer.drop_prefix(4);
            let headers = PartHeaders::parse(&block);
            trace!(headers = headers.len(), "part header block parsed");
            self.start_payload();
            return Ok(ScanEvent::PartStart(headers));
        }

        // No terminator can begin at an offset within the limit anymore.
        if self.buffer.len() >= limit.saturating_add(4) {
            return Err(MultipartError::HeaderTooLarge { limit });
        }
        if self.eof {
            return Err(MultipartError::UnexpectedEnd);
        }
        Ok(ScanEvent::NeedData)
    }

    /// One payload tick. `Ok(None)` means the delimiter landed exactly at
    /// the buffer head with nothing to emit; the caller loops into
    /// [`State::PartDone`].
    fn scan_payload(&mut self) -> Result<Option<ScanEvent>, MultipartError> {
        if let Some(k) = self.buffer.find(&self.delimiter, 0) {
            self.charge_payload(k as u64)?;
            let data = self.buffer.take_prefix(k);
            self.buffer.drop_prefix(self.delimiter.len());
            self.state = State::PartDone;
            if data.is_empty() {
                return Ok(None);
            }
            return Ok(Some(ScanEvent::PayloadChunk(data)));
        }

        // The final delimiter-length-minus-one bytes may be the start of a
        // delimiter split across the next pull; everything before them is
        // safe to emit.
        let hold = self.delimiter.len() - 1;
        if self.buffer.len() > hold {
            let safe = self.buffer.len() - hold;
            self.charge_payload(safe as u64)?;
            let data = self.buffer.take_prefix(safe);
            return Ok(Some(ScanEvent::PayloadChunk(data)));
        }

        if self.eof {
            return Err(MultipartError::UnexpectedEnd);
        }
        Ok(Some(ScanEvent::NeedData))
    }

    fn start_payload(&mut self) {
        self.state = State::Payload;
        self.payload_len = 0;
    }

    fn charge_payload(&mut self, n: u64) -> Result<(), MultipartError> {
        let limit = self.config.max_file_size();
        if self.payload_len.saturating_add(n) > limit {
            return Err(MultipartError::PartTooLarge { limit });
        }
        self.payload_len += n;
        Ok(())
    }
}
