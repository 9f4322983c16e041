//! Sliding byte window over the unread prefix of the input stream.

use bytes::Bytes;

/// Compact once the drained prefix reaches this many bytes and exceeds the
/// live tail. Keeps the backing allocation from growing with the stream.
const COMPACT_THRESHOLD: usize = 8 * 1024;

/// A contiguous window over the not-yet-consumed bytes of the input.
///
/// The window is a growable byte array with a logical head offset: after
/// [`drop_prefix`](ChunkBuffer::drop_prefix), index 0 is the first
/// undrained byte. Appending never reallocates per read; the drained
/// prefix is reclaimed by an occasional `copy_within` compaction instead
/// of shifting on every drop.
///
/// The buffer is a pure data structure. It has no failure modes of its
/// own; pulling more input is the owning session's job.
#[derive(Debug, Default)]
pub(crate) struct ChunkBuffer {
    data: Vec<u8>,
    head: usize,
}

impl ChunkBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of buffered, undrained bytes.
    pub(crate) fn len(&self) -> usize {
        self.data.len() - self.head
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.head == self.data.len()
    }

    /// The undrained bytes, index 0 first.
    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.data[self.head..]
    }

    /// Appends one input chunk, compacting first if the drained prefix has
    /// grown past the live tail.
    pub(crate) fn extend(&mut self, chunk: &[u8]) {
        if self.head >= COMPACT_THRESHOLD && self.head > self.len() {
            self.compact();
        }
        self.data.extend_from_slice(chunk);
    }

    /// Discards the first `n` undrained bytes. Indices reset so that the
    /// byte previously at `n` is now at 0.
    pub(crate) fn drop_prefix(&mut self, n: usize) {
        debug_assert!(n <= self.len());
        self.head += n.min(self.len());
        if self.is_empty() {
            self.data.clear();
            self.head = 0;
        }
    }

    /// Copies out and discards the first `n` undrained bytes.
    pub(crate) fn take_prefix(&mut self, n: usize) -> Bytes {
        let data = Bytes::copy_from_slice(&self.as_slice()[..n]);
        self.drop_prefix(n);
        data
    }

    /// First occurrence of `pattern` at or after `start`, restricted to
    /// currently buffered bytes. Matching is byte-exact.
    pub(crate) fn find(&self, pattern: &[u8], start: usize) -> Option<usize> {
        let hay = self.as_slice();
        if pattern.is_empty() || start >= hay.len() || hay.len() - start < pattern.len() {
            return None;
        }
        hay[start..]
            .windows(pattern.len())
            .position(|w| w == pattern)
            .map(|i| i + start)
    }

    /// Whether the undrained bytes begin with `prefix`.
    pub(crate) fn starts_with(&self, prefix: &[u8]) -> bool {
        self.as_slice().starts_with(prefix)
    }

    /// Discards everything, keeping the allocation.
    pub(crate) fn clear(&mut self) {
        self.data.clear();
        self.head = 0;
    }

    fn compact(&mut self) {
        self.data.copy_within(self.head.., 0);
        self.data.truncate(self.len());
        self.head = 0;
    }
}
