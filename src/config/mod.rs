//! Configuration for multipart parsing.
//!
//! This module provides the type used to configure per-part limits:
//!
//! - [`ParseConfig`] - Controls the header block and payload size limits
//!
//! # Example
//!
//! ```
//! use partrs::ParseConfig;
//!
//! // Custom limits: 4 KiB headers, 10 MiB payloads
//! let config = ParseConfig::default()
//!     .with_max_header_size(4096)
//!     .with_max_file_size(10 * 1024 * 1024);
//!
//! assert_eq!(config.max_header_size(), 4096);
//! ```

/// Default maximum size of a part's header block (8 KiB).
pub const DEFAULT_MAX_HEADER_SIZE: usize = 8 * 1024;

/// Default maximum size of a part's payload (2 GiB - 1).
pub const DEFAULT_MAX_FILE_SIZE: u64 = (1 << 31) - 1;

/// Configuration for multipart parsing behavior.
///
/// `ParseConfig` carries the two per-part limits enforced by the parser:
///
/// - `max_header_size` - No part header block may exceed this many bytes
///   before its terminating CRLF CRLF is seen
///   ([`MultipartError::HeaderTooLarge`](crate::MultipartError::HeaderTooLarge))
/// - `max_file_size` - No part payload may exceed this many bytes
///   ([`MultipartError::PartTooLarge`](crate::MultipartError::PartTooLarge))
///
/// Both limits apply per part, not to the body as a whole. The payload
/// limit is enforced incrementally, before overshooting bytes are handed
/// to the caller, so an oversized upload fails without being buffered.
///
/// # Example
///
/// ```
/// use partrs::{ParseConfig, DEFAULT_MAX_HEADER_SIZE};
///
/// // Use default configuration
/// let config = ParseConfig::default();
/// assert_eq!(config.max_header_size(), DEFAULT_MAX_HEADER_SIZE);
///
/// // Builder pattern
/// let config = ParseConfig::new()
///     .with_max_header_size(16 * 1024)
///     .with_max_file_size(50 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseConfig {
    /// Maximum header block size per part, in bytes.
    max_header_size: usize,

    /// Maximum payload size per part, in bytes.
    max_file_size: u64,
}

impl ParseConfig {
    /// Creates a configuration with the default limits.
    ///
    /// # Example
    ///
    /// ```
    /// use partrs::ParseConfig;
    ///
    /// let config = ParseConfig::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum header block size per part.
    ///
    /// # Example
    ///
    /// ```
    /// use partrs::ParseConfig;
    ///
    /// let config = ParseConfig::default().with_max_header_size(4096);
    /// assert_eq!(config.max_header_size(), 4096);
    /// ```
    pub fn with_max_header_size(mut self, size: usize) -> Self {
        self.max_header_size = size;
        self
    }

    /// Sets the maximum payload size per part.
    ///
    /// # Example
    ///
    /// ```
    /// use partrs::ParseConfig;
    ///
    /// let config = ParseConfig::default().with_max_file_size(10 * 1024 * 1024);
    /// assert_eq!(config.max_file_size(), 10 * 1024 * 1024);
    /// ```
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Returns the maximum header block size per part.
    pub fn max_header_size(&self) -> usize {
        self.max_header_size
    }

    /// Returns the maximum payload size per part.
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_header_size: DEFAULT_MAX_HEADER_SIZE,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParseConfig::default();
        assert_eq!(config.max_header_size(), DEFAULT_MAX_HEADER_SIZE);
        assert_eq!(config.max_file_size(), DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ParseConfig::new()
            .with_max_header_size(4096)
            .with_max_file_size(1024);

        assert_eq!(config.max_header_size(), 4096);
        assert_eq!(config.max_file_size(), 1024);
    }

    #[test]
    fn test_default_file_limit_is_signed_32_bit_max() {
        assert_eq!(DEFAULT_MAX_FILE_SIZE, 2_147_483_647);
    }
}
