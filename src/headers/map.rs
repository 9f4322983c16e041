//! Ordered, case-insensitive header map for one part.

use crate::headers::param_value;
use crate::util::trim_lws;

/// The parsed header block of a single part.
///
/// Headers keep wire order, and duplicate names are preserved; lookups
/// fold ASCII case. Lines without a `:` are not indexed by name but are
/// kept verbatim in a raw list for diagnostics -- a malformed header line
/// never poisons its part.
///
/// The `name`, `filename`, and `media_type` accessors are convenience
/// views over `Content-Disposition` and `Content-Type`; each returns
/// `None` when the backing header or parameter is absent. They are
/// computed on access, not cached.
///
/// # Example
///
/// ```
/// use partrs::PartHeaders;
/// # use std::io::Cursor;
/// # use partrs::Multipart;
/// # let body = b"--b\r\nContent-Disposition: form-data; name=\"greeting\"\r\n\r\nhi\r\n--b--";
/// # let mut multipart = Multipart::new(Cursor::new(&body[..]), "b");
/// # let part = multipart.next_part().unwrap().unwrap();
/// let headers: &PartHeaders = part.headers();
/// assert_eq!(headers.get("content-disposition").is_some(), true);
/// assert_eq!(part.name().as_deref(), Some("greeting"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PartHeaders {
    entries: Vec<(String, String)>,
    raw: Vec<String>,
}

impl PartHeaders {
    /// A header map with no entries, for parts whose header block is empty.
    pub(crate) fn empty() -> Self {
        Self::default()
    }

    /// Parses a header block: the bytes between the delimiter CRLF and the
    /// terminating CRLF CRLF, exclusive.
    ///
    /// Lines are split on CRLF. Each line splits on the first `:` into a
    /// name and a value; the value is trimmed of linear whitespace. Lines
    /// without a `:` go to the raw list. Folded continuation lines are
    /// obsolete in HTTP/1.1 and are not recognized; they land in the raw
    /// list like any other colon-less line.
    pub(crate) fn parse(block: &[u8]) -> Self {
        let text = String::from_utf8_lossy(block);
        let mut entries = Vec::new();
        let mut raw = Vec::new();

        for line in text.split("\r\n") {
            if line.is_empty() {
                continue;
            }
            match line.split_once(':') {
                Some((name, value)) => {
                    entries.push((trim_lws(name).to_string(), trim_lws(value).to_string()));
                }
                None => raw.push(line.to_string()),
            }
        }

        Self { entries, raw }
    }

    /// First value for `name`, folding ASCII case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All values for `name` in wire order, folding ASCII case.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All `(name, value)` pairs in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of indexed headers (raw lines excluded).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no header line carried a `:`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Header lines that had no `:` and were therefore not indexed.
    pub fn raw_lines(&self) -> &[String] {
        &self.raw
    }

    /// The `name` parameter of `Content-Disposition`, if any.
    pub fn name(&self) -> Option<String> {
        self.get("content-disposition")
            .and_then(|v| param_value(v, "name"))
    }

    /// The `filename` parameter of `Content-Disposition`, if any.
    pub fn filename(&self) -> Option<String> {
        self.get("content-disposition")
            .and_then(|v| param_value(v, "filename"))
    }

    /// The media type from `Content-Type`, with parameters stripped.
    pub fn media_type(&self) -> Option<String> {
        self.get("content-type")
            .map(|v| trim_lws(v.split(';').next().unwrap_or(v)).to_string())
            .filter(|v| !v.is_empty())
    }
}
