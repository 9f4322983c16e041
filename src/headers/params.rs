//! Content-type and content-disposition parameter extraction.
//!
//! RFC 2045 parameter syntax: `name=value` segments separated by `;`,
//! where a value is either a token (terminated by `;` or whitespace) or a
//! quoted string in which `\c` unescapes to `c`. Quoted values may contain
//! `;`, so this module scans rather than splitting on semicolons.

use crate::util::{is_lws, trim_lws};

/// Returns true iff the media type begins with `multipart/`.
///
/// The comparison folds ASCII case; parameters are ignored.
///
/// # Example
///
/// ```
/// use partrs::is_multipart;
///
/// assert!(is_multipart("multipart/form-data; boundary=xyz"));
/// assert!(is_multipart("Multipart/Mixed"));
/// assert!(!is_multipart("application/json"));
/// ```
pub fn is_multipart(content_type: &str) -> bool {
    let ct = trim_lws(content_type).as_bytes();
    ct.len() >= 10 && ct[..10].eq_ignore_ascii_case(b"multipart/")
}

/// Returns the `boundary` parameter of a multipart content type.
///
/// Returns `None` if the media type is not `multipart/*` or the parameter
/// is absent or empty. Quoted values are unescaped; unquoted values
/// terminate at `;` or whitespace. The returned boundary is used verbatim
/// (byte-exact, case-sensitive) when matching delimiters on the wire.
///
/// # Example
///
/// ```
/// use partrs::parse_boundary;
///
/// let ct = "multipart/form-data; boundary=----WebKitFormBoundary7MA4YWxkTrZu0gW";
/// assert_eq!(
///     parse_boundary(ct).as_deref(),
///     Some("----WebKitFormBoundary7MA4YWxkTrZu0gW"),
/// );
///
/// assert_eq!(parse_boundary(r#"multipart/mixed; boundary="a\"b""#).as_deref(), Some("a\"b"));
/// assert_eq!(parse_boundary("multipart/form-data"), None);
/// assert_eq!(parse_boundary("text/plain; boundary=x"), None);
/// ```
pub fn parse_boundary(content_type: &str) -> Option<String> {
    if !is_multipart(content_type) {
        return None;
    }
    param_value(content_type, "boundary").filter(|b| !b.is_empty())
}

/// Extracts a named parameter from a `;`-parameterized header value.
///
/// The segment before the first `;` (the media type or disposition type)
/// is skipped. Parameter names fold ASCII case. Returns the first match.
pub(crate) fn param_value(header: &str, name: &str) -> Option<String> {
    let bytes = header.as_bytes();
    let mut i = header.find(';')? + 1;

    while i < bytes.len() {
        // Skip whitespace and empty segments.
        while i < bytes.len() && (is_lws(bytes[i]) || bytes[i] == b';') {
            i += 1;
        }

        // Key runs to `=` or `;`. The stop byte is ASCII, so the slice
        // below lands on a char boundary even for non-ASCII keys.
        let key_start = i;
        while i < bytes.len() && bytes[i] != b'=' && bytes[i] != b';' {
            i += 1;
        }
        let key = trim_lws(&header[key_start..i]);
        if i >= bytes.len() || bytes[i] == b';' {
            // Valueless parameter; move on.
            continue;
        }
        i += 1;
        while i < bytes.len() && is_lws(bytes[i]) {
            i += 1;
        }

        if i < bytes.len() && bytes[i] == b'"' {
            let (value, consumed) = read_quoted(&header[i + 1..]);
            i += 1 + consumed;
            if key.eq_ignore_ascii_case(name) {
                return Some(value);
            }
        } else {
            let value_start = i;
            while i < bytes.len() && bytes[i] != b';' && !bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if key.eq_ignore_ascii_case(name) {
                return Some(header[value_start..i].to_string());
            }
        }
    }

    None
}

/// Reads a quoted-string body, unescaping `\c` to `c`.
///
/// `s` starts just past the opening quote. Returns the unescaped value and
/// the number of bytes consumed including the closing quote. An
/// unterminated quote consumes the rest of the input.
fn read_quoted(s: &str) -> (String, usize) {
    let mut out = String::new();
    let mut chars = s.char_indices();

    while let Some((idx, c)) = chars.next() {
        match c {
            '\\' => {
                if let Some((_, escaped)) = chars.next() {
                    out.push(escaped);
                } else {
                    return (out, s.len());
                }
            }
            '"' => return (out, idx + 1),
            _ => out.push(c),
        }
    }

    (out, s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_multipart_case_insensitive() {
        assert!(is_multipart("multipart/form-data"));
        assert!(is_multipart("MULTIPART/FORM-DATA; boundary=x"));
        assert!(is_multipart("  multipart/mixed"));
        assert!(!is_multipart("multipar"));
        assert!(!is_multipart("application/octet-stream"));
    }

    #[test]
    fn test_parse_boundary_token() {
        let ct = "multipart/form-data; boundary=simple-boundary";
        assert_eq!(parse_boundary(ct).as_deref(), Some("simple-boundary"));
    }

    #[test]
    fn test_parse_boundary_quoted() {
        let ct = r#"multipart/form-data; boundary="quoted boundary""#;
        assert_eq!(parse_boundary(ct).as_deref(), Some("quoted boundary"));
    }

    #[test]
    fn test_parse_boundary_quoted_escape() {
        let ct = r#"multipart/form-data; boundary="a\\b\"c""#;
        assert_eq!(parse_boundary(ct).as_deref(), Some("a\\b\"c"));
    }

    #[test]
    fn test_parse_boundary_param_name_case() {
        let ct = "multipart/form-data; Boundary=xyz";
        assert_eq!(parse_boundary(ct).as_deref(), Some("xyz"));
    }

    #[test]
    fn test_parse_boundary_after_other_params() {
        let ct = "multipart/form-data; charset=utf-8; boundary=xyz";
        assert_eq!(parse_boundary(ct).as_deref(), Some("xyz"));
    }

    #[test]
    fn test_parse_boundary_unquoted_stops_at_whitespace() {
        let ct = "multipart/form-data; boundary=abc def";
        assert_eq!(parse_boundary(ct).as_deref(), Some("abc"));
    }

    #[test]
    fn test_parse_boundary_missing_or_empty() {
        assert_eq!(parse_boundary("multipart/form-data"), None);
        assert_eq!(parse_boundary("multipart/form-data; boundary="), None);
        assert_eq!(parse_boundary("multipart/form-data; charset=utf-8"), None);
    }

    #[test]
    fn test_parse_boundary_not_multipart() {
        assert_eq!(parse_boundary("text/plain; boundary=xyz"), None);
    }

    #[test]
    fn test_param_value_quoted_semicolon() {
        // A `;` inside quotes must not terminate the value.
        let v = r#"form-data; name="a;b"; filename="f.txt""#;
        assert_eq!(param_value(v, "name").as_deref(), Some("a;b"));
        assert_eq!(param_value(v, "filename").as_deref(), Some("f.txt"));
    }

    #[test]
    fn test_param_value_unterminated_quote() {
        let v = r#"form-data; name="open"#;
        assert_eq!(param_value(v, "name").as_deref(), Some("open"));
    }

    #[test]
    fn test_param_value_valueless_segment() {
        let v = "form-data; flag; name=x";
        assert_eq!(param_value(v, "name").as_deref(), Some("x"));
        assert_eq!(param_value(v, "flag"), None);
    }
}
