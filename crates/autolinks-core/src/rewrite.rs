//! Player URL rewriting
//!
//! Builds the first player's embed URL by moving a download link's filename
//! onto the rehost domain.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{AutolinksError, Result};

/// Default host serving rehosted files
pub const DEFAULT_REHOST_DOMAIN: &str = "cscloud12.online";

/// Matches `/<segment>/<segment>:/<segment>/<filename>` index paths
static INDEX_PATH_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"/[^/]*/[^/]*:/[^/]*/(.+)$").ok());

/// Literal escapes replaced after percent-decoding
const SUPPLEMENTAL_ESCAPES: [(&str, &str); 5] = [
    ("%20", " "),
    ("%5B", "["),
    ("%5D", "]"),
    ("%2D", "-"),
    ("%2E", "."),
];

/// Rehosts a link's filename under `https://<domain>/`
///
/// # Errors
/// Returns `TransformFailed` if no filename can be extracted or it does not
/// percent-decode
///
/// # Example
/// ```
/// use autolinks_core::rewrite::rehost_link;
/// let url = rehost_link(
///     "https://dl.example/server5/1:/202508/My%20Show%20S01E02%20%5BWEB-DL%5D.mkv",
///     "cscloud12.online",
/// ).unwrap();
/// assert_eq!(url, "https://cscloud12.online/My Show S01E02 [WEB-DL].mkv");
/// ```
pub fn rehost_link(link: &str, domain: &str) -> Result<String> {
    let raw = extract_filename(link).ok_or_else(|| {
        warn!(link, "could not extract filename");
        AutolinksError::TransformFailed(format!("no filename in {}", link))
    })?;

    let filename = decode_filename(raw)?;
    let url = format!("https://{}/{}", domain, filename);
    debug!(link, %url, "rehosted link");
    Ok(url)
}

/// Extracts the trailing filename from a link
///
/// Prefers the segment after an index path like `/server5/1:/202508/`,
/// otherwise takes everything after the last `/`.
pub fn extract_filename(link: &str) -> Option<&str> {
    let from_index = INDEX_PATH_RE
        .as_ref()
        .and_then(|re| re.captures(link))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());

    let filename = match from_index {
        Some(name) => name,
        None => {
            let idx = link.rfind('/')?;
            &link[idx + 1..]
        }
    };

    if filename.is_empty() {
        None
    } else {
        Some(filename)
    }
}

/// Percent-decodes a filename, then applies the literal escape pass
///
/// # Errors
/// Returns `TransformFailed` for malformed escapes or non-UTF-8 results
pub fn decode_filename(raw: &str) -> Result<String> {
    if has_malformed_escape(raw) {
        return Err(AutolinksError::TransformFailed(format!(
            "malformed escape in {}",
            raw
        )));
    }

    let decoded = urlencoding::decode(raw)
        .map_err(|e| AutolinksError::TransformFailed(format!("{}: {}", raw, e)))?;

    Ok(SUPPLEMENTAL_ESCAPES
        .iter()
        .fold(decoded.into_owned(), |name, (escape, literal)| {
            name.replace(escape, literal)
        }))
}

/// True if a `%` is not followed by two hex digits
fn has_malformed_escape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !(bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    })
}

/// Filename component of a rehosted player URL, without query or fragment
pub fn player_filename(url: &str) -> &str {
    let last = url.rsplit('/').next().unwrap_or(url);
    let last = last.split('?').next().unwrap_or(last);
    last.split('#').next().unwrap_or(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rehost_index_path() {
        let url = rehost_link(
            "https://dl.example/server5/1:/202508/My%20Show%20S01E02%20%5BWEB-DL%5D.mkv",
            DEFAULT_REHOST_DOMAIN,
        )
        .unwrap();
        assert_eq!(url, "https://cscloud12.online/My Show S01E02 [WEB-DL].mkv");
    }

    #[test]
    fn test_index_path_keeps_nested_segments() {
        let name = extract_filename("https://dl.example/server5/1:/202508/sub/file.mkv");
        assert_eq!(name, Some("sub/file.mkv"));
    }

    #[test]
    fn test_fallback_to_last_segment() {
        let name = extract_filename("https://dl.example/files/Show.720p.mkv");
        assert_eq!(name, Some("Show.720p.mkv"));
    }

    #[test]
    fn test_no_separator_fails() {
        let result = rehost_link("Show.720p.mkv", DEFAULT_REHOST_DOMAIN);
        assert!(matches!(result, Err(AutolinksError::TransformFailed(_))));
    }

    #[test]
    fn test_trailing_slash_fails() {
        let result = rehost_link("https://dl.example/files/", DEFAULT_REHOST_DOMAIN);
        assert!(matches!(result, Err(AutolinksError::TransformFailed(_))));
    }

    #[test]
    fn test_malformed_escape_fails() {
        let result = rehost_link("https://dl.example/files/Show%zz.mkv", DEFAULT_REHOST_DOMAIN);
        assert!(matches!(result, Err(AutolinksError::TransformFailed(_))));

        let truncated = decode_filename("Show%2");
        assert!(truncated.is_err());
    }

    #[test]
    fn test_double_encoded_escapes_decoded_by_second_pass() {
        let name = decode_filename("Show%2520%255B1080p%255D%252Emkv").unwrap();
        assert_eq!(name, "Show [1080p].mkv");
    }

    #[test]
    fn test_custom_domain() {
        let url = rehost_link("https://a.example/x/y.mp4", "cdn.example").unwrap();
        assert_eq!(url, "https://cdn.example/y.mp4");
    }

    #[test]
    fn test_player_filename_strips_query_and_fragment() {
        assert_eq!(player_filename("https://h/a/b.mkv?x=1#t"), "b.mkv");
        assert_eq!(player_filename("https://h/My Show.mkv"), "My Show.mkv");
    }
}
