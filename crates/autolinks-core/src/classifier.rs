//! Link classifier
//!
//! Infers language, release format and resolution from a raw link using
//! case-insensitive substring matching against fixed vocabularies, and maps
//! the resulting quality label onto the form's dropdown options.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{AutolinksError, Result};
use crate::types::{Format, Language, LinkInfo, Resolution};

/// Format markers checked against the uppercased link, most specific first
const FORMAT_MARKERS: [(&str, Format); 8] = [
    ("BLURAY", Format::BluRay),
    ("BLU-RAY", Format::BluRay),
    ("WEBRIP", Format::WebRip),
    ("WEB-DL", Format::WebDl),
    ("WEBDL", Format::WebDlCompact),
    ("HDRIP", Format::HdRip),
    ("HDTV", Format::Hdtv),
    ("DVDRIP", Format::DvdRip),
];

static RESOLUTION_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(1080p|720p|480p)").ok());

/// Classifies a single link
///
/// Resolution defaults to 1080p when the link names none; format defaults
/// to WEB-DL.
///
/// # Example
/// ```
/// use autolinks_core::{classify, Format, Language, Resolution};
/// let info = classify("https://cdn.example/Show.S01E02.720p.Hindi.WEBRip.mkv");
/// assert_eq!(info.language, Some(Language::Hindi));
/// assert_eq!(info.format, Format::WebRip);
/// assert_eq!(info.resolution, Resolution::P720);
/// ```
pub fn classify(link: &str) -> LinkInfo {
    let info = LinkInfo {
        language: detect_language(link),
        format: detect_format(link),
        resolution: detect_resolution(link).unwrap_or(Resolution::P1080),
    };

    debug!(
        link,
        language = ?info.language,
        quality = %info.quality_label(),
        "classified link"
    );

    info
}

/// Returns the first vocabulary language contained in the link
pub fn detect_language(link: &str) -> Option<Language> {
    let lower = link.to_lowercase();
    Language::ALL
        .into_iter()
        .find(|lang| lower.contains(&lang.as_str().to_lowercase()))
}

/// Finds the first resolution token in the link, ignoring case
pub fn detect_resolution(link: &str) -> Option<Resolution> {
    let re = RESOLUTION_RE.as_ref()?;
    let caps = re.captures(link)?;
    Resolution::from_token(caps.get(1)?.as_str())
}

/// Detects the release format, falling back to WEB-DL
pub fn detect_format(link: &str) -> Format {
    let upper = link.to_uppercase();
    FORMAT_MARKERS
        .iter()
        .find(|(marker, _)| upper.contains(marker))
        .map(|(_, format)| *format)
        .unwrap_or_default()
}

/// Maps a leading quality token onto the form's exact format label
///
/// Shorthand tokens expand ("HMAX" becomes "HMAX WEB-DL", "HD" becomes
/// "HD CAM", "Leak" becomes "Leak HDRip"); canonical tokens map to
/// themselves. Matching is case-sensitive.
pub fn normalize_format_token(token: &str) -> Option<Format> {
    let format = match token {
        "WEB-DL" => Format::WebDl,
        "WEBRip" => Format::WebRip,
        "BluRay" => Format::BluRay,
        "WEBDL" => Format::WebDlCompact,
        "HDRip" => Format::HdRip,
        "HDTV" => Format::Hdtv,
        "DVDRip" => Format::DvdRip,
        "HMAX" => Format::HmaxWebDl,
        "HD" => Format::HdCam,
        "HC-HDRip" => Format::HcHdRip,
        "HC-WEBRip" => Format::HcWebRip,
        "Leak" => Format::LeakHdRip,
        "PRE-WEBRip" => Format::PreWebRip,
        _ => return None,
    };
    Some(format)
}

/// Recovers the format from a quality label via its first token
pub fn format_from_label(label: &str) -> Option<Format> {
    label.split(' ').next().and_then(normalize_format_token)
}

/// Builds the quality label for a forced resolution
///
/// The format is taken from the link's own label and normalized through
/// [`normalize_format_token`]; whatever resolution was detected is discarded.
pub fn quality_label_for(info: &LinkInfo, resolution: Resolution) -> String {
    let format = format_from_label(&info.quality_label()).unwrap_or(info.format);
    format!("{} {}", format, resolution)
}

/// How a quality label was resolved against the dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QualityMatch {
    /// An option's text equals the label
    Exact(String),
    /// An option contains both the first and second label tokens
    Partial(String),
}

impl QualityMatch {
    /// Text of the selected option
    pub fn option(&self) -> &str {
        match self {
            QualityMatch::Exact(option) | QualityMatch::Partial(option) => option,
        }
    }
}

/// Resolves a quality label against the dropdown option texts
///
/// Tries an exact match first, then a partial match on the label's first two
/// space-separated tokens.
///
/// # Errors
/// Returns `ClassificationMiss` when neither strategy finds an option
pub fn match_quality_option(options: &[String], label: &str) -> Result<QualityMatch> {
    if let Some(option) = options.iter().map(|o| o.trim()).find(|o| *o == label) {
        return Ok(QualityMatch::Exact(option.to_string()));
    }

    let mut tokens = label.split(' ');
    if let (Some(first), Some(second)) = (tokens.next(), tokens.next())
        && let Some(option) = options
            .iter()
            .map(|o| o.trim())
            .find(|o| o.contains(first) && o.contains(second))
    {
        debug!(label, option, "partial quality match");
        return Ok(QualityMatch::Partial(option.to_string()));
    }

    warn!(label, "quality not found in dropdown");
    Err(AutolinksError::ClassificationMiss(label.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn options(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_classify_full_link() {
        let info = classify("https://dl.example/server5/1:/202508/Show.S01E02.1080p.Korean.BluRay.mkv");
        assert_eq!(info.language, Some(Language::Korean));
        assert_eq!(info.format, Format::BluRay);
        assert_eq!(info.resolution, Resolution::P1080);
        assert_eq!(info.quality_label(), "BluRay 1080p");
    }

    #[test]
    fn test_classify_defaults() {
        let info = classify("https://dl.example/file.mkv");
        assert_eq!(info.language, None);
        assert_eq!(info.format, Format::WebDl);
        assert_eq!(info.resolution, Resolution::P1080);
    }

    #[test]
    fn test_language_is_case_insensitive() {
        assert_eq!(detect_language("movie.TAMIL.720p"), Some(Language::Tamil));
    }

    #[test]
    fn test_language_vocabulary_order_breaks_ties() {
        // Both present; Hindi precedes English in priority
        assert_eq!(detect_language("Movie English Hindi Dual"), Some(Language::Hindi));
    }

    #[test]
    fn test_resolution_detection_ignores_case() {
        assert_eq!(detect_resolution("movie.720P.mkv"), Some(Resolution::P720));
        assert_eq!(detect_resolution("movie.480p.mkv"), Some(Resolution::P480));
        assert_eq!(detect_resolution("movie.2160p.mkv"), None);
    }

    #[test]
    fn test_format_bluray_beats_webrip() {
        assert_eq!(detect_format("movie.WEBRip.BluRay.mkv"), Format::BluRay);
        assert_eq!(detect_format("movie.blu-ray.mkv"), Format::BluRay);
    }

    #[test]
    fn test_format_priority_chain() {
        assert_eq!(detect_format("x.webrip.web-dl"), Format::WebRip);
        assert_eq!(detect_format("x.web-dl.hdrip"), Format::WebDl);
        assert_eq!(detect_format("x.webdl.hdtv"), Format::WebDlCompact);
        assert_eq!(detect_format("x.hdrip.hdtv"), Format::HdRip);
        assert_eq!(detect_format("x.hdtv.dvdrip"), Format::Hdtv);
        assert_eq!(detect_format("x.dvdrip"), Format::DvdRip);
    }

    #[test]
    fn test_format_default_is_web_dl() {
        assert_eq!(detect_format("x.mkv"), Format::WebDl);
    }

    #[test]
    fn test_normalize_shorthand_tokens() {
        assert_eq!(normalize_format_token("HMAX"), Some(Format::HmaxWebDl));
        assert_eq!(normalize_format_token("HD"), Some(Format::HdCam));
        assert_eq!(normalize_format_token("Leak"), Some(Format::LeakHdRip));
        assert_eq!(normalize_format_token("webrip"), None);
    }

    #[test]
    fn test_quality_label_for_overrides_resolution() {
        let info = classify("Show.1080p.WEBRip.mkv");
        assert_eq!(quality_label_for(&info, Resolution::P720), "WEBRip 720p");
        assert_eq!(quality_label_for(&info, Resolution::P480), "WEBRip 480p");
    }

    #[test]
    fn test_match_exact_option() {
        let opts = options(&["WEB-DL 720p", " WEB-DL 1080p "]);
        let matched = match_quality_option(&opts, "WEB-DL 1080p").unwrap();
        assert_eq!(matched, QualityMatch::Exact("WEB-DL 1080p".to_string()));
    }

    #[test]
    fn test_match_partial_option() {
        let opts = options(&["BluRay 720p", "BluRay 1080p x265"]);
        let matched = match_quality_option(&opts, "BluRay 1080p").unwrap();
        assert_eq!(matched.option(), "BluRay 1080p x265");
        assert!(matches!(matched, QualityMatch::Partial(_)));
    }

    #[test]
    fn test_match_miss() {
        let opts = options(&["HDTV 720p"]);
        let result = match_quality_option(&opts, "DVDRip 480p");
        match result {
            Err(AutolinksError::ClassificationMiss(label)) => assert_eq!(label, "DVDRip 480p"),
            _ => panic!("Expected ClassificationMiss error"),
        }
    }

    #[test]
    fn test_match_partial_with_spaced_format_uses_first_two_tokens() {
        // "HMAX WEB-DL 1080p" only checks "HMAX" and "WEB-DL"
        let opts = options(&["HMAX WEB-DL 720p"]);
        let matched = match_quality_option(&opts, "HMAX WEB-DL 1080p").unwrap();
        assert_eq!(matched.option(), "HMAX WEB-DL 720p");
    }

    const ALL_FORMATS: [Format; 13] = [
        Format::WebDl,
        Format::WebRip,
        Format::BluRay,
        Format::WebDlCompact,
        Format::HdRip,
        Format::Hdtv,
        Format::DvdRip,
        Format::HmaxWebDl,
        Format::HdCam,
        Format::HcHdRip,
        Format::HcWebRip,
        Format::LeakHdRip,
        Format::PreWebRip,
    ];

    proptest! {
        #[test]
        fn test_label_format_roundtrip_is_stable(
            format_idx in 0usize..13,
            res_idx in 0usize..3,
        ) {
            let info = LinkInfo {
                language: None,
                format: ALL_FORMATS[format_idx],
                resolution: Resolution::ALL[res_idx],
            };
            let label = info.quality_label();
            prop_assert_eq!(format_from_label(&label), Some(info.format));
            prop_assert_eq!(quality_label_for(&info, info.resolution), label);
        }

        #[test]
        fn test_detected_format_survives_reclassification(
            format_idx in 0usize..7,
            res_idx in 0usize..3,
        ) {
            let info = LinkInfo {
                language: None,
                format: ALL_FORMATS[format_idx],
                resolution: Resolution::ALL[res_idx],
            };
            prop_assert_eq!(detect_format(&info.quality_label()), info.format);
        }

        #[test]
        fn test_bluray_always_wins(prefix in "[a-z.]{0,10}", suffix in "[a-z.]{0,10}") {
            let link = format!("{}WEBRIP{}BLURAY", prefix, suffix);
            prop_assert_eq!(detect_format(&link), Format::BluRay);
        }
    }
}
