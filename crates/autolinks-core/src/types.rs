//! Core data types for the link autofill pipeline
//!
//! Contains the vocabularies the classifier matches against and the
//! batch/link structures passed between pipeline stages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Target resolution of one submission round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "480p")]
    P480,
}

impl Resolution {
    /// Round order: 1080p first, then 720p, then 480p
    pub const ALL: [Resolution; 3] = [Resolution::P1080, Resolution::P720, Resolution::P480];

    pub fn as_str(self) -> &'static str {
        match self {
            Resolution::P1080 => "1080p",
            Resolution::P720 => "720p",
            Resolution::P480 => "480p",
        }
    }

    /// Case-insensitive parse of a resolution token
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "1080p" => Some(Resolution::P1080),
            "720p" => Some(Resolution::P720),
            "480p" => Some(Resolution::P480),
            _ => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audio language as listed in the target form's language selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Korean,
    Hindi,
    English,
    Tamil,
    Telugu,
    Kannada,
    Thai,
    Indonesian,
    Gujarati,
    Japanese,
    Malayalam,
    Chinese,
    Bengali,
    Spanish,
    Italian,
    French,
    Russian,
    Marathi,
    German,
    Ukrainian,
    Turkish,
}

impl Language {
    /// Detection priority; the first entry found in a link wins
    pub const ALL: [Language; 21] = [
        Language::Korean,
        Language::Hindi,
        Language::English,
        Language::Tamil,
        Language::Telugu,
        Language::Kannada,
        Language::Thai,
        Language::Indonesian,
        Language::Gujarati,
        Language::Japanese,
        Language::Malayalam,
        Language::Chinese,
        Language::Bengali,
        Language::Spanish,
        Language::Italian,
        Language::French,
        Language::Russian,
        Language::Marathi,
        Language::German,
        Language::Ukrainian,
        Language::Turkish,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Korean => "Korean",
            Language::Hindi => "Hindi",
            Language::English => "English",
            Language::Tamil => "Tamil",
            Language::Telugu => "Telugu",
            Language::Kannada => "Kannada",
            Language::Thai => "Thai",
            Language::Indonesian => "Indonesian",
            Language::Gujarati => "Gujarati",
            Language::Japanese => "Japanese",
            Language::Malayalam => "Malayalam",
            Language::Chinese => "Chinese",
            Language::Bengali => "Bengali",
            Language::Spanish => "Spanish",
            Language::Italian => "Italian",
            Language::French => "French",
            Language::Russian => "Russian",
            Language::Marathi => "Marathi",
            Language::German => "German",
            Language::Ukrainian => "Ukrainian",
            Language::Turkish => "Turkish",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Release format, spelled exactly as the target form's quality options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    #[default]
    #[serde(rename = "WEB-DL")]
    WebDl,
    #[serde(rename = "WEBRip")]
    WebRip,
    #[serde(rename = "BluRay")]
    BluRay,
    #[serde(rename = "WEBDL")]
    WebDlCompact,
    #[serde(rename = "HDRip")]
    HdRip,
    #[serde(rename = "HDTV")]
    Hdtv,
    #[serde(rename = "DVDRip")]
    DvdRip,
    #[serde(rename = "HMAX WEB-DL")]
    HmaxWebDl,
    #[serde(rename = "HD CAM")]
    HdCam,
    #[serde(rename = "HC-HDRip")]
    HcHdRip,
    #[serde(rename = "HC-WEBRip")]
    HcWebRip,
    #[serde(rename = "Leak HDRip")]
    LeakHdRip,
    #[serde(rename = "PRE-WEBRip")]
    PreWebRip,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Format::WebDl => "WEB-DL",
            Format::WebRip => "WEBRip",
            Format::BluRay => "BluRay",
            Format::WebDlCompact => "WEBDL",
            Format::HdRip => "HDRip",
            Format::Hdtv => "HDTV",
            Format::DvdRip => "DVDRip",
            Format::HmaxWebDl => "HMAX WEB-DL",
            Format::HdCam => "HD CAM",
            Format::HcHdRip => "HC-HDRip",
            Format::HcWebRip => "HC-WEBRip",
            Format::LeakHdRip => "Leak HDRip",
            Format::PreWebRip => "PRE-WEBRip",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes inferred from a single link string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkInfo {
    /// First vocabulary language found in the link, if any
    pub language: Option<Language>,

    /// Detected (or defaulted) release format
    pub format: Format,

    /// Resolution used in the quality label
    pub resolution: Resolution,
}

impl LinkInfo {
    /// Replaces the resolution regardless of what was detected
    pub fn with_resolution(self, resolution: Resolution) -> Self {
        Self { resolution, ..self }
    }

    /// Quality label as shown in the form's dropdown (e.g. "WEB-DL 1080p")
    pub fn quality_label(&self) -> String {
        format!("{} {}", self.format, self.resolution)
    }
}

/// Ordered list of raw links pasted by the user
///
/// Blank lines are dropped; links are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkBatch {
    links: Vec<String>,
}

impl LinkBatch {
    /// Splits text on newlines, trimming each line and dropping blank ones
    pub fn parse(text: &str) -> Self {
        let links = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { links }
    }

    pub fn from_links(links: Vec<String>) -> Self {
        Self { links }
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// First link whose text contains the resolution token verbatim
    pub fn find(&self, resolution: Resolution) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.contains(resolution.as_str()))
            .map(String::as_str)
    }

    /// Joins the links back into newline-separated text
    pub fn to_text(&self) -> String {
        self.links.join("\n")
    }
}
