//! File size parsing and per-round scaling
//!
//! The 1080p size is entered by hand; the 720p and 480p rounds use half and
//! a quarter of it.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static SIZE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(GB|MB|KB)").ok());

/// Unit of a file size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeUnit {
    #[serde(rename = "KB")]
    Kb,
    #[serde(rename = "MB")]
    Mb,
    #[serde(rename = "GB")]
    Gb,
}

impl SizeUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            SizeUnit::Kb => "KB",
            SizeUnit::Mb => "MB",
            SizeUnit::Gb => "GB",
        }
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `<number> <unit>` size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeSpec {
    pub magnitude: f64,
    pub unit: SizeUnit,
}

impl SizeSpec {
    /// Parses the first `<number> <GB|MB|KB>` occurrence, ignoring case
    ///
    /// # Example
    /// ```
    /// use autolinks_core::size::{SizeSpec, SizeUnit};
    /// let size = SizeSpec::parse("about 2.5gb").unwrap();
    /// assert_eq!(size.magnitude, 2.5);
    /// assert_eq!(size.unit, SizeUnit::Gb);
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let caps = SIZE_RE.as_ref()?.captures(input)?;
        let magnitude = caps.get(1)?.as_str().parse::<f64>().ok()?;
        let unit = match caps.get(2)?.as_str().to_ascii_uppercase().as_str() {
            "GB" => SizeUnit::Gb,
            "MB" => SizeUnit::Mb,
            "KB" => SizeUnit::Kb,
            _ => return None,
        };
        Some(Self { magnitude, unit })
    }

    /// Half the size, one decimal place, same unit
    pub fn half(&self) -> String {
        format!("{} {}", one_decimal(self.magnitude / 2.0), self.unit)
    }

    /// A quarter of the size, one decimal place
    ///
    /// Gigabyte quarters below 1 are expressed as whole megabytes instead.
    pub fn quarter(&self) -> String {
        let quarter = self.magnitude / 4.0;
        if self.unit == SizeUnit::Gb && quarter < 1.0 {
            format!("{} MB", (quarter * 1000.0).round() as u64)
        } else {
            format!("{} {}", one_decimal(quarter), self.unit)
        }
    }
}

impl fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.magnitude, self.unit)
    }
}

/// Formats to one decimal place from the exact binary value
///
/// Exact ties (`x.x5` values such as 0.25) round up; everything else takes
/// the nearest decimal, so 0.35 (stored as 0.3499...) becomes "0.3".
fn one_decimal(value: f64) -> String {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        return format!("{:.1}", (value * 10.0).ceil() / 10.0);
    }
    format!("{:.1}", value)
}

/// Size strings for the three rounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaledSizes {
    pub full: String,
    pub half: String,
    pub quarter: String,
}

impl ScaledSizes {
    /// Derives the three round sizes from free text
    ///
    /// Input that does not parse is used verbatim for every round.
    pub fn from_input(input: &str) -> Self {
        match SizeSpec::parse(input) {
            Some(size) => Self {
                full: size.to_string(),
                half: size.half(),
                quarter: size.quarter(),
            },
            None => Self {
                full: input.to_string(),
                half: input.to_string(),
                quarter: input.to_string(),
            },
        }
    }
}
