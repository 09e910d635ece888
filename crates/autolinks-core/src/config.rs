//! Pipeline configuration
//!
//! Settle delays, the rehost domain and the fixed player row values. The
//! host page gives no completion events, so every delay here is a wait
//! between triggering a UI action and reading its effect.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::rewrite::DEFAULT_REHOST_DOMAIN;

/// Link type option selected for every round
pub const DEFAULT_LINK_TYPE: &str = "Direct & Telegram Download Links";

/// Settle delays between page actions
///
/// Serialized as integer milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Open add-link form → fill fields (default: 800ms)
    #[serde(with = "millis")]
    pub form_settle: Duration,
    /// Fill fields → press submit (default: 500ms)
    #[serde(with = "millis")]
    pub submit_delay: Duration,
    /// Submit → next round (default: 1500ms)
    #[serde(with = "millis")]
    pub between_rounds: Duration,
    /// Last round → player population (default: 2000ms)
    #[serde(with = "millis")]
    pub before_players: Duration,
    /// Add player rows → fill them (default: 1000ms)
    #[serde(with = "millis")]
    pub player_rows_settle: Duration,
    /// Fill titles/dropdowns → write player URLs (default: 1500ms)
    #[serde(with = "millis")]
    pub player_url_delay: Duration,
    /// Episode renumbering → batch processing (default: 1000ms)
    #[serde(with = "millis")]
    pub renumber_handoff: Duration,
    /// Poll interval when the page exposes a readiness signal (default: 100ms)
    #[serde(with = "millis")]
    pub readiness_poll: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            form_settle: Duration::from_millis(800),
            submit_delay: Duration::from_millis(500),
            between_rounds: Duration::from_millis(1500),
            before_players: Duration::from_millis(2000),
            player_rows_settle: Duration::from_millis(1000),
            player_url_delay: Duration::from_millis(1500),
            renumber_handoff: Duration::from_millis(1000),
            readiness_poll: Duration::from_millis(100),
        }
    }
}

/// Configuration for the whole autofill pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutolinksConfig {
    pub timings: Timings,
    /// Host the first player URL is rewritten onto (default: cscloud12.online)
    pub rehost_domain: String,
    /// Link type option written in every round
    pub link_type: String,
    /// Titles for the player rows, in row order
    pub player_titles: Vec<String>,
    /// Source dropdown values for the player rows, in row order
    pub player_sources: Vec<String>,
}

impl Default for AutolinksConfig {
    fn default() -> Self {
        Self {
            timings: Timings::default(),
            rehost_domain: DEFAULT_REHOST_DOMAIN.to_string(),
            link_type: DEFAULT_LINK_TYPE.to_string(),
            player_titles: vec![
                "Player 01 [No Ads   -  CS Player]".to_string(),
                "Player 02 [With Ads - Evo Player]".to_string(),
            ],
            player_sources: vec!["mp4".to_string(), "dtshcode".to_string()],
        }
    }
}

mod millis {
    use super::*;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
