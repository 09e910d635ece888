//! Typed request/response contract between the UI and the page side
//!
//! Requests are tagged by `action`; every request gets exactly one
//! [`Response`].

use serde::{Deserialize, Serialize};

use crate::page::Severity;

/// A request from the UI layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    /// Run the link rounds for a pasted batch
    #[serde(rename_all = "camelCase")]
    ProcessLinks {
        links: String,
        size: String,
        #[serde(default)]
        player2_scripts: Option<String>,
    },

    /// Rewrite episode tokens from the page's episode field, then run the rounds
    #[serde(rename_all = "camelCase")]
    ReplaceAndProcessLinks {
        links: String,
        size: String,
        #[serde(default)]
        player2_scripts: Option<String>,
    },

    /// Press the add-link control once, for checking the page driver
    TestClick,
}

/// The single reply to a [`Request`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub message: String,

    #[serde(rename = "type")]
    pub kind: Severity,

    /// Renumbered links, newline-joined (replace requests only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaced_links: Option<String>,
}

impl Response {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: Severity::Success,
            replaced_links: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: Severity::Error,
            replaced_links: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == Severity::Success
    }
}
