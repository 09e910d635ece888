//! Error types for the link autofill pipeline
//!
//! Display strings double as the user-facing messages reported back to the
//! invoking UI, so they read as complete sentences.

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::types::Resolution;

/// Error type for all autofill operations
///
/// Implements Display for human-readable messages and Serialize
/// for Tauri command compatibility.
#[derive(Error, Debug)]
pub enum AutolinksError {
    /// Input rejected before any page interaction (empty batch, no 1080p link,
    /// missing size or episode field)
    #[error("{0}")]
    Validation(String),

    /// A page control the round needs is not present
    #[error("Could not find {0}")]
    FormControlNotFound(String),

    /// The page reported that submitting a round failed
    #[error("Failed to add {0} link")]
    SubmitFailed(Resolution),

    /// Quality label has no exact or partial option match; never fatal
    #[error("Quality \"{0}\" not found in dropdown")]
    ClassificationMiss(String),

    /// The player URL could not be derived from a link
    #[error("Failed to transform link: {0}")]
    TransformFailed(String),

    /// Transport-level failure reported by the host (e.g. wrong page)
    #[error("{0}")]
    Messaging(String),

    /// Failed to parse an editor page snapshot
    #[error("Failed to parse HTML: {0}")]
    Parse(String),

    /// Reading or writing saved inputs failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Saved inputs could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Serialize for AutolinksError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for autofill operations
pub type Result<T> = std::result::Result<T, AutolinksError>;
