//! Boundary between the pipeline and the editor page
//!
//! The pipeline never touches markup directly. A host-side driver implements
//! these traits (element lookup, UI event dispatch) and reports success as
//! plain booleans.

use serde::{Deserialize, Serialize};

use crate::types::Language;

/// Values written into the add-link form for one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkFields {
    /// Link type option (e.g. "Direct & Telegram Download Links")
    pub link_type: String,

    /// Language option text; `None` leaves the form's default
    pub language: Option<Language>,

    /// Quality option text, already resolved against the dropdown when possible
    pub quality: String,

    /// Size text for this round
    pub size: String,

    /// The single link submitted this round
    pub link: String,
}

/// The multi-step add-link form
pub trait LinkForm {
    /// Triggers the control that reveals the add-link form
    ///
    /// Returns `false` if the control is not on the page.
    fn open_link_form(&mut self) -> bool;

    /// Writes all round values into the form
    fn set_fields(&mut self, fields: &LinkFields);

    /// Presses the form's submit control
    ///
    /// Returns `false` if the form is not visible or the control is missing.
    fn submit(&mut self) -> bool;

    /// Texts of the quality dropdown options, if the driver can read them
    fn quality_options(&self) -> Option<Vec<String>> {
        None
    }

    /// Whether the form has finished re-rendering; `None` means no signal
    fn is_ready(&self) -> Option<bool> {
        None
    }
}

/// The repeating player embed rows
pub trait PlayerFields {
    /// Adds rows until at least `count` exist; `false` if rows cannot be added
    fn ensure_player_row_count(&mut self, count: usize) -> bool;

    /// Fills title inputs in order, returning how many were filled
    fn set_player_titles(&mut self, titles: &[String]) -> usize;

    /// Sets source dropdowns in order, returning how many were set
    fn set_player_dropdowns(&mut self, values: &[String]) -> usize;

    /// Writes a player URL; `false` if no URL field exists at that index
    fn set_player_url(&mut self, index: usize, value: &str) -> bool;
}

/// Read-only values from the editor page
pub trait PageMetadata {
    /// Raw value of the episode number field; `None` if the field is absent
    fn read_episode_number(&self) -> Option<String>;
}

/// Notification severity, also used as the response type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Error,
}

/// Fire-and-forget user notifications
pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity);
}

/// Everything the pipeline needs from one editor page
pub trait EditorPage: LinkForm + PlayerFields + PageMetadata + Notifier {}

impl<T: LinkForm + PlayerFields + PageMetadata + Notifier + ?Sized> EditorPage for T {}
