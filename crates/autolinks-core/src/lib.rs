//! Dooplay Link Autofill Core Library
//!
//! Classifies pasted download links and drives the dooplay post editor's
//! add-link form through a host-supplied page driver.
//!
//! # Overview
//!
//! This crate provides the decision logic behind the autofill:
//! - Link classifier inferring language, release format and resolution
//! - Round sequencer submitting the 1080p, 720p and 480p links in order
//! - Player URL rewriting onto the rehost domain
//! - Episode renumbering of `E<NN>` tokens before processing
//!
//! Element lookup and UI event dispatch stay on the host side, behind the
//! [`LinkForm`], [`PlayerFields`], [`PageMetadata`] and [`Notifier`] traits.
//!
//! # Example
//!
//! ```no_run
//! use autolinks_core::{Autofill, EditorPage, Request};
//!
//! async fn run(page: &mut dyn EditorPage) {
//!     let autofill = Autofill::new();
//!     let response = autofill
//!         .dispatch(page, Request::ProcessLinks {
//!             links: "https://dl.example/Show.S01E01.1080p.WEB-DL.mkv".to_string(),
//!             size: "3 GB".to_string(),
//!             player2_scripts: None,
//!         })
//!         .await;
//!     println!("{}", response.message);
//! }
//! ```
//!
//! # Timing
//!
//! The editor page re-renders its form between submissions without firing
//! any event, so rounds are separated by fixed settle delays (see
//! [`Timings`]). Drivers that can observe readiness may report it through
//! [`LinkForm::is_ready`] to cut the waits short.

mod autofill;
pub mod classifier;
mod config;
mod error;
pub mod html;
mod message;
mod page;
pub mod player;
pub mod renumber;
pub mod rewrite;
pub mod sequencer;
pub mod size;
pub mod store;
mod types;

// Re-export main autofill API
pub use autofill::{Autofill, ReplaceOutcome};

// Re-export classifier functions
pub use classifier::{QualityMatch, classify, match_quality_option};

// Re-export configuration
pub use config::{AutolinksConfig, DEFAULT_LINK_TYPE, Timings};

// Re-export error types
pub use error::{AutolinksError, Result};

// Re-export page boundary traits
pub use page::{EditorPage, LinkFields, LinkForm, Notifier, PageMetadata, PlayerFields, Severity};

// Re-export messaging contract
pub use message::{Request, Response};

// Re-export sequencer API
pub use sequencer::{BatchReport, RoundPlan, RoundSequencer, SequencerState};

// Re-export data types
pub use types::{Format, Language, LinkBatch, LinkInfo, Resolution};

// Re-export helpers for convenience
pub use html::EditorSnapshot;
pub use player::PlayerReport;
pub use renumber::renumber;
pub use rewrite::rehost_link;
pub use size::ScaledSizes;
pub use store::{InputStore, JsonFileStore, SavedInputs};
