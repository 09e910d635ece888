//! Main autofill API
//!
//! Ties the classifier, renumbering, round sequencer and player step
//! together behind the typed request contract.

use tokio::time::sleep;
use tracing::{error, info};

use crate::config::AutolinksConfig;
use crate::error::{AutolinksError, Result};
use crate::message::{Request, Response};
use crate::page::{EditorPage, Severity};
use crate::renumber::{padded_episode, renumber};
use crate::sequencer::{BatchReport, RoundSequencer};
use crate::types::LinkBatch;

/// Outcome of a renumber-then-process request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOutcome {
    /// Zero-padded episode number (e.g. "07")
    pub episode: String,
    /// The renumbered batch that was processed
    pub batch: LinkBatch,
    /// Result of processing the renumbered batch
    pub result: std::result::Result<BatchReport, String>,
}

/// Main autofill API
///
/// Holds the configuration; each call drives one editor page.
#[derive(Debug, Clone, Default)]
pub struct Autofill {
    config: AutolinksConfig,
}

impl Autofill {
    /// Create an autofill runner with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an autofill runner with custom configuration
    pub fn with_config(config: AutolinksConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AutolinksConfig {
        &self.config
    }

    /// Handles one request and produces its single response
    ///
    /// Errors are folded into `type: "error"` responses.
    pub async fn dispatch<P: EditorPage + ?Sized>(&self, page: &mut P, request: Request) -> Response {
        match request {
            Request::ProcessLinks {
                links,
                size,
                player2_scripts,
            } => match self
                .process_links(page, &links, &size, player2_scripts.as_deref())
                .await
            {
                Ok(report) => Response::success(report.message),
                Err(e) => Response::error(e.to_string()),
            },
            Request::ReplaceAndProcessLinks {
                links,
                size,
                player2_scripts,
            } => match self
                .replace_and_process_links(page, &links, &size, player2_scripts.as_deref())
                .await
            {
                Ok(outcome) => {
                    let mut response = match &outcome.result {
                        Ok(report) => Response::success(&report.message),
                        Err(message) => Response::error(message),
                    };
                    response
                        .message
                        .push_str(&format!(" (Episode {})", outcome.episode));
                    response.replaced_links = Some(outcome.batch.to_text());
                    response
                }
                Err(e) => Response::error(e.to_string()),
            },
            Request::TestClick => {
                self.test_click(page);
                Response::success("Test click executed")
            }
        }
    }

    /// Validates the raw inputs and runs all rounds for a pasted batch
    ///
    /// # Arguments
    /// * `page` - Editor page driver
    /// * `links` - Newline-separated links
    /// * `size` - Free-text 1080p file size (e.g. "3 GB")
    /// * `player2_scripts` - Optional `<filename> : <snippet>` lines for player 2
    ///
    /// # Errors
    /// - `Validation` if links or size are blank, or no 1080p link is present
    /// - `FormControlNotFound` / `SubmitFailed` if a round fails
    pub async fn process_links<P: EditorPage + ?Sized>(
        &self,
        page: &mut P,
        links: &str,
        size: &str,
        player2_scripts: Option<&str>,
    ) -> Result<BatchReport> {
        let size = validate_inputs(links, size)?;
        let batch = LinkBatch::parse(links);
        self.run_batch(page, &batch, size, player2_scripts).await
    }

    /// Renumbers episode tokens from the page's episode field, then processes
    ///
    /// Returns `Ok` once renumbering succeeded; failures while processing the
    /// renumbered batch are carried in [`ReplaceOutcome::result`] so the
    /// caller still receives the rewritten links.
    ///
    /// # Errors
    /// - `Validation` if links or size are blank, the episode field is
    ///   missing, or its value is empty
    pub async fn replace_and_process_links<P: EditorPage + ?Sized>(
        &self,
        page: &mut P,
        links: &str,
        size: &str,
        player2_scripts: Option<&str>,
    ) -> Result<ReplaceOutcome> {
        let size = validate_inputs(links, size)?;

        let episode = page.read_episode_number().ok_or_else(|| {
            AutolinksError::Validation("Episode element not found on page".to_string())
        })?;
        let padded = padded_episode(&episode)?;
        let code = format!("E{}", padded);
        info!(%episode, %code, "replacing episode numbers");

        let batch = renumber(&LinkBatch::parse(links), &episode)?;
        page.notify(
            &format!("Episode numbers replaced with {}!", code),
            Severity::Success,
        );

        sleep(self.config.timings.renumber_handoff).await;
        let result = self
            .run_batch(page, &batch, size, player2_scripts)
            .await
            .map_err(|e| e.to_string());

        Ok(ReplaceOutcome {
            episode: padded,
            batch,
            result,
        })
    }

    /// Presses the add-link control once; returns whether it was found
    pub fn test_click<P: EditorPage + ?Sized>(&self, page: &mut P) -> bool {
        let found = page.open_link_form();
        info!(found, "test click");
        found
    }

    async fn run_batch<P: EditorPage + ?Sized>(
        &self,
        page: &mut P,
        batch: &LinkBatch,
        size: &str,
        player2_scripts: Option<&str>,
    ) -> Result<BatchReport> {
        let mut sequencer = RoundSequencer::new(self.config.clone());
        sequencer
            .run(page, batch, size, player2_scripts)
            .await
            .inspect_err(|e| error!(error = %e, "batch failed"))
    }
}

/// Rejects blank link text or size; returns the trimmed size
fn validate_inputs<'a>(links: &str, size: &'a str) -> Result<&'a str> {
    if links.trim().is_empty() {
        return Err(AutolinksError::Validation(
            "Please enter at least one download link".to_string(),
        ));
    }

    let size = size.trim();
    if size.is_empty() {
        return Err(AutolinksError::Validation(
            "Please enter file size for 1080p".to_string(),
        ));
    }

    Ok(size)
}
