//! Round sequencer
//!
//! Drives up to three dependent add-link submissions (1080p, 720p, 480p)
//! against the editor page, each separated by a settle delay because the
//! page re-renders its form between submissions without signalling it.
//! After the last round the player rows are populated.

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{debug, error, info, warn};

use crate::classifier::{classify, match_quality_option, quality_label_for};
use crate::config::AutolinksConfig;
use crate::error::{AutolinksError, Result};
use crate::page::{EditorPage, LinkFields, LinkForm, Severity};
use crate::player::{PlayerReport, populate_players};
use crate::size::ScaledSizes;
use crate::types::{LinkBatch, LinkInfo, Resolution};

/// Where the sequencer is in a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    Idle,
    Round1Pending,
    Round1Filling,
    Round2Pending,
    Round2Filling,
    Round3Pending,
    Round3Filling,
    PlayerPopulation,
    Done,
    Failed,
}

impl SequencerState {
    fn pending(resolution: Resolution) -> Self {
        match resolution {
            Resolution::P1080 => SequencerState::Round1Pending,
            Resolution::P720 => SequencerState::Round2Pending,
            Resolution::P480 => SequencerState::Round3Pending,
        }
    }

    fn filling(resolution: Resolution) -> Self {
        match resolution {
            Resolution::P1080 => SequencerState::Round1Filling,
            Resolution::P720 => SequencerState::Round2Filling,
            Resolution::P480 => SequencerState::Round3Filling,
        }
    }
}

/// One planned submission
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRound {
    pub resolution: Resolution,
    pub link: String,
    pub size: String,
    pub info: LinkInfo,
}

/// The rounds a batch will run, in order
///
/// The 720p link is carried here so the player step receives it explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundPlan {
    rounds: Vec<PlannedRound>,
}

impl RoundPlan {
    /// Plans rounds from a batch and a free-text size
    ///
    /// Round 1 keeps the 1080p link's detected format and language with a
    /// forced 1080p label. Rounds 2 and 3 re-classify their own links and
    /// force 720p/480p regardless of what the link itself says.
    ///
    /// # Errors
    /// - `Validation` if the batch is empty or has no 1080p link
    pub fn build(batch: &LinkBatch, size: &str) -> Result<Self> {
        if batch.is_empty() {
            return Err(AutolinksError::Validation("No valid links found".to_string()));
        }

        let link_1080p = batch
            .find(Resolution::P1080)
            .ok_or_else(|| AutolinksError::Validation("No 1080p link found".to_string()))?;

        let sizes = ScaledSizes::from_input(size);
        let base = classify(link_1080p);

        let mut rounds = vec![PlannedRound {
            resolution: Resolution::P1080,
            link: link_1080p.to_string(),
            size: sizes.full.clone(),
            info: base.with_resolution(Resolution::P1080),
        }];

        for (resolution, size) in [
            (Resolution::P720, &sizes.half),
            (Resolution::P480, &sizes.quarter),
        ] {
            if let Some(link) = batch.find(resolution) {
                rounds.push(PlannedRound {
                    resolution,
                    link: link.to_string(),
                    size: size.clone(),
                    info: classify(link).with_resolution(resolution),
                });
            } else {
                debug!(%resolution, "no link for round, skipping");
            }
        }

        Ok(Self { rounds })
    }

    pub fn rounds(&self) -> &[PlannedRound] {
        &self.rounds
    }

    /// The 720p link, if the batch has one
    pub fn link_720p(&self) -> Option<&str> {
        self.rounds
            .iter()
            .find(|r| r.resolution == Resolution::P720)
            .map(|r| r.link.as_str())
    }
}

/// Outcome of a completed batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Resolutions submitted, in order
    pub rounds: Vec<Resolution>,
    /// User-facing summary
    pub message: String,
    /// What the player step managed to fill
    pub players: PlayerReport,
}

/// Runs round plans against an editor page
pub struct RoundSequencer {
    config: AutolinksConfig,
    state: SequencerState,
    history: Vec<SequencerState>,
}

impl RoundSequencer {
    pub fn new(config: AutolinksConfig) -> Self {
        Self {
            config,
            state: SequencerState::Idle,
            history: vec![SequencerState::Idle],
        }
    }

    /// Current state
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Every state entered so far, starting with `Idle`
    pub fn history(&self) -> &[SequencerState] {
        &self.history
    }

    fn transition(&mut self, next: SequencerState) {
        debug!(from = ?self.state, to = ?next, "sequencer transition");
        self.state = next;
        self.history.push(next);
    }

    /// Runs a whole batch: plan, submit each round, then populate players
    ///
    /// # Errors
    /// - `Validation` if the batch is empty or has no 1080p link; no page
    ///   interaction happens in that case
    /// - `FormControlNotFound` if a round cannot open the add-link form
    /// - `SubmitFailed` if the page rejects a submission; later rounds are
    ///   not attempted
    pub async fn run<P: EditorPage + ?Sized>(
        &mut self,
        page: &mut P,
        batch: &LinkBatch,
        size: &str,
        player2_scripts: Option<&str>,
    ) -> Result<BatchReport> {
        let plan = match RoundPlan::build(batch, size) {
            Ok(plan) => plan,
            Err(e) => {
                self.transition(SequencerState::Failed);
                return Err(e);
            }
        };

        for planned in plan.rounds() {
            info!(
                resolution = %planned.resolution,
                link = %planned.link,
                quality = %planned.info.quality_label(),
                "planned round"
            );
        }

        let mut completed = Vec::with_capacity(plan.rounds().len());
        for (idx, planned) in plan.rounds().iter().enumerate() {
            if idx > 0 {
                sleep(self.config.timings.between_rounds).await;
            }

            if let Err(e) = self.run_round(page, idx + 1, planned).await {
                error!(resolution = %planned.resolution, error = %e, "round failed");
                page.notify(&e.to_string(), Severity::Error);
                self.transition(SequencerState::Failed);
                return Err(e);
            }
            completed.push(planned.resolution);
        }

        if completed.len() == 3 {
            page.notify("All download links processed!", Severity::Success);
        }
        let message = success_message(&completed);
        info!(rounds = completed.len(), "{}", message);

        sleep(self.config.timings.before_players).await;
        self.transition(SequencerState::PlayerPopulation);
        let players = populate_players(page, &self.config, plan.link_720p(), player2_scripts).await;
        self.transition(SequencerState::Done);

        Ok(BatchReport {
            rounds: completed,
            message,
            players,
        })
    }

    async fn run_round<P: EditorPage + ?Sized>(
        &mut self,
        page: &mut P,
        number: usize,
        planned: &PlannedRound,
    ) -> Result<()> {
        let resolution = planned.resolution;
        self.transition(SequencerState::pending(resolution));
        page.notify(
            &format!("Round {}: Adding {} link...", number, resolution),
            Severity::Info,
        );

        if !page.open_link_form() {
            return Err(AutolinksError::FormControlNotFound(
                "Add Links button".to_string(),
            ));
        }

        settle(&*page, self.config.timings.form_settle, self.config.timings.readiness_poll).await;
        self.transition(SequencerState::filling(resolution));

        let fields = LinkFields {
            link_type: self.config.link_type.clone(),
            language: planned.info.language,
            quality: resolve_quality(&*page, &planned.info, resolution),
            size: planned.size.clone(),
            link: planned.link.clone(),
        };
        debug!(?fields, "filling add-link form");
        page.set_fields(&fields);

        sleep(self.config.timings.submit_delay).await;
        if !page.submit() {
            return Err(AutolinksError::SubmitFailed(resolution));
        }

        page.notify(
            &format!("{} link added successfully!", resolution),
            Severity::Success,
        );
        Ok(())
    }
}

/// Picks the quality option text to write for a round
///
/// Falls back to the bare label (leaving the page's default selection) when
/// the dropdown has no exact or partial match.
fn resolve_quality<P: LinkForm + ?Sized>(page: &P, info: &LinkInfo, resolution: Resolution) -> String {
    let label = if resolution == Resolution::P1080 {
        info.quality_label()
    } else {
        quality_label_for(info, resolution)
    };

    let Some(options) = page.quality_options() else {
        return label;
    };

    match match_quality_option(&options, &label) {
        Ok(matched) => matched.option().to_string(),
        Err(e) => {
            warn!(error = %e, "keeping unmatched quality label");
            label
        }
    }
}

/// Waits for the form to settle
///
/// Polls the page's readiness signal when it has one, returning as soon as
/// it reports ready; never waits longer than `delay`.
pub(crate) async fn settle<P: LinkForm + ?Sized>(page: &P, delay: Duration, poll: Duration) {
    if page.is_ready().is_none() {
        sleep(delay).await;
        return;
    }

    let deadline = Instant::now() + delay;
    loop {
        if page.is_ready() == Some(true) {
            return;
        }
        let now = Instant::now();
        if now >= deadline {
            warn!(?delay, "form not ready after settle delay, continuing");
            return;
        }
        sleep(poll.min(deadline - now)).await;
    }
}

/// Summary reported once the rounds finish
pub fn success_message(rounds: &[Resolution]) -> String {
    match rounds {
        [_] => "1080p link added successfully!".to_string(),
        [_, second] => format!("1080p and {} links added successfully!", second),
        _ => "All links added successfully in 3 rounds!".to_string(),
    }
}
