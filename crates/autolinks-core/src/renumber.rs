//! Episode renumbering
//!
//! Rewrites every `E<NN>` token in a batch to the episode number currently
//! set on the editor page.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};
use tracing::debug;

use crate::error::{AutolinksError, Result};
use crate::types::LinkBatch;

static EPISODE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"E[0-9]{2}").ok());

/// Trims an episode field value and left-pads it to two characters
///
/// The value is otherwise kept as typed, so "E5" stays "E5".
///
/// # Errors
/// Returns `Validation` if the value is empty
pub fn padded_episode(episode: &str) -> Result<String> {
    let episode = episode.trim();
    if episode.is_empty() {
        return Err(AutolinksError::Validation(
            "Episode number not found".to_string(),
        ));
    }
    Ok(format!("{:0>2}", episode))
}

/// Formats an episode number as a zero-padded `E<NN>` code
///
/// # Errors
/// Returns `Validation` if the value is empty
///
/// # Example
/// ```
/// use autolinks_core::renumber::episode_code;
/// assert_eq!(episode_code("7").unwrap(), "E07");
/// assert_eq!(episode_code("12").unwrap(), "E12");
/// ```
pub fn episode_code(episode: &str) -> Result<String> {
    padded_episode(episode).map(|padded| format!("E{}", padded))
}

/// Replaces every `E<2 digits>` occurrence in each link with the episode code
///
/// The input batch is left untouched; the rewritten copy is returned.
///
/// # Errors
/// Returns `Validation` if the episode value is empty
pub fn renumber(batch: &LinkBatch, episode: &str) -> Result<LinkBatch> {
    let code = episode_code(episode)?;
    let Some(re) = EPISODE_RE.as_ref() else {
        return Ok(batch.clone());
    };

    let links = batch
        .links()
        .iter()
        .map(|link| {
            let updated = re.replace_all(link, NoExpand(&code)).into_owned();
            debug!(original = %link, updated = %updated, "renumbered link");
            updated
        })
        .collect();

    Ok(LinkBatch::from_links(links))
}
