//! Player row population
//!
//! Fills the embed player rows after the link rounds: titles, source
//! dropdowns, the rehosted 720p URL for player 1 and, when script text is
//! supplied, the matching embed snippet for player 2.

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::AutolinksConfig;
use crate::page::{EditorPage, Severity};
use crate::rewrite::{player_filename, rehost_link};

/// What the player step filled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerReport {
    pub titles_filled: usize,
    pub dropdowns_filled: usize,
    /// URL written into player 1, if any
    pub player_url: Option<String>,
    /// Whether player 2 received an embed snippet
    pub secondary_filled: bool,
}

/// Populates the player rows
///
/// Never fails: each missing piece is reported through the page's notifier
/// and the remaining steps are skipped or continue as far as they can. The
/// main link rounds are already committed at this point.
pub async fn populate_players<P: EditorPage + ?Sized>(
    page: &mut P,
    config: &AutolinksConfig,
    link_720p: Option<&str>,
    player2_scripts: Option<&str>,
) -> PlayerReport {
    info!(has_scripts = player2_scripts.is_some(), "adding player sources");
    page.notify("Adding player sources...", Severity::Info);

    let mut report = PlayerReport::default();

    if page.ensure_player_row_count(config.player_titles.len()) {
        sleep(config.timings.player_rows_settle).await;
    } else {
        warn!("could not add player rows, filling existing ones");
    }

    report.titles_filled = page.set_player_titles(&config.player_titles);
    report.dropdowns_filled = page.set_player_dropdowns(&config.player_sources);
    debug!(
        titles = report.titles_filled,
        dropdowns = report.dropdowns_filled,
        "filled player rows"
    );
    page.notify(
        &format!("Added {} player sources successfully!", report.titles_filled),
        Severity::Success,
    );

    sleep(config.timings.player_url_delay).await;

    report.player_url = fill_primary_url(page, &config.rehost_domain, link_720p);

    if let Some(url) = report.player_url.as_deref()
        && let Some(scripts) = player2_scripts.filter(|s| !s.trim().is_empty())
    {
        report.secondary_filled = fill_secondary_url(page, url, scripts);
    }

    report
}

fn fill_primary_url<P: EditorPage + ?Sized>(
    page: &mut P,
    domain: &str,
    link_720p: Option<&str>,
) -> Option<String> {
    let Some(link) = link_720p else {
        warn!("no 720p link available for player URL");
        page.notify("No 720p link found for player URL", Severity::Error);
        return None;
    };

    let url = match rehost_link(link, domain) {
        Ok(url) => url,
        Err(e) => {
            warn!(error = %e, "player URL transform failed");
            page.notify("Failed to transform 720p link", Severity::Error);
            return None;
        }
    };

    if !page.set_player_url(0, &url) {
        page.notify("No player URL fields found", Severity::Error);
        return None;
    }

    info!(%url, "filled player 1 URL");
    page.notify("Player URL added successfully!", Severity::Success);
    Some(url)
}

fn fill_secondary_url<P: EditorPage + ?Sized>(page: &mut P, player_url: &str, scripts: &str) -> bool {
    let filename = player_filename(player_url);

    let Some(snippet) = find_player2_script(scripts, filename) else {
        warn!(filename, "no player 2 script matched");
        page.notify(
            &format!("No Player 2 script found for {}", filename),
            Severity::Error,
        );
        return false;
    };

    if !page.set_player_url(1, snippet) {
        page.notify("Player 2 URL field not found", Severity::Error);
        return false;
    }

    page.notify("Player 2 iframe added successfully!", Severity::Success);
    true
}

/// Finds the embed snippet for a filename in `<filename> : <snippet>` lines
///
/// The first non-blank line containing the filename and a ` : ` separator
/// wins; everything after the first separator is the snippet.
///
/// # Example
/// ```
/// use autolinks_core::player::find_player2_script;
/// let scripts = "a.mkv : <iframe src=\"x\"></iframe>\nb.mkv : <iframe src=\"y\"></iframe>";
/// assert_eq!(find_player2_script(scripts, "b.mkv"), Some("<iframe src=\"y\"></iframe>"));
/// ```
pub fn find_player2_script<'a>(scripts: &'a str, filename: &str) -> Option<&'a str> {
    scripts
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| line.contains(filename))
        .find_map(|line| line.split_once(" : ").map(|(_, snippet)| snippet))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::fake::{Call, FakePage};
    use std::time::Duration;
    use tokio::time::Instant;

    const L720: &str = "https://dl.example/server5/1:/202508/My%20Show%20S01E02%20%5BWEB-DL%5D.mkv";
    const URL: &str = "https://cscloud12.online/My Show S01E02 [WEB-DL].mkv";

    #[tokio::test(start_paused = true)]
    async fn test_populates_all_rows() {
        let mut page = FakePage::default();
        let config = AutolinksConfig::default();
        let report = populate_players(&mut page, &config, Some(L720), None).await;

        assert_eq!(report.titles_filled, 2);
        assert_eq!(report.dropdowns_filled, 2);
        assert_eq!(report.player_url.as_deref(), Some(URL));
        assert!(!report.secondary_filled);
        assert!(page.calls.contains(&Call::EnsureRows(2)));
        assert!(page.calls.contains(&Call::Dropdowns(vec![
            "mp4".to_string(),
            "dtshcode".to_string()
        ])));
        assert_eq!(page.player_urls(), vec![(0, URL.to_string())]);
        assert!(page.notified("Added 2 player sources successfully!"));
        assert!(page.notified("Player URL added successfully!"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_row_failure_skips_settle_and_fills_existing() {
        let mut page = FakePage {
            can_add_rows: false,
            player_url_fields: 1,
            ..FakePage::default()
        };
        let start = Instant::now();
        let report = populate_players(&mut page, &AutolinksConfig::default(), Some(L720), None).await;

        assert_eq!(report.titles_filled, 1);
        assert_eq!(start.elapsed(), Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_720p_reports_error() {
        let mut page = FakePage::default();
        let report = populate_players(&mut page, &AutolinksConfig::default(), None, Some("x : y")).await;

        assert_eq!(report.player_url, None);
        assert!(page.player_urls().is_empty());
        assert!(page.notified("No 720p link found for player URL"));
        // Titles are still filled
        assert_eq!(report.titles_filled, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transform_failure_skips_player_url() {
        let mut page = FakePage::default();
        let report =
            populate_players(&mut page, &AutolinksConfig::default(), Some("no-slashes-720p"), None).await;

        assert_eq!(report.player_url, None);
        assert!(page.player_urls().is_empty());
        assert!(page.notified("Failed to transform 720p link"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_url_fields() {
        let mut page = FakePage {
            player_url_fields: 0,
            ..FakePage::default()
        };
        let report = populate_players(&mut page, &AutolinksConfig::default(), Some(L720), None).await;

        assert_eq!(report.player_url, None);
        assert!(page.notified("No player URL fields found"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_secondary_script_matched() {
        let mut page = FakePage::default();
        let scripts = "\nOther.mkv : <iframe src=\"a\"></iframe>\n\
                       My Show S01E02 [WEB-DL].mkv : <iframe src=\"b : c\"></iframe>\n";
        let report = populate_players(&mut page, &AutolinksConfig::default(), Some(L720), Some(scripts)).await;

        assert!(report.secondary_filled);
        assert_eq!(
            page.player_urls(),
            vec![
                (0, URL.to_string()),
                (1, "<iframe src=\"b : c\"></iframe>".to_string())
            ]
        );
        assert!(page.notified("Player 2 iframe added successfully!"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_secondary_script_missing() {
        let mut page = FakePage::default();
        let report = populate_players(
            &mut page,
            &AutolinksConfig::default(),
            Some(L720),
            Some("Other.mkv : <iframe></iframe>"),
        )
        .await;

        assert!(!report.secondary_filled);
        assert!(page.notified("No Player 2 script found for My Show S01E02 [WEB-DL].mkv"));
    }

    #[test]
    fn test_find_script_skips_lines_without_separator() {
        let scripts = "file.mkv\nfile.mkv : <embed>";
        assert_eq!(find_player2_script(scripts, "file.mkv"), Some("<embed>"));
    }

    #[test]
    fn test_find_script_no_match() {
        assert_eq!(find_player2_script("a.mkv : x", "b.mkv"), None);
    }
}
