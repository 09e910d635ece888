//! Editor page snapshot parser
//!
//! Reads the fields the pipeline cares about from captured editor page HTML:
//! the episode number, the quality and language dropdown options, and the
//! player URL inputs.

use scraper::{Html, Selector};

use crate::error::{AutolinksError, Result};
use crate::page::PageMetadata;

const EPISODE_SELECTOR: &str = "#episodio";
const QUALITY_OPTION_SELECTOR: &str = "#dooplay_lfield_qual option";
const LANGUAGE_OPTION_SELECTOR: &str = "#dooplay_lfield_lang option";
const PLAYER_URL_SELECTOR: &str = r#"input[name="url[]"]"#;

/// Parsed view of an editor page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorSnapshot {
    /// Value of the episode field; `None` if the field is absent
    pub episode: Option<String>,

    /// Trimmed texts of the quality dropdown options
    pub quality_options: Vec<String>,

    /// Trimmed texts of the language dropdown options
    pub language_options: Vec<String>,

    /// Current values of the player URL inputs, in row order
    pub player_urls: Vec<String>,
}

impl EditorSnapshot {
    /// Parses editor page HTML
    ///
    /// # Errors
    /// Returns `Parse` if a built-in selector fails to compile
    pub fn parse(html: &str) -> Result<Self> {
        let document = Html::parse_document(html);

        let episode = document
            .select(&selector(EPISODE_SELECTOR)?)
            .next()
            .map(|el| el.value().attr("value").unwrap_or_default().to_string());

        Ok(Self {
            episode,
            quality_options: option_texts(&document, QUALITY_OPTION_SELECTOR)?,
            language_options: option_texts(&document, LANGUAGE_OPTION_SELECTOR)?,
            player_urls: document
                .select(&selector(PLAYER_URL_SELECTOR)?)
                .map(|el| el.value().attr("value").unwrap_or_default().to_string())
                .collect(),
        })
    }
}

impl PageMetadata for EditorSnapshot {
    fn read_episode_number(&self) -> Option<String> {
        self.episode.clone()
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| AutolinksError::Parse(format!("Invalid selector {}: {:?}", css, e)))
}

fn option_texts(document: &Html, css: &str) -> Result<Vec<String>> {
    Ok(document
        .select(&selector(css)?)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{QualityMatch, match_quality_option};

    const EDITOR_HTML: &str = r#"
    <html>
    <body>
        <input type="text" id="episodio" name="episodio" value="7">
        <div class="dform" style="display: block">
            <select id="dooplay_lfield_type">
                <option value="Direct & Telegram Download Links">Direct &amp; Telegram Download Links</option>
            </select>
            <select id="dooplay_lfield_lang">
                <option value="">---------</option>
                <option value="hindi">Hindi</option>
                <option value="english">English</option>
            </select>
            <select id="dooplay_lfield_qual">
                <option value="">---------</option>
                <option value="1"> WEB-DL 1080p </option>
                <option value="2">WEBRip 720p</option>
                <option value="3">HMAX WEB-DL 1080p</option>
            </select>
        </div>
        <table>
            <tr><td class="url_player"><input class="widefat" name="url[]" value="https://cscloud12.online/a.mkv"></td></tr>
            <tr><td class="url_player"><input class="widefat" name="url[]"></td></tr>
        </table>
    </body>
    </html>
    "#;

    #[test]
    fn test_parse_editor_page() {
        let snapshot = EditorSnapshot::parse(EDITOR_HTML).unwrap();
        assert_eq!(snapshot.episode.as_deref(), Some("7"));
        assert_eq!(
            snapshot.quality_options,
            vec!["---------", "WEB-DL 1080p", "WEBRip 720p", "HMAX WEB-DL 1080p"]
        );
        assert_eq!(snapshot.language_options, vec!["---------", "Hindi", "English"]);
        assert_eq!(
            snapshot.player_urls,
            vec!["https://cscloud12.online/a.mkv".to_string(), String::new()]
        );
    }

    #[test]
    fn test_snapshot_reads_episode_number() {
        let snapshot = EditorSnapshot::parse(EDITOR_HTML).unwrap();
        assert_eq!(snapshot.read_episode_number(), Some("7".to_string()));
    }

    #[test]
    fn test_missing_episode_field() {
        let snapshot = EditorSnapshot::parse("<html><body></body></html>").unwrap();
        assert_eq!(snapshot.read_episode_number(), None);
        assert!(snapshot.quality_options.is_empty());
    }

    #[test]
    fn test_empty_episode_value() {
        let snapshot = EditorSnapshot::parse(r#"<input id="episodio">"#).unwrap();
        assert_eq!(snapshot.read_episode_number(), Some(String::new()));
    }

    #[test]
    fn test_snapshot_options_feed_quality_matching() {
        let snapshot = EditorSnapshot::parse(EDITOR_HTML).unwrap();
        let matched = match_quality_option(&snapshot.quality_options, "WEB-DL 1080p").unwrap();
        assert_eq!(matched, QualityMatch::Exact("WEB-DL 1080p".to_string()));
    }
}
