use std::time::Duration;

use feed_rs::model::Entry;
use feed_rs::parser;
use reqwest::Client;
use tracing::info;

use crate::document::FeedItem;

/// Summaries longer than this are cut and marked with an ellipsis.
const SUMMARY_MAX_CHARS: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("feed is not valid RSS/Atom: {0}")]
    Parse(#[from] parser::ParseFeedError),
}

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("home-feed/0.1 (feed updater)")
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Fetch and parse one remote feed, returning entries in the feed's
    /// native order. Upstream feeds list newest entries first; that ordering
    /// is trusted and never re-sorted here.
    pub async fn fetch_feed(&self, url: &str) -> Result<Vec<Entry>, FetchError> {
        info!("Fetching feed: {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;

        let parsed = parser::parse(&bytes[..])?;
        info!("Parsed {} entries from {}", parsed.entries.len(), url);

        Ok(parsed.entries)
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Project one feed entry into the fixed document shape. `captured` is the
/// run date, not the entry's publish date, so every item written in one run
/// carries the same stamp.
pub fn normalize(entry: &Entry, source: &str, captured: &str) -> FeedItem {
    let title = entry
        .title
        .as_ref()
        .map(|t| t.content.clone())
        .unwrap_or_default();

    let url = entry
        .links
        .first()
        .map(|l| l.href.clone())
        .unwrap_or_default();

    let summary = entry
        .summary
        .as_ref()
        .map(|s| truncate_summary(&s.content))
        .unwrap_or_default();

    FeedItem {
        title,
        url,
        source: source.to_string(),
        timestamp: captured.to_string(),
        summary,
    }
}

/// Character-based, so a multi-byte character at the boundary is kept whole.
fn truncate_summary(summary: &str) -> String {
    if summary.chars().count() > SUMMARY_MAX_CHARS {
        let mut cut: String = summary.chars().take(SUMMARY_MAX_CHARS).collect();
        cut.push_str("...");
        cut
    } else {
        summary.to_string()
    }
}
