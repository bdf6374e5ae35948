use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::info;

use crate::config::{Config, Section};
use crate::document::{FeedItem, HomeDocument, Sections};
use crate::fetcher::{normalize, Fetcher};

/// Per-source capture counts, in config order.
pub struct RunSummary {
    counts: Vec<(String, usize)>,
}

impl fmt::Display for RunSummary {
    /// Renders the status line, e.g. `3 Decrypt, 5 HN`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .counts
            .iter()
            .map(|(name, count)| format!("{} {}", count, name))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// One full update pass: load the document, fetch every configured source in
/// order, replace the news sections and write the document back.
///
/// `now` is captured once by the caller and threaded through both the item
/// timestamps and the document stamps, so the fields can never disagree
/// within a run. Any fetch, parse or write failure aborts the run before the
/// output file is touched.
pub async fn run(config: &Config, now: DateTime<Utc>) -> anyhow::Result<RunSummary> {
    let doc = HomeDocument::load(&config.output)?;
    let fetcher = Fetcher::new();
    let captured = now.format("%Y-%m-%d").to_string();

    let mut markets = Vec::new();
    let mut foss = Vec::new();
    let mut counts = Vec::with_capacity(config.sources.len());

    for source in &config.sources {
        let entries = fetcher.fetch_feed(&source.url).await?;
        let items: Vec<FeedItem> = entries
            .iter()
            .take(source.limit)
            .map(|entry| normalize(entry, &source.source, &captured))
            .collect();

        info!("Captured {} items from '{}'", items.len(), source.name);
        counts.push((source.name.clone(), items.len()));

        match source.section {
            Section::Markets => markets = items,
            Section::Foss => foss = items,
        }
    }

    let updated = merge_and_stamp(doc, markets, foss, now);
    updated.save(&config.output)?;
    info!("Wrote {}", config.output.display());

    Ok(RunSummary { counts })
}

/// Pure merge: replaces the news sections and both stamps, carries
/// `projects` through unchanged.
pub fn merge_and_stamp(
    doc: HomeDocument,
    markets: Vec<FeedItem>,
    foss: Vec<FeedItem>,
    now: DateTime<Utc>,
) -> HomeDocument {
    HomeDocument {
        updated_iso: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        edition: now.format("%Y-%m-%d").to_string(),
        sections: Sections {
            projects: doc.sections.projects,
            markets,
            foss,
        },
    }
}
