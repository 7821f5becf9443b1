//! Ingestion orchestrator: turns configured sources into normalized records.
//!
//! For each [`Source`], in configured order, the [`Ingestor`] validates the
//! URL, fetches the feed, sniffs the response, parses it, applies the
//! source's entry limit and normalizes the remaining entries. Any failure
//! degrades to a [`SkipEvent`] for that source alone; the batch always runs
//! to completion.
//!
//! Log output goes through an injected [`EventSink`] rather than a global
//! logger, so tests can capture it with [`MemorySink`].
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use feedpost::feed::build_client;
//! use feedpost::ingest::{Ingestor, Source, TracingSink};
//!
//! let client = build_client("my-site/1.0")?;
//! let ingestor = Ingestor::new(client, Arc::new(TracingSink));
//! let report = ingestor
//!     .run(&[Source::new("Blog", "https://example.com/feed.xml").with_limit(5)])
//!     .await;
//! ```

mod events;
mod source;

pub use events::{EventSink, Level, LogEvent, MemorySink, SkipEvent, SkipReason, TracingSink};
pub use source::{Source, UNKNOWN_SOURCE};

use futures::stream::{self, StreamExt};
use futures::FutureExt;
use serde::Serialize;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use crate::feed::fetcher::DEFAULT_TIMEOUT;
use crate::feed::{fetch_feed, looks_like_feed, normalize, parse_feed, NormalizedRecord};
use crate::util::is_fetchable_url;

/// Everything one run produced: accepted records and skipped sources, both
/// in configured source order.
#[derive(Debug, Default, Serialize)]
pub struct IngestReport {
    pub records: Vec<NormalizedRecord>,
    pub skips: Vec<SkipEvent>,
}

/// Drives the per-source pipeline over a list of sources.
pub struct Ingestor {
    client: reqwest::Client,
    timeout: Duration,
    concurrency: usize,
    sink: Arc<dyn EventSink>,
}

impl Ingestor {
    /// Creates an ingestor that processes one source at a time with the
    /// default 15 second fetch timeout.
    pub fn new(client: reqwest::Client, sink: Arc<dyn EventSink>) -> Self {
        Self {
            client,
            timeout: DEFAULT_TIMEOUT,
            concurrency: 1,
            sink,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Number of sources fetched at once. Clamped to at least 1.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Runs every source once and aggregates the outcome.
    ///
    /// Sources may be fetched concurrently, but records and skip events are
    /// always reported in configured source order, and each source's records
    /// keep their feed order.
    pub async fn run(&self, sources: &[Source]) -> IngestReport {
        let outcomes: Vec<Result<Vec<NormalizedRecord>, SkipEvent>> = stream::iter(sources)
            .map(|source| self.process_isolated(source))
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut report = IngestReport::default();
        for outcome in outcomes {
            match outcome {
                Ok(records) => report.records.extend(records),
                Err(skip) => report.skips.push(skip),
            }
        }

        tracing::debug!(
            sources = sources.len(),
            records = report.records.len(),
            skipped = report.skips.len(),
            "Ingestion run complete"
        );
        report
    }

    /// Processes one source, converting panics into an `unexpected` skip so
    /// a single misbehaving source cannot take the batch down.
    async fn process_isolated(&self, source: &Source) -> Result<Vec<NormalizedRecord>, SkipEvent> {
        let outcome = AssertUnwindSafe(self.process(source))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                Err(SkipEvent::new(
                    &source.name,
                    SkipReason::Unexpected,
                    Some(panic_message(panic.as_ref())),
                ))
            });

        if let Err(skip) = &outcome {
            self.sink.emit(
                LogEvent::new(Level::Warn, &source.name, skip.to_string()).with_reason(skip.reason),
            );
        }
        outcome
    }

    async fn process(&self, source: &Source) -> Result<Vec<NormalizedRecord>, SkipEvent> {
        let name = source.name.as_str();
        let skip = |reason: SkipReason, detail: Option<String>| SkipEvent::new(name, reason, detail);

        if !is_fetchable_url(&source.feed_url) {
            return Err(skip(
                SkipReason::InvalidUrl,
                Some(format!("invalid feed_url '{}'", source.feed_url)),
            ));
        }

        self.sink.emit(LogEvent::new(
            Level::Info,
            name,
            format!("Fetching external posts from {} ({})", name, source.feed_url),
        ));

        let fetched = fetch_feed(&self.client, &source.feed_url, self.timeout)
            .await
            .map_err(|e| skip(SkipReason::from(&e), Some(e.to_string())))?;

        if !looks_like_feed(&fetched.headers, &fetched.body) {
            return Err(skip(SkipReason::NotFeedLike, None));
        }

        let entries =
            parse_feed(&fetched.body).map_err(|e| skip(SkipReason::from(&e), Some(e.to_string())))?;

        if entries.is_empty() {
            return Err(skip(SkipReason::ParseEmpty, None));
        }

        let take = source.effective_limit().unwrap_or(entries.len());
        let records: Vec<NormalizedRecord> = entries
            .into_iter()
            .take(take)
            .map(|entry| normalize(name, entry))
            .collect();

        for record in &records {
            let message = format!(
                ".. include {}",
                record.canonical_link.as_deref().unwrap_or("(no link)")
            );
            self.sink.emit(
                LogEvent::new(Level::Info, name, message).with_link(record.canonical_link.clone()),
            );
        }

        Ok(records)
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic while processing source".to_string()
    }
}
