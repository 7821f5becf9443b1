use serde::Serialize;
use std::fmt;
use std::sync::Mutex;

use crate::feed::{FetchError, ParseError};

/// Why a source produced no records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    InvalidUrl,
    HttpError,
    NetworkError,
    EmptyBody,
    NotFeedLike,
    ParseError,
    ParseEmpty,
    Unexpected,
}

impl SkipReason {
    /// Stable reason code used in logs and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::InvalidUrl => "invalid_url",
            SkipReason::HttpError => "http_error",
            SkipReason::NetworkError => "network_error",
            SkipReason::EmptyBody => "empty_body",
            SkipReason::NotFeedLike => "not_feed_like",
            SkipReason::ParseError => "parse_error",
            SkipReason::ParseEmpty => "parse_empty",
            SkipReason::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&FetchError> for SkipReason {
    fn from(err: &FetchError) -> Self {
        match err {
            FetchError::HttpStatus(_) => SkipReason::HttpError,
            FetchError::Network(_) | FetchError::Timeout(_) => SkipReason::NetworkError,
            FetchError::EmptyBody => SkipReason::EmptyBody,
            FetchError::ResponseTooLarge => SkipReason::Unexpected,
        }
    }
}

impl From<&ParseError> for SkipReason {
    fn from(err: &ParseError) -> Self {
        match err {
            ParseError::Unrecognized(_) | ParseError::Malformed(_) => SkipReason::ParseError,
            ParseError::Io(_) => SkipReason::Unexpected,
        }
    }
}

/// A source that was not ingested, with the reason and optional detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkipEvent {
    pub source: String,
    pub reason: SkipReason,
    pub detail: Option<String>,
}

impl SkipEvent {
    pub fn new(source: &str, reason: SkipReason, detail: Option<String>) -> Self {
        Self {
            source: source.to_string(),
            reason,
            detail,
        }
    }
}

impl fmt::Display for SkipEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "Skip '{}': {} ({})", self.source, self.reason, detail),
            None => write!(f, "Skip '{}': {}", self.source, self.reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
}

/// One entry on the ingestion log surface.
///
/// `reason` is set on skip warnings and `link` on accepted-entry lines, so
/// sinks can record them as structured fields next to the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub level: Level,
    pub source: String,
    pub message: String,
    pub reason: Option<SkipReason>,
    pub link: Option<String>,
}

impl LogEvent {
    pub fn new(level: Level, source: &str, message: impl Into<String>) -> Self {
        Self {
            level,
            source: source.to_string(),
            message: message.into(),
            reason: None,
            link: None,
        }
    }

    pub fn with_reason(mut self, reason: SkipReason) -> Self {
        self.reason = Some(reason);
        self
    }

    pub fn with_link(mut self, link: Option<String>) -> Self {
        self.link = link;
        self
    }
}

/// Receives ingestion log events.
///
/// Implementations must be shareable across concurrently processed sources.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: LogEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: LogEvent) {
        // Absent fields are left unrecorded rather than logged as empty.
        let reason = event.reason.map(SkipReason::as_str);
        let link = event.link.as_deref();
        match event.level {
            Level::Info => {
                tracing::info!(source = %event.source, reason, link, "{}", event.message)
            }
            Level::Warn => {
                tracing::warn!(source = %event.source, reason, link, "{}", event.message)
            }
        }
    }
}

/// Buffers events in memory for later inspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<LogEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far, in emission order.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn warnings(&self) -> Vec<LogEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.level == Level::Warn)
            .collect()
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: LogEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }
}
