use chrono::{DateTime, Utc};
use feed_rs::model::{Entry, Link};
use feed_rs::parser::{self, ParseErrorKind, ParseFeedError};
use thiserror::Error;

/// A feed entry as the parser saw it.
///
/// Every field is optional: a feed that omits an element yields `None`, which
/// the normalizer keeps distinct from an element that is present but empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEntry {
    pub title: Option<String>,
    /// Full body (`content:encoded` in RSS, `<content>` in Atom).
    pub content: Option<String>,
    /// Short summary (`<description>` in RSS, `<summary>` in Atom).
    pub summary: Option<String>,
    pub published: Option<DateTime<Utc>>,
    /// Canonical link to the entry on its origin site.
    pub link: Option<String>,
}

/// Errors raised while turning feed bytes into entries.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document is not a shape any supported format recognizes.
    #[error("unrecognized feed format: {0}")]
    Unrecognized(String),
    /// The document looked like a feed but could not be parsed.
    #[error("malformed feed: {0}")]
    Malformed(String),
    /// Reading the document failed.
    #[error("I/O error while parsing feed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ParseFeedError> for ParseError {
    fn from(err: ParseFeedError) -> Self {
        match err {
            ParseFeedError::ParseError(ParseErrorKind::NoFeedRoot) => {
                ParseError::Unrecognized("no RSS or Atom root element".to_string())
            }
            ParseFeedError::JsonUnsupportedVersion(version) => {
                ParseError::Unrecognized(format!("unsupported JSON Feed version {}", version))
            }
            ParseFeedError::IoError(e) => ParseError::Io(e),
            other => ParseError::Malformed(other.to_string()),
        }
    }
}

/// Parses an RSS or Atom document into entries, in document order.
///
/// The format is detected from the document itself. The body is decoded as
/// UTF-8 (invalid sequences are replaced) before parsing. A well-formed feed
/// with no items yields an empty `Vec`, not an error.
///
/// # Errors
///
/// - [`ParseError::Unrecognized`] - No supported feed root element
/// - [`ParseError::Malformed`] - Broken XML or missing required structure
/// - [`ParseError::Io`] - The underlying reader failed
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<RawEntry>, ParseError> {
    let text = String::from_utf8_lossy(bytes);
    let feed = parser::parse(text.as_bytes())?;

    Ok(feed.entries.into_iter().map(RawEntry::from).collect())
}

impl From<Entry> for RawEntry {
    fn from(entry: Entry) -> Self {
        RawEntry {
            title: entry.title.map(|t| t.content),
            content: entry.content.and_then(|c| c.body),
            summary: entry.summary.map(|s| s.content),
            published: entry.published.or(entry.updated),
            link: canonical_link(&entry.links),
        }
    }
}

/// Picks the entry's canonical link: the first `alternate` (or rel-less)
/// link, falling back to whatever link comes first.
fn canonical_link(links: &[Link]) -> Option<String> {
    links
        .iter()
        .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
        .or_else(|| links.first())
        .map(|l| l.href.clone())
}
