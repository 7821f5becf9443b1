//! Per-source feed handling: fetch, sniff, parse, normalize.
//!
//! The stages run in that order for each configured source:
//!
//! - [`fetcher`] - Single HTTP GET with a fixed User-Agent and timeout
//! - [`sniff`] - Header/body check that the response is feed-like XML
//! - [`parser`] - RSS/Atom parsing via the `feed-rs` crate
//! - [`normalize`] - Entry to [`NormalizedRecord`] mapping (title, slug, fields)
//!
//! Each stage returns its own error type; the orchestrator in
//! [`crate::ingest`] maps those onto skip reasons.

pub mod fetcher;
pub mod normalize;
pub mod parser;
pub mod sniff;

pub use fetcher::{build_client, fetch_feed, FetchError, FetchedFeed};
pub use normalize::{normalize, NormalizedRecord};
pub use parser::{parse_feed, ParseError, RawEntry};
pub use sniff::looks_like_feed;
