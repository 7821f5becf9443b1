//! Pulls posts from external RSS/Atom feeds into a static site.
//!
//! - [`config`] - TOML configuration: sources, timeout, User-Agent
//! - [`ingest`] - Orchestrates the per-source pipeline and isolates failures
//! - [`feed`] - Fetching, sniffing, parsing and normalizing individual feeds
//! - [`publish`] - Turns normalized records into `posts/<slug>.<ext>` documents
//! - [`util`] - URL validation and slug derivation

pub mod config;
pub mod feed;
pub mod ingest;
pub mod publish;
pub mod util;
