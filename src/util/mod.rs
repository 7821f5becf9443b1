//! Utility functions shared across the ingestion pipeline.
//!
//! - **URL validation**: decides whether a configured feed address is fetchable
//! - **Slugs**: turns entry titles into filesystem/URL-safe identifiers
//!
//! # Examples
//!
//! ```
//! use feedpost::util::{is_fetchable_url, slugify};
//!
//! assert!(is_fetchable_url("https://example.com/feed.xml"));
//! assert_eq!(slugify("Hello, World!"), "hello-world");
//! ```

mod slug;
mod url_validator;

pub use slug::{slugify, FALLBACK_SLUG};
pub use url_validator::{is_fetchable_url, validate_url, UrlValidationError};
