//! Hand-off of normalized records to the site as post documents.
//!
//! Each record becomes one document at `posts/<slug>.<ext>` whose front
//! matter carries the entry metadata. Records sharing a slug map to the
//! same path, so the later one replaces the earlier one.
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::feed::NormalizedRecord;

/// Directory, relative to the site root, that post documents live in.
pub const POSTS_DIR: &str = "posts";

/// Default file extension for post documents.
pub const DEFAULT_EXTENSION: &str = "md";

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Failed to write post '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize front matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),
}

/// Front matter of a post generated from an external entry.
///
/// Absent values serialize as YAML `null` so consumers can tell them apart
/// from empty strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrontMatter {
    pub external_source: String,
    pub feed_content: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub redirect: Option<String>,
}

/// A request to create one content document.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDocument {
    /// Path relative to the site root, e.g. `posts/hello-world.md`.
    pub relative_path: PathBuf,
    pub front_matter: FrontMatter,
}

impl PostDocument {
    pub fn from_record(record: &NormalizedRecord, extension: &str) -> Self {
        Self {
            relative_path: Path::new(POSTS_DIR).join(format!("{}.{}", record.slug, extension)),
            front_matter: FrontMatter {
                external_source: record.source_name.clone(),
                feed_content: record.body.clone(),
                title: record.title.clone(),
                description: record.description.clone(),
                date: record.publish_date,
                redirect: record.canonical_link.clone(),
            },
        }
    }

    /// Renders the document as `---`-delimited YAML front matter with an
    /// empty body.
    pub fn render(&self) -> Result<String, PublishError> {
        let yaml = serde_yaml::to_string(&self.front_matter)?;
        Ok(format!("---\n{}---\n", yaml))
    }
}

/// Consumer of post documents.
pub trait Publisher {
    fn publish(&mut self, doc: &PostDocument) -> Result<(), PublishError>;
}

/// Writes post documents beneath a site root directory.
#[derive(Debug, Clone)]
pub struct SiteWriter {
    root: PathBuf,
}

impl SiteWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Publisher for SiteWriter {
    fn publish(&mut self, doc: &PostDocument) -> Result<(), PublishError> {
        let path = self.root.join(&doc.relative_path);
        let io_err = |source| PublishError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let rendered = doc.render()?;
        std::fs::write(&path, rendered).map_err(io_err)?;

        tracing::debug!(path = %path.display(), "Wrote post");
        Ok(())
    }
}

/// Publishes every record in order, stopping at the first failure.
///
/// Returns the number of documents handed to the publisher.
pub fn publish_all<P: Publisher + ?Sized>(
    publisher: &mut P,
    records: &[NormalizedRecord],
    extension: &str,
) -> Result<usize, PublishError> {
    for record in records {
        publisher.publish(&PostDocument::from_record(record, extension))?;
    }
    Ok(records.len())
}
