use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::feed::parser::RawEntry;
use crate::util::slugify;

/// Title given to entries whose feed omitted one.
pub const UNTITLED: &str = "untitled";

/// One ingested entry, ready to hand to a publisher.
///
/// `slug` is always non-empty and limited to `[a-z0-9_-]`. Optional fields
/// stay `None` when the feed omitted them; they are never defaulted to `""`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub source_name: String,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub publish_date: Option<DateTime<Utc>>,
    pub canonical_link: Option<String>,
    pub body: Option<String>,
}

/// Maps a parsed entry onto a [`NormalizedRecord`] owned by `source_name`.
///
/// An absent title becomes [`UNTITLED`]. A title the feed did provide is kept
/// verbatim, even when blank; its slug still falls back to `"untitled"`. Two
/// entries with the same title share a slug.
pub fn normalize(source_name: &str, entry: RawEntry) -> NormalizedRecord {
    let title = entry.title.unwrap_or_else(|| UNTITLED.to_string());
    let slug = slugify(&title);

    NormalizedRecord {
        source_name: source_name.to_string(),
        title,
        slug,
        description: entry.summary,
        publish_date: entry.published,
        canonical_link: entry.link,
        body: entry.content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_entry() {
        let published = Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap();
        let entry = RawEntry {
            title: Some("Hello, World!".into()),
            content: Some("<p>body</p>".into()),
            summary: Some("short".into()),
            published: Some(published),
            link: Some("https://example.com/hello".into()),
        };

        let record = normalize("Example Blog", entry);
        assert_eq!(
            record,
            NormalizedRecord {
                source_name: "Example Blog".into(),
                title: "Hello, World!".into(),
                slug: "hello-world".into(),
                description: Some("short".into()),
                publish_date: Some(published),
                canonical_link: Some("https://example.com/hello".into()),
                body: Some("<p>body</p>".into()),
            }
        );
    }

    #[test]
    fn test_missing_title_is_untitled() {
        let record = normalize("src", RawEntry::default());
        assert_eq!(record.title, "untitled");
        assert_eq!(record.slug, "untitled");
    }

    #[test]
    fn test_blank_title_kept_with_fallback_slug() {
        let entry = RawEntry {
            title: Some("   ".into()),
            ..Default::default()
        };
        let record = normalize("src", entry);
        assert_eq!(record.title, "   ");
        assert_eq!(record.slug, "untitled");

        let record = normalize("src", RawEntry { title: Some(String::new()), ..Default::default() });
        assert_eq!(record.title, "");
        assert_eq!(record.slug, "untitled");
    }

    #[test]
    fn test_absent_fields_stay_none() {
        let entry = RawEntry {
            title: Some("Only a title".into()),
            ..Default::default()
        };
        let record = normalize("src", entry);
        assert_eq!(record.description, None);
        assert_eq!(record.publish_date, None);
        assert_eq!(record.canonical_link, None);
        assert_eq!(record.body, None);
    }

    #[test]
    fn test_empty_fields_stay_empty() {
        let entry = RawEntry {
            title: Some("T".into()),
            summary: Some(String::new()),
            content: Some(String::new()),
            ..Default::default()
        };
        let record = normalize("src", entry);
        assert_eq!(record.description.as_deref(), Some(""));
        assert_eq!(record.body.as_deref(), Some(""));
    }

    #[test]
    fn test_identical_titles_collide() {
        let a = normalize("one", RawEntry { title: Some("Same".into()), ..Default::default() });
        let b = normalize("two", RawEntry { title: Some("Same".into()), ..Default::default() });
        assert_eq!(a.slug, b.slug);
    }
}
