/// Slug used when a title yields no usable characters.
pub const FALLBACK_SLUG: &str = "untitled";

/// Derives a filesystem/URL-safe slug from an entry title.
///
/// The title is lowercased and trimmed, every remaining whitespace character
/// becomes a hyphen, and anything outside `[a-z0-9_-]` is dropped. Runs of
/// whitespace are not collapsed, so `"a  b"` becomes `"a--b"`.
///
/// A title that reduces to nothing (empty, all punctuation, all non-ASCII)
/// yields [`FALLBACK_SLUG`].
///
/// # Examples
///
/// ```
/// use feedpost::util::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("  Rust 2024: what's new  "), "rust-2024-whats-new");
/// assert_eq!(slugify(""), "untitled");
/// ```
pub fn slugify(title: &str) -> String {
    let slug: String = title
        .to_lowercase()
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect();

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}
