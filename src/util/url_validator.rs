use thiserror::Error;
use url::Url;

/// Errors that can occur during URL validation.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL parsed but carries no host component.
    #[error("URL has no host")]
    MissingHost,
}

/// Validates a URL string for use as a feed source.
///
/// Accepts absolute `http`/`https` URLs with a non-empty host. Anything else
/// (relative paths, `file://`, `mailto:`, garbage) is rejected.
///
/// # Errors
///
/// Returns [`UrlValidationError`] if:
/// - The URL cannot be parsed ([`UrlValidationError::InvalidUrl`])
/// - The scheme is not `http` or `https` ([`UrlValidationError::UnsupportedScheme`])
/// - The host is missing or empty ([`UrlValidationError::MissingHost`])
///
/// # Examples
///
/// ```
/// use feedpost::util::validate_url;
///
/// let url = validate_url("https://example.com/feed.xml").unwrap();
/// assert_eq!(url.host_str(), Some("example.com"));
///
/// assert!(validate_url("file:///etc/passwd").is_err());
/// assert!(validate_url("not a url").is_err());
/// ```
pub fn validate_url(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}

/// Boolean form of [`validate_url`]. Never panics.
pub fn is_fetchable_url(url_str: &str) -> bool {
    validate_url(url_str).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        assert!(is_fetchable_url("https://example.com/feed.xml"));
        assert!(is_fetchable_url("http://news.example.org"));
        assert!(is_fetchable_url("https://example.com:443/feed.xml"));
    }

    #[test]
    fn test_local_hosts_are_fetchable() {
        // Self-hosted feeds on a LAN are legitimate sources here.
        assert!(is_fetchable_url("http://localhost:4000/feed.xml"));
        assert!(is_fetchable_url("http://127.0.0.1:8080/rss"));
        assert!(is_fetchable_url("http://[::1]/atom.xml"));
    }

    #[test]
    fn test_invalid_schemes() {
        assert!(matches!(
            validate_url("file:///etc/passwd"),
            Err(UrlValidationError::UnsupportedScheme(s)) if s == "file"
        ));
        assert!(!is_fetchable_url("ftp://example.com"));
        assert!(!is_fetchable_url("mailto:someone@example.com"));
    }

    #[test]
    fn test_unparsable_input() {
        assert!(matches!(
            validate_url("not a url"),
            Err(UrlValidationError::InvalidUrl(_))
        ));
        assert!(!is_fetchable_url(""));
        assert!(!is_fetchable_url("/relative/feed.xml"));
        assert!(!is_fetchable_url("example.com/feed"));
    }

    #[test]
    fn test_missing_host() {
        assert!(!is_fetchable_url("http://"));
        assert!(!is_fetchable_url("https://"));
    }
}
