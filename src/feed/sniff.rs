use reqwest::header::{HeaderMap, CONTENT_TYPE};

/// Cheap pre-filter run before handing a response to the feed parser.
///
/// Returns true when the `Content-Type` header mentions `xml`, or when the
/// body contains a literal `<rss` or `<feed` tag opener. This is a substring
/// test only; malformed XML still passes and is rejected later by the parser.
///
/// Header lookup is case-insensitive ([`HeaderMap`] normalizes names).
pub fn looks_like_feed(headers: &HeaderMap, body: &[u8]) -> bool {
    let xml_content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("xml"));

    xml_content_type || contains(body, b"<rss") || contains(body, b"<feed")
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers_with(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[test]
    fn test_xml_content_type_accepted() {
        assert!(looks_like_feed(&headers_with("application/rss+xml"), b"anything"));
        assert!(looks_like_feed(&headers_with("text/xml; charset=utf-8"), b""));
        assert!(looks_like_feed(&headers_with("application/atom+xml"), b"{}"));
    }

    #[test]
    fn test_body_markers_accepted_without_header() {
        let headers = HeaderMap::new();
        assert!(looks_like_feed(&headers, b"<?xml version=\"1.0\"?><rss version=\"2.0\">"));
        assert!(looks_like_feed(&headers, b"<feed xmlns=\"http://www.w3.org/2005/Atom\">"));
    }

    #[test]
    fn test_html_page_rejected() {
        let body = b"<!DOCTYPE html><html><body>Not found</body></html>";
        assert!(!looks_like_feed(&headers_with("text/html"), body));
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        assert!(!looks_like_feed(&headers_with("text/plain"), b"<RSS version=\"2.0\">"));
        assert!(!looks_like_feed(&HeaderMap::new(), b"<Feed>"));
    }

    #[test]
    fn test_html_content_type_with_feed_body_accepted() {
        assert!(looks_like_feed(&headers_with("text/html"), b"<rss><channel/></rss>"));
    }

    #[test]
    fn test_header_name_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::HeaderName::from_static("content-type"),
            HeaderValue::from_static("application/xml"),
        );
        assert!(looks_like_feed(&headers, b""));
    }
}
