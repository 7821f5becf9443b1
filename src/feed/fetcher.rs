use futures::StreamExt;
use reqwest::header::HeaderMap;
use std::time::Duration;
use thiserror::Error;

/// Default per-request timeout, covering connect, headers and body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// User-Agent sent with every feed request unless configured otherwise.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "feedpost/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/feedpost/feedpost)"
);

pub(crate) const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Errors that can occur while retrieving a feed.
///
/// Every variant is local to one source; the caller decides how to report it.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with a status other than 200
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the configured timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    /// Status was 200 but the body was empty or whitespace only
    #[error("Empty response body")]
    EmptyBody,
    /// Response body exceeded the 10MB size limit
    #[error("Response too large")]
    ResponseTooLarge,
}

/// A successful feed response: status 200 with a non-blank body.
#[derive(Debug)]
pub struct FetchedFeed {
    /// Response headers; lookups are case-insensitive.
    pub headers: HeaderMap,
    /// Raw, undecoded response body.
    pub body: Vec<u8>,
}

/// Builds the HTTP client used for feed fetching.
///
/// The User-Agent is fixed for the lifetime of the client so every request
/// identifies the tool the same way.
pub fn build_client(user_agent: &str) -> Result<reqwest::Client, FetchError> {
    Ok(reqwest::Client::builder().user_agent(user_agent).build()?)
}

/// Fetches a feed with a single GET request.
///
/// The whole exchange (send and body read) is bounded by `timeout`. No
/// retries are attempted; the caller gets exactly one outcome per call.
///
/// # Errors
///
/// - [`FetchError::Network`] - Connection, TLS or body stream errors
/// - [`FetchError::Timeout`] - The request did not finish within `timeout`
/// - [`FetchError::HttpStatus`] - Any status other than 200
/// - [`FetchError::EmptyBody`] - Status 200 with a blank body
/// - [`FetchError::ResponseTooLarge`] - Body exceeded 10MB
pub async fn fetch_feed(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<FetchedFeed, FetchError> {
    tokio::time::timeout(timeout, fetch_inner(client, url))
        .await
        .map_err(|_| FetchError::Timeout(timeout))?
}

async fn fetch_inner(client: &reqwest::Client, url: &str) -> Result<FetchedFeed, FetchError> {
    let response = client.get(url).send().await?;

    if response.status() != reqwest::StatusCode::OK {
        return Err(FetchError::HttpStatus(response.status().as_u16()));
    }

    let headers = response.headers().clone();
    let body = read_limited_bytes(response, MAX_FEED_SIZE).await?;

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(FetchError::EmptyBody);
    }

    Ok(FetchedFeed { headers, body })
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if usize::try_from(len).map_or(true, |len| len > limit) {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
