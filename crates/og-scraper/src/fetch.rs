//! Outbound page fetching

use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Errors from fetching a remote page
#[derive(Debug)]
pub enum FetchError {
    /// Network failure or timeout
    Http(reqwest::Error),
    /// The remote server answered with a non-success status
    Status(u16),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Http(err) => write!(f, "Fetch error: {}", err),
            FetchError::Status(code) => write!(f, "Fetch error: HTTP status {}", code),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Http(err) => Some(err),
            FetchError::Status(_) => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(err)
    }
}

/// HTTP client for fetching target pages
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Default request timeout; a fetch never hangs longer than this
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a new fetcher with the default 10 second timeout
    pub fn new() -> Self {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    /// Create a new fetcher with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Fetch a page and return its body as text
    ///
    /// Issues exactly one GET; failures are not retried.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!(url = %url, "Fetching page");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = FetchError::Status(503);
        assert_eq!(format!("{}", err), "Fetch error: HTTP status 503");
    }

    #[tokio::test]
    async fn test_fetch_invalid_url_fails() {
        let fetcher = PageFetcher::new();
        let result = fetcher.fetch("not a url").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_fails() {
        let fetcher = PageFetcher::new();
        // Port 9 (discard) is not listening locally
        let result = fetcher.fetch("http://127.0.0.1:9/").await;
        assert!(matches!(result, Err(FetchError::Http(_))));
    }
}
