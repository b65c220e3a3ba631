//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made by the walker:
//! - Building the HTTP client
//! - Plain GET requests for sitemap documents
//! - Classifying failures so the walk loop can log and skip them
//!
//! There is no retry: a failed reference is reported once and dropped.

use crate::config::HttpConfig;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of fetching one sitemap reference
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the document
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Raw response body
        body: Vec<u8>,
    },

    /// The server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Transport failure (connection refused, timeout, body read error, etc.)
    NetworkError {
        /// Error description
        error: String,
    },

    /// The reference is not a fetchable URL
    InvalidUrl {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Short human-readable reason for a failed fetch
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::HttpError { status_code } => Some(format!("HTTP {}", status_code)),
            Self::NetworkError { error } => Some(error.clone()),
            Self::InvalidUrl { error } => Some(format!("Invalid URL: {}", error)),
        }
    }
}

/// Builds the HTTP client used for every sitemap fetch
///
/// Client defaults apply (redirects, headers). A timeout is only set when the
/// configuration asks for one.
///
/// # Example
///
/// ```no_run
/// use sitemap_frontier::config::HttpConfig;
/// use sitemap_frontier::walker::build_http_client;
///
/// let client = build_http_client(&HttpConfig { timeout_secs: Some(30) }).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().gzip(true).brotli(true);

    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Fetches a sitemap document
///
/// | Condition | Result |
/// |-----------|--------|
/// | Unparseable or non-HTTP reference | InvalidUrl |
/// | 2xx | Success |
/// | Any other status | HttpError |
/// | Timeout, connect failure, body read failure | NetworkError |
pub async fn fetch_sitemap(client: &Client, reference: &str) -> FetchResult {
    let url = match Url::parse(reference) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => url,
        Ok(url) => {
            return FetchResult::InvalidUrl {
                error: format!("unsupported scheme '{}'", url.scheme()),
            }
        }
        Err(e) => {
            return FetchResult::InvalidUrl {
                error: e.to_string(),
            }
        }
    };

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_transport_error(&e),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    match response.bytes().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body: body.to_vec(),
        },
        Err(e) => classify_transport_error(&e),
    }
}

fn classify_transport_error(e: &reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    };
    FetchResult::NetworkError { error }
}
