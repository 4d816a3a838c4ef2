//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - The `Transport` seam the crawl logic talks to
//! - A reqwest-backed transport with configured user agent, timeouts and redirects
//! - Fetching full page content (GET) and mapping failures to `FetchError`
//! - Error classification

use crate::config::HttpConfig;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// HTTP method used for a transport request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestMethod {
    /// Full content retrieval
    Get,
    /// Lightweight probe that skips the body
    Head,
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Head => write!(f, "HEAD"),
        }
    }
}

/// A response delivered by a transport
///
/// Any HTTP status is a successful transport call; callers decide what an
/// unsuccessful status means for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// Final URL after redirects
    pub final_url: String,

    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value (empty if absent)
    pub content_type: String,

    /// Decoded body (empty for HEAD)
    pub body: String,
}

impl TransportResponse {
    /// Returns true for 2xx status codes
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Failure to obtain any response from the server
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {error}")]
    Connect { url: String, error: String },

    #[error("Redirect error for {url}: {error}")]
    Redirect { url: String, error: String },

    #[error("Failed to read body of {url}: {error}")]
    Body { url: String, error: String },

    #[error("Request failed for {url}: {error}")]
    Request { url: String, error: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// Issues requests on behalf of the crawler
///
/// Implementations must follow redirects and report the post-redirect URL.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(
        &self,
        url: &str,
        method: RequestMethod,
    ) -> Result<TransportResponse, TransportError>;

    /// Like [`Transport::request`], but only status, final URL and headers are
    /// needed; the returned body is always empty.
    async fn probe(
        &self,
        url: &str,
        method: RequestMethod,
    ) -> Result<TransportResponse, TransportError> {
        let mut response = self.request(url, method).await?;
        response.body.clear();
        Ok(response)
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use asset_crawler::config::HttpConfig;
/// use asset_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Transport backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport from HTTP configuration
    pub fn new(config: &HttpConfig) -> Result<Self, TransportError> {
        let client =
            build_http_client(config).map_err(|e| TransportError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    async fn send(
        &self,
        url: &str,
        method: RequestMethod,
        read_body: bool,
    ) -> Result<TransportResponse, TransportError> {
        let builder = match method {
            RequestMethod::Get => self.client.get(url),
            RequestMethod::Head => self.client.head(url),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| classify_reqwest_error(url, e))?;

        let status_code = response.status().as_u16();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        // Dropping an unread response closes the connection without the body
        let body = match method {
            RequestMethod::Get if read_body => {
                response.text().await.map_err(|e| TransportError::Body {
                    url: url.to_string(),
                    error: e.to_string(),
                })?
            }
            _ => String::new(),
        };

        Ok(TransportResponse {
            final_url,
            status_code,
            content_type,
            body,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn request(
        &self,
        url: &str,
        method: RequestMethod,
    ) -> Result<TransportResponse, TransportError> {
        self.send(url, method, true).await
    }

    async fn probe(
        &self,
        url: &str,
        method: RequestMethod,
    ) -> Result<TransportResponse, TransportError> {
        self.send(url, method, false).await
    }
}

/// Maps a reqwest error onto the transport error taxonomy
fn classify_reqwest_error(url: &str, error: reqwest::Error) -> TransportError {
    let url = url.to_string();
    if error.is_timeout() {
        TransportError::Timeout { url }
    } else if error.is_redirect() {
        TransportError::Redirect {
            url,
            error: error.to_string(),
        }
    } else if error.is_connect() {
        TransportError::Connect {
            url,
            error: error.to_string(),
        }
    } else {
        TransportError::Request {
            url,
            error: error.to_string(),
        }
    }
}

/// Content of a successfully fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Decoded page body
    pub body: String,

    /// Final URL after redirects
    pub effective_url: String,
}

/// Failure to fetch a page's full content
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("HTTP {status_code} while fetching {url}")]
    Http { url: String, status_code: u16 },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl FetchError {
    /// Short label of the failure kind, for logs and statistics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http { .. } => "http",
            Self::Transport(TransportError::Timeout { .. }) => "timeout",
            Self::Transport(TransportError::Connect { .. }) => "connect",
            Self::Transport(TransportError::Redirect { .. }) => "redirect",
            Self::Transport(TransportError::Body { .. }) => "body",
            Self::Transport(TransportError::Request { .. })
            | Self::Transport(TransportError::Client(_)) => "request",
        }
    }
}

/// Fetches the full content of a page
///
/// # Arguments
///
/// * `transport` - The transport to issue the GET through
/// * `url` - The URL to fetch
///
/// # Returns
///
/// * `Ok(FetchedPage)` - Body and post-redirect URL
/// * `Err(FetchError)` - Unreachable host, unsuccessful status, timeout or unreadable body
pub async fn fetch_page<T>(transport: &T, url: &str) -> Result<FetchedPage, FetchError>
where
    T: Transport + ?Sized,
{
    let response = transport.request(url, RequestMethod::Get).await?;

    if !response.is_success() {
        return Err(FetchError::Http {
            url: url.to_string(),
            status_code: response.status_code,
        });
    }

    Ok(FetchedPage {
        body: response.body,
        effective_url: response.final_url,
    })
}
