//! Asset classification
//!
//! Each in-scope link of a page is probed with a HEAD request and sorted into
//! either a page to follow (HTML) or a static asset (anything else), using the
//! post-redirect URL reported by the transport.

use crate::crawler::fetcher::{RequestMethod, Transport, TransportError, TransportResponse};
use thiserror::Error;

/// Media types treated as followable pages
const HTML_MEDIA_TYPES: &[&str] = &["text/html", "application/xhtml+xml"];

/// Failure to probe a single candidate link
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProbeError {
    #[error("HTTP {status_code} while probing {url}")]
    Http { url: String, status_code: u16 },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Result of classifying the candidate links of one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Final URLs of non-HTML resources, in input order
    pub static_assets: Vec<String>,

    /// Final URLs of HTML pages, in input order
    pub pages_to_follow: Vec<String>,

    /// Number of candidates dropped because their probe failed
    pub probe_failures: usize,
}

/// Returns true if a Content-Type header value denotes an HTML document
///
/// Parameters after `;` are ignored and the comparison is case-insensitive.
///
/// # Examples
///
/// ```
/// use asset_crawler::crawler::is_html_content_type;
///
/// assert!(is_html_content_type("text/html; charset=utf-8"));
/// assert!(is_html_content_type("Application/XHTML+XML"));
/// assert!(!is_html_content_type("image/png"));
/// assert!(!is_html_content_type(""));
/// ```
pub fn is_html_content_type(content_type: &str) -> bool {
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim();
    HTML_MEDIA_TYPES
        .iter()
        .any(|html| html.eq_ignore_ascii_case(media_type))
}

/// Probes and classifies candidate links
///
/// Candidates are probed one at a time, in order, with no caching: a URL
/// listed twice is probed twice. A failed probe drops the candidate from both
/// lists and is logged; the remaining candidates are still probed.
#[derive(Debug, Clone, Copy)]
pub struct AssetClassifier {
    get_fallback: bool,
}

impl Default for AssetClassifier {
    fn default() -> Self {
        Self { get_fallback: true }
    }
}

impl AssetClassifier {
    /// Creates a classifier
    ///
    /// When `get_fallback` is set, a HEAD probe answered with 405 or 501 is
    /// retried once with GET.
    pub fn new(get_fallback: bool) -> Self {
        Self { get_fallback }
    }

    /// Classifies `urls` into static assets and pages to follow
    pub async fn classify<T>(&self, transport: &T, urls: &[String]) -> Classification
    where
        T: Transport + ?Sized,
    {
        let mut classification = Classification::default();

        for url in urls {
            match self.probe(transport, url).await {
                Ok(response) => {
                    if is_html_content_type(&response.content_type) {
                        tracing::trace!("{} -> page {}", url, response.final_url);
                        classification.pages_to_follow.push(response.final_url);
                    } else {
                        tracing::trace!(
                            "{} -> asset {} ({})",
                            url,
                            response.final_url,
                            response.content_type
                        );
                        classification.static_assets.push(response.final_url);
                    }
                }
                Err(e) => {
                    tracing::warn!("Dropping {}: {}", url, e);
                    classification.probe_failures += 1;
                }
            }
        }

        classification
    }

    /// Sends the lightweight probe for one candidate
    async fn probe<T>(&self, transport: &T, url: &str) -> Result<TransportResponse, ProbeError>
    where
        T: Transport + ?Sized,
    {
        let mut response = transport.probe(url, RequestMethod::Head).await?;

        if self.get_fallback && matches!(response.status_code, 405 | 501) {
            tracing::debug!(
                "HEAD rejected with {} for {}, retrying with GET",
                response.status_code,
                url
            );
            response = transport.probe(url, RequestMethod::Get).await?;
        }

        if !response.is_success() {
            return Err(ProbeError::Http {
                url: url.to_string(),
                status_code: response.status_code,
            });
        }

        Ok(response)
    }
}
