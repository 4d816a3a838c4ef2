//! Crawler module for page fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - The transport seam and its reqwest implementation
//! - Link extraction and resolution
//! - Asset classification through lightweight probes
//! - Frontier scheduling and overall crawl coordination

mod classifier;
mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

#[cfg(test)]
mod testing;

pub use classifier::{is_html_content_type, AssetClassifier, Classification, ProbeError};
pub use coordinator::{run_crawl, Coordinator, CrawlReport, VisitRecord};
pub use fetcher::{
    build_http_client, fetch_page, FetchError, FetchedPage, ReqwestTransport, RequestMethod,
    Transport, TransportError, TransportResponse,
};
pub use parser::{resolve_links, HtmlLinkExtractor, LinkExtractor};
pub use scheduler::Scheduler;

use crate::config::Config;
use crate::CrawlerError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP transport from the configuration
/// 2. Seed the frontier with `start_url` and fix the crawl scope
/// 3. Visit pages breadth-first until the budget or frontier runs out
///
/// # Arguments
///
/// * `config` - The crawler configuration; `crawler.max-pages` is the budget
/// * `start_url` - The first page to visit, also the scope base
///
/// # Returns
///
/// * `Ok(Vec<VisitRecord>)` - Visited pages in visit order
/// * `Err(CrawlerError)` - The crawl could not start
pub async fn crawl(config: &Config, start_url: &str) -> Result<Vec<VisitRecord>, CrawlerError> {
    run_crawl(config, start_url, config.crawler.max_pages).await
}
