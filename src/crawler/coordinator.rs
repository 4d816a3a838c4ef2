//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the breadth-first traversal that coordinates:
//! - Seeding the frontier and fixing the crawl scope from the start URL
//! - Fetching each page and resolving its in-scope links
//! - Classifying links into static assets and pages to follow
//! - Recording one visit per distinct URL, in visit order

use crate::config::{Config, FetchFailurePolicy};
use crate::crawler::classifier::AssetClassifier;
use crate::crawler::fetcher::{fetch_page, ReqwestTransport, Transport};
use crate::crawler::parser::{resolve_links, HtmlLinkExtractor, LinkExtractor};
use crate::crawler::scheduler::Scheduler;
use crate::state::{CrawlPhase, PageOutcome};
use crate::url::ScopeFilter;
use crate::CrawlerError;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A visited page and the static assets discovered on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    /// The URL as pulled from the frontier (pre-redirect)
    pub url: String,

    /// Final URLs of the page's static assets, in discovery order
    pub assets: Vec<String>,
}

impl VisitRecord {
    pub fn new(url: impl Into<String>, assets: Vec<String>) -> Self {
        Self {
            url: url.into(),
            assets,
        }
    }
}

/// Everything a crawl run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Visit records in visit order
    pub records: Vec<VisitRecord>,

    /// Outcome of every URL the run attempted, in visit order
    pub outcomes: Vec<(String, PageOutcome)>,

    /// Candidate links dropped because their probe failed
    pub probe_failures: usize,

    /// Frontier entries discarded because they were already processed
    pub duplicates_discarded: usize,
}

/// Per-run state; created fresh by every crawl call
struct CrawlRun {
    scope: ScopeFilter,
    scheduler: Scheduler,
    phase: CrawlPhase,
    report: CrawlReport,
}

impl CrawlRun {
    fn new(start_url: &str, max_pages: i64) -> Result<Self, CrawlerError> {
        Ok(Self {
            scope: ScopeFilter::new(start_url)?,
            scheduler: Scheduler::new(start_url, max_pages),
            phase: CrawlPhase::Idle,
            report: CrawlReport::default(),
        })
    }

    fn transition(&mut self, next: CrawlPhase) -> Result<(), CrawlerError> {
        if !self.phase.can_transition_to(next) {
            return Err(CrawlerError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        tracing::trace!("Crawl phase {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }
}

/// Main crawler coordinator structure
///
/// Owns the collaborators and settings, but no crawl state: each call to
/// [`Coordinator::crawl`] starts from an empty frontier and visited set, so a
/// coordinator can run several crawls one after another.
pub struct Coordinator<T, E = HtmlLinkExtractor> {
    transport: T,
    extractor: E,
    classifier: AssetClassifier,
    fetch_failure_policy: FetchFailurePolicy,
}

impl Coordinator<ReqwestTransport, HtmlLinkExtractor> {
    /// Creates a coordinator with the reqwest transport and HTML extractor
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to crawl
    /// * `Err(CrawlerError)` - The HTTP client could not be built
    pub fn from_config(config: &Config) -> Result<Self, CrawlerError> {
        let transport = ReqwestTransport::new(&config.http)?;
        Ok(Self::new(transport, HtmlLinkExtractor::new())
            .with_fetch_failure_policy(config.crawler.fetch_failure_policy)
            .with_classifier(AssetClassifier::new(config.crawler.probe_get_fallback)))
    }
}

impl<T, E> Coordinator<T, E>
where
    T: Transport,
    E: LinkExtractor,
{
    /// Creates a coordinator with default settings
    pub fn new(transport: T, extractor: E) -> Self {
        Self {
            transport,
            extractor,
            classifier: AssetClassifier::default(),
            fetch_failure_policy: FetchFailurePolicy::default(),
        }
    }

    pub fn with_fetch_failure_policy(mut self, policy: FetchFailurePolicy) -> Self {
        self.fetch_failure_policy = policy;
        self
    }

    pub fn with_classifier(mut self, classifier: AssetClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Crawls from `start_url`, visiting at most `max_pages` pages
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<VisitRecord>)` - One record per visited URL, in visit order
    /// * `Err(CrawlerError::Config)` - `start_url` is empty, so no scope can be set
    pub async fn crawl(
        &self,
        start_url: &str,
        max_pages: i64,
    ) -> Result<Vec<VisitRecord>, CrawlerError> {
        Ok(self.crawl_with_report(start_url, max_pages).await?.records)
    }

    /// Same as [`Coordinator::crawl`], with per-URL outcomes and counters
    pub async fn crawl_with_report(
        &self,
        start_url: &str,
        max_pages: i64,
    ) -> Result<CrawlReport, CrawlerError> {
        let mut run = CrawlRun::new(start_url, max_pages)?;
        let start_time = Instant::now();

        tracing::info!("Starting crawl of {} (max {} pages)", start_url, max_pages);
        run.transition(CrawlPhase::Running)?;

        while run.scheduler.should_continue() {
            let Some(url) = run.scheduler.next_url() else {
                break;
            };

            let outcome = self.process_url(&mut run, &url).await;
            run.report.outcomes.push((url, outcome));

            tracing::debug!(
                "{} visited, {} in frontier",
                run.scheduler.visited_count(),
                run.scheduler.frontier_size()
            );
        }

        run.transition(CrawlPhase::Done)?;
        run.report.duplicates_discarded = run.scheduler.discarded_count();

        tracing::info!(
            "Crawl completed: {} pages visited in {:?}",
            run.scheduler.visited_count(),
            start_time.elapsed()
        );

        Ok(run.report)
    }

    /// Processes a single URL pulled from the frontier
    ///
    /// This method:
    /// 1. Fetches the page
    /// 2. Resolves its in-scope links against the effective URL
    /// 3. Classifies them into assets and pages
    /// 4. Records the visit and enqueues the pages
    async fn process_url(&self, run: &mut CrawlRun, url: &str) -> PageOutcome {
        tracing::info!("Crawling URL: {}", url);

        let page = match fetch_page(&self.transport, url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Failed to fetch {} ({}): {}", url, e.kind(), e);
                return match self.fetch_failure_policy {
                    FetchFailurePolicy::RecordEmpty => {
                        run.report.records.push(VisitRecord::new(url, Vec::new()));
                        run.scheduler.mark_visited(url);
                        PageOutcome::FetchFailed
                    }
                    FetchFailurePolicy::Skip => {
                        run.scheduler.mark_failed(url);
                        PageOutcome::FetchSkipped
                    }
                };
            }
        };

        if page.effective_url != url {
            tracing::debug!("{} redirected to {}", url, page.effective_url);
        }

        let candidates = resolve_links(&page.body, &page.effective_url, &run.scope, &self.extractor);
        tracing::debug!("{} in-scope links on {}", candidates.len(), url);

        let classification = self.classifier.classify(&self.transport, &candidates).await;

        // A probe may have redirected a page off the crawl's host
        let pages_to_follow: Vec<String> = classification
            .pages_to_follow
            .into_iter()
            .filter(|page_url| {
                let keep = run.scope.is_in_scope(page_url);
                if !keep {
                    tracing::debug!("Not following {}: redirected out of scope", page_url);
                }
                keep
            })
            .collect();

        tracing::info!(
            "Crawled URL: {} - Found {} static assets and {} links to follow",
            url,
            classification.static_assets.len(),
            pages_to_follow.len()
        );

        run.report.probe_failures += classification.probe_failures;
        run.report
            .records
            .push(VisitRecord::new(url, classification.static_assets));
        run.scheduler.mark_visited(url);
        run.scheduler.add_to_frontier(pages_to_follow);

        PageOutcome::Processed
    }
}

/// Runs a crawl with the production transport built from `config`
///
/// # Example
///
/// ```no_run
/// use asset_crawler::config::Config;
/// use asset_crawler::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let records = run_crawl(&Config::default(), "https://example.com/", 5).await?;
/// println!("{} pages visited", records.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: &Config,
    start_url: &str,
    max_pages: i64,
) -> Result<Vec<VisitRecord>, CrawlerError> {
    let coordinator = Coordinator::from_config(config)?;
    coordinator.crawl(start_url, max_pages).await
}
