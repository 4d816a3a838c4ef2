//! Scheduler for managing the crawl frontier
//!
//! This module handles:
//! - The FIFO frontier of discovered URLs (strict breadth-first order)
//! - The visited set used to discard rediscovered URLs at pop time
//! - The page budget, counted in attempted visits

use std::collections::{HashSet, VecDeque};

/// Scheduler owns the frontier and visit bookkeeping of one crawl run
///
/// Deduplication happens when a URL is pulled, not when it is enqueued: the
/// frontier may hold URLs that were visited after they were queued. URLs are
/// compared as exact strings.
#[derive(Debug, Clone)]
pub struct Scheduler {
    /// URLs waiting to be visited, first discovered first
    frontier: VecDeque<String>,

    /// URLs already pulled and processed; counts against the budget
    visited: HashSet<String>,

    /// URLs whose fetch failed without consuming budget
    failed: HashSet<String>,

    /// Maximum number of visited URLs
    max_pages: i64,

    /// Number of frontier entries discarded as already processed
    discarded: usize,
}

impl Scheduler {
    /// Creates a scheduler seeded with the start URL
    pub fn new(start_url: impl Into<String>, max_pages: i64) -> Self {
        Self {
            frontier: VecDeque::from([start_url.into()]),
            visited: HashSet::new(),
            failed: HashSet::new(),
            max_pages,
            discarded: 0,
        }
    }

    /// Returns true while the visited count is below the page budget
    pub fn has_budget(&self) -> bool {
        (self.visited.len() as i64) < self.max_pages
    }

    /// Returns true while there is both work queued and budget left
    pub fn should_continue(&self) -> bool {
        !self.frontier.is_empty() && self.has_budget()
    }

    /// Pulls the next URL that has not been processed yet
    ///
    /// Already processed URLs at the head of the frontier are discarded without
    /// touching the budget.
    ///
    /// # Returns
    ///
    /// * `Some(String)` - A URL to visit
    /// * `None` - The frontier ran dry
    pub fn next_url(&mut self) -> Option<String> {
        while let Some(url) = self.frontier.pop_front() {
            if self.is_visited(&url) || self.failed.contains(&url) {
                tracing::trace!("Discarding already processed URL: {}", url);
                self.discarded += 1;
                continue;
            }
            return Some(url);
        }
        None
    }

    /// Appends newly discovered pages to the back of the frontier
    pub fn add_to_frontier<I>(&mut self, urls: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.frontier.extend(urls);
    }

    /// Records an attempted visit; consumes one unit of budget
    pub fn mark_visited(&mut self, url: impl Into<String>) {
        self.visited.insert(url.into());
    }

    /// Records a failed visit that does not consume budget
    pub fn mark_failed(&mut self, url: impl Into<String>) {
        self.failed.insert(url.into());
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn discarded_count(&self) -> usize {
        self.discarded
    }
}
