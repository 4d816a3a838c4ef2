//! Statistics over crawl results
//!
//! This module summarizes visit records (and optionally a full crawl report)
//! for display at the end of a run.

use crate::crawler::{CrawlReport, VisitRecord};
use std::collections::HashSet;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Number of visit records
    pub pages_visited: usize,

    /// Pages with at least one static asset
    pub pages_with_assets: usize,

    /// Asset references across all pages, counting repeats
    pub total_assets: usize,

    /// Distinct asset URLs across all pages
    pub distinct_assets: usize,

    /// Pages whose fetch failed, whether recorded or skipped
    pub fetch_failures: usize,

    /// Attempted pages that produced no visit record
    pub pages_skipped: usize,

    /// Candidate links dropped because their probe failed
    pub probe_failures: usize,

    /// Frontier entries discarded as already processed
    pub duplicates_discarded: usize,
}

impl CrawlStatistics {
    /// Computes statistics from visit records alone
    pub fn from_records(records: &[VisitRecord]) -> Self {
        let distinct: HashSet<&str> = records
            .iter()
            .flat_map(|r| r.assets.iter().map(String::as_str))
            .collect();

        Self {
            pages_visited: records.len(),
            pages_with_assets: records.iter().filter(|r| !r.assets.is_empty()).count(),
            total_assets: records.iter().map(|r| r.assets.len()).sum(),
            distinct_assets: distinct.len(),
            ..Self::default()
        }
    }

    /// Computes statistics from a crawl report, including failure counters
    pub fn from_report(report: &CrawlReport) -> Self {
        Self {
            fetch_failures: report
                .outcomes
                .iter()
                .filter(|(_, outcome)| outcome.is_error())
                .count(),
            pages_skipped: report
                .outcomes
                .iter()
                .filter(|(_, outcome)| !outcome.is_recorded())
                .count(),
            probe_failures: report.probe_failures,
            duplicates_discarded: report.duplicates_discarded,
            ..Self::from_records(&report.records)
        }
    }
}

/// Prints statistics to stderr in a formatted manner
///
/// Stdout is reserved for the JSON result.
pub fn print_statistics(stats: &CrawlStatistics) {
    eprintln!("=== Crawl Statistics ===\n");

    eprintln!("Overview:");
    eprintln!("  Pages visited: {}", stats.pages_visited);
    eprintln!("  Pages with assets: {}", stats.pages_with_assets);
    eprintln!("  Total assets: {}", stats.total_assets);
    eprintln!("  Distinct assets: {}", stats.distinct_assets);
    eprintln!();

    if stats.fetch_failures > 0 || stats.probe_failures > 0 {
        eprintln!("Failures:");
        eprintln!("  Page fetches: {}", stats.fetch_failures);
        eprintln!("  Pages skipped: {}", stats.pages_skipped);
        eprintln!("  Link probes: {}", stats.probe_failures);
        eprintln!();
    }

    if stats.duplicates_discarded > 0 {
        eprintln!(
            "Duplicate frontier entries discarded: {}",
            stats.duplicates_discarded
        );
    }
}
