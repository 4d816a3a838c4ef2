//! Output module for exporting crawl results
//!
//! This module handles:
//! - Serializing visit records to JSON, to stdout or a file
//! - Summarizing a crawl into statistics

mod json;
pub mod stats;

pub use json::{save_results, to_json};
pub use stats::{print_statistics, CrawlStatistics};
