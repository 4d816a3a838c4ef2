//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: Lifecycle of a crawl run (idle, running, done)
//! - `PageOutcome`: What happened to each URL pulled from the frontier

mod page_state;
mod phase;

// Re-export main types
pub use page_state::PageOutcome;
pub use phase::CrawlPhase;
