//! URL handling module for Asset-Crawler
//!
//! This module splits URLs into their scheme-independent parts and decides
//! whether a URL belongs to the crawl's scope.

mod scope;
mod split;

// Re-export main functions
pub use scope::{check_scope, ScopeFilter};
pub use split::{split_url, UrlParts};
