/// Per-page outcome definitions for a crawl run
use std::fmt;

/// What happened to a URL pulled from the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageOutcome {
    /// Page content was fetched, its links resolved and classified
    Processed,

    /// Page content could not be fetched; recorded with no assets
    FetchFailed,

    /// Page content could not be fetched; dropped without a record
    FetchSkipped,
}

impl PageOutcome {
    /// Returns true if this outcome produced a visit record
    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Processed | Self::FetchFailed)
    }

    /// Returns true if this outcome represents a failed fetch
    pub fn is_error(&self) -> bool {
        matches!(self, Self::FetchFailed | Self::FetchSkipped)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::FetchFailed => "fetch_failed",
            Self::FetchSkipped => "fetch_skipped",
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
