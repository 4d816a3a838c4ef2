use serde::Deserialize;

/// Main configuration structure for Asset-Crawler
///
/// Every section is optional in the TOML file; missing sections and keys
/// fall back to the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum number of pages to visit (attempted visits, not successes)
    pub max_pages: i64,

    /// What to do with a page whose content could not be fetched
    pub fetch_failure_policy: FetchFailurePolicy,

    /// Retry a HEAD probe with GET when the server rejects HEAD (405/501)
    pub probe_get_fallback: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 5,
            fetch_failure_policy: FetchFailurePolicy::default(),
            probe_get_fallback: true,
        }
    }
}

/// Policy applied when the full-content fetch of a page fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchFailurePolicy {
    /// The page consumes a budget slot and is recorded with no assets
    #[default]
    RecordEmpty,

    /// The page is dropped without a record and without consuming budget
    Skip,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HttpConfig {
    /// User agent sent with every request
    pub user_agent: String,

    /// Total request timeout (seconds)
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    pub connect_timeout_secs: u64,

    /// Maximum number of redirects followed per request
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("asset-crawler/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_redirects: 10,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// File the JSON results are written to, if any
    pub path: Option<String>,

    /// Pretty-print the JSON results
    pub pretty: bool,
}
