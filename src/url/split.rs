//! Raw URL splitting
//!
//! Scheme-independent authority and path extraction for scope checks.

/// The scheme-independent components of a URL used for scope decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlParts<'a> {
    /// Network location (host and optional port, plus userinfo if present)
    pub authority: &'a str,

    /// Path, without query or fragment
    pub path: &'a str,
}

/// Splits a URL string into its authority and path components
///
/// The split works on the raw string and performs no normalization: host case,
/// default ports and empty paths are kept exactly as written. A URL without a
/// `//` authority marker has an empty authority. The scheme is discarded.
///
/// # Examples
///
/// ```
/// use asset_crawler::url::split_url;
///
/// let parts = split_url("https://example.com:8080/a/b?q=1#top");
/// assert_eq!(parts.authority, "example.com:8080");
/// assert_eq!(parts.path, "/a/b");
///
/// let parts = split_url("http://example.com");
/// assert_eq!(parts.authority, "example.com");
/// assert_eq!(parts.path, "");
/// ```
pub fn split_url(url: &str) -> UrlParts<'_> {
    let rest = strip_scheme(url);

    let (authority, rest) = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after.find(['/', '?', '#']).unwrap_or(after.len());
            after.split_at(end)
        }
        None => ("", rest),
    };

    let path_end = rest.find(['?', '#']).unwrap_or(rest.len());

    UrlParts {
        authority,
        path: &rest[..path_end],
    }
}

/// Removes a leading `scheme:` if the text before the first colon is a valid scheme
fn strip_scheme(url: &str) -> &str {
    let Some(colon) = url.find(':') else {
        return url;
    };

    let scheme = &url[..colon];
    let mut chars = scheme.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    if valid {
        &url[colon + 1..]
    } else {
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple() {
        let parts = split_url("https://www.google.it/test");
        assert_eq!(parts.authority, "www.google.it");
        assert_eq!(parts.path, "/test");
    }

    #[test]
    fn test_split_keeps_port() {
        let parts = split_url("http://127.0.0.1:4000/");
        assert_eq!(parts.authority, "127.0.0.1:4000");
        assert_eq!(parts.path, "/");
    }

    #[test]
    fn test_split_drops_query_and_fragment() {
        let parts = split_url("https://example.com/search?q=rust#results");
        assert_eq!(parts.authority, "example.com");
        assert_eq!(parts.path, "/search");

        let parts = split_url("https://example.com?q=1");
        assert_eq!(parts.authority, "example.com");
        assert_eq!(parts.path, "");
    }

    #[test]
    fn test_split_empty_path() {
        let parts = split_url("http://www.sample.com");
        assert_eq!(parts.path, "");
    }

    #[test]
    fn test_split_is_case_preserving() {
        let parts = split_url("HTTP://Example.COM/Page");
        assert_eq!(parts.authority, "Example.COM");
        assert_eq!(parts.path, "/Page");
    }

    #[test]
    fn test_split_without_authority() {
        let parts = split_url("mailto:someone@example.com");
        assert_eq!(parts.authority, "");
        assert_eq!(parts.path, "someone@example.com");

        let parts = split_url("/relative/path");
        assert_eq!(parts.authority, "");
        assert_eq!(parts.path, "/relative/path");
    }

    #[test]
    fn test_split_scheme_relative() {
        let parts = split_url("//cdn.example.com/lib.js");
        assert_eq!(parts.authority, "cdn.example.com");
        assert_eq!(parts.path, "/lib.js");
    }

    #[test]
    fn test_invalid_scheme_is_kept() {
        let parts = split_url("1http://example.com/");
        assert_eq!(parts.authority, "");
        assert_eq!(parts.path, "1http://example.com/");
    }
}
