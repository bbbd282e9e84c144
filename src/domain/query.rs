use url::Url;

use super::SourceSelector;
use crate::errors::{DiscussItError, DiscussItResult};

/// Normalize a caller-supplied URL before it reaches any source or the cache.
///
/// Trims whitespace, optionally drops the query string and fragment, and
/// strips one trailing slash. Only an empty result is rejected here;
/// syntactic validity is checked by the aggregator and each fetcher.
pub fn normalize_query_url(raw: &str, strip_query: bool) -> DiscussItResult<String> {
    let mut url = raw.trim();

    if strip_query {
        url = url.split(['?', '#']).next().unwrap_or_default();
    }

    let url = url.strip_suffix('/').unwrap_or(url);

    if url.is_empty() {
        return Err(DiscussItError::InvalidInput("URL must not be empty".to_string()));
    }

    Ok(url.to_string())
}

/// Parse an absolute http(s) URL.
pub fn parse_http_url(url: &str) -> Result<Url, String> {
    let parsed = Url::parse(url).map_err(|e| format!("{}: {}", url, e))?;

    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(parsed),
        "http" | "https" => Err(format!("{}: missing host", url)),
        scheme => Err(format!("{}: unsupported scheme '{}'", url, scheme)),
    }
}

/// Whether two links point at the same resource: scheme, a leading `www.`,
/// host case, query, and a trailing slash are ignored.
pub fn same_resource(a: &str, b: &str) -> bool {
    fn key(url: &str) -> Option<(String, String)> {
        let parsed = Url::parse(url.trim()).ok()?;
        let host = parsed.host_str()?.to_ascii_lowercase();
        let host = host.strip_prefix("www.").unwrap_or(&host).to_string();
        let path = parsed.path().trim_end_matches('/').to_string();
        Some((host, path))
    }

    match (key(a), key(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Cache identity of a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub url: String,
    pub selector: SourceSelector,
}

impl CacheKey {
    pub fn new(url: impl Into<String>, selector: SourceSelector) -> Self {
        Self {
            url: url.into(),
            selector,
        }
    }
}

/// Format: "{url}_{selector}"
impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.url, self.selector)
    }
}
