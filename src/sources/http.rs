use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use url::Url;

use crate::domain::{query, ErrorKind, FetchError, Source};
use crate::errors::{DiscussItError, DiscussItResult};

/// Settings shared by every upstream client.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: concat!("discussit/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Blocking GET client that turns every transport problem into a
/// `FetchError` tagged with the calling source.
pub struct UpstreamClient {
    client: Client,
    source: Source,
}

impl UpstreamClient {
    pub fn new(source: Source, settings: &HttpSettings) -> DiscussItResult<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| {
                DiscussItError::Config(format!("Failed to build {} HTTP client: {}", source, e))
            })?;

        Ok(Self { client, source })
    }

    /// Validate the discussed URL before any network call.
    pub fn validate_target(&self, url: &str) -> Result<Url, FetchError> {
        query::parse_http_url(url).map_err(|msg| {
            FetchError::source(self.source, ErrorKind::InvalidInput, format!("Invalid URL {}", msg))
        })
    }

    pub fn get_text(&self, endpoint: Url) -> Result<String, FetchError> {
        tracing::debug!(source = %self.source, endpoint = %endpoint, "upstream request");

        let response = self.client.get(endpoint).send().map_err(|e| self.network(&e))?;
        let response = self.check_status(response)?;

        response.text().map_err(|e| self.network(&e))
    }

    fn check_status(&self, response: Response) -> Result<Response, FetchError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let reason = status.canonical_reason().unwrap_or("Unknown");
        let kind = match status {
            StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE => ErrorKind::Upstream,
            _ => ErrorKind::Network,
        };

        Err(FetchError::source(
            self.source,
            kind,
            format!("HTTP {}: {}", status.as_u16(), reason),
        ))
    }

    fn network(&self, err: &reqwest::Error) -> FetchError {
        let message = if err.is_timeout() {
            "Request timed out".to_string()
        } else if err.is_connect() {
            "Could not connect to upstream".to_string()
        } else {
            format!("Request failed: {}", err)
        };
        FetchError::source(self.source, ErrorKind::Network, message)
    }
}

/// Join `path` onto a configured base URL such as `https://www.reddit.com`.
pub fn endpoint(
    source: Source,
    base: &str,
    path: &str,
    params: &[(&str, &str)],
) -> Result<Url, FetchError> {
    let mut url = Url::parse(base)
        .and_then(|b| b.join(path))
        .map_err(|e| {
            FetchError::source(
                source,
                ErrorKind::InvalidInput,
                format!("Invalid endpoint {}{}: {}", base, path, e),
            )
        })?;
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }
    Ok(url)
}
