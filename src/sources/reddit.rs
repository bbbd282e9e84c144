use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{ErrorKind, FetchError, Listing, Source};
use crate::errors::DiscussItResult;
use crate::sources::http::{endpoint, HttpSettings, UpstreamClient};
use crate::sources::traits::{FetchOutcome, Fetcher};

pub const DEFAULT_BASE_URL: &str = "https://www.reddit.com";

/// Discussion links always point at the public site, whatever API base is configured.
const PERMALINK_HOST: &str = "https://www.reddit.com";

const PAGE_LIMIT: &str = "100";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InfoResponse {
    Listing { data: InfoData },
    Error { error: i64, message: Option<String> },
}

#[derive(Debug, Deserialize)]
struct InfoData {
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, Deserialize)]
struct Post {
    title: String,
    url: String,
    permalink: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    num_comments: u64,
    subreddit: Option<String>,
    created_utc: Option<f64>,
}

pub struct RedditFetcher {
    client: UpstreamClient,
    base_url: String,
}

impl RedditFetcher {
    pub fn new(base_url: impl Into<String>, settings: &HttpSettings) -> DiscussItResult<Self> {
        Ok(Self {
            client: UpstreamClient::new(Source::Reddit, settings)?,
            base_url: base_url.into(),
        })
    }

    /// Reddit stores submitted links verbatim, so the slash and no-slash
    /// spellings of a URL are separate submissions. Only the path end is
    /// toggled; any query or fragment is kept as given.
    fn url_variants(url: &str) -> [String; 2] {
        let path_end = url.find(['?', '#']).unwrap_or(url.len());
        let (head, tail) = url.split_at(path_end);
        let bare = head.trim_end_matches('/');
        [format!("{}{}", bare, tail), format!("{}/{}", bare, tail)]
    }

    fn parse_listings(body: &str) -> Result<Vec<Listing>, FetchError> {
        let response: InfoResponse = serde_json::from_str(body).map_err(|e| {
            FetchError::source(
                Source::Reddit,
                ErrorKind::Parse,
                format!("Unexpected response shape: {}", e),
            )
        })?;

        let data = match response {
            InfoResponse::Listing { data } => data,
            InfoResponse::Error { error, message } => {
                return Err(FetchError::source(
                    Source::Reddit,
                    ErrorKind::Upstream,
                    format!(
                        "Reddit returned error {}: {}",
                        error,
                        message.unwrap_or_else(|| "no message".to_string())
                    ),
                ));
            }
        };

        Ok(data
            .children
            .into_iter()
            .map(|child| Self::to_listing(child.data))
            .collect())
    }

    fn to_listing(post: Post) -> Listing {
        let created_at = post
            .created_utc
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts as i64, 0));

        Listing::new(
            Source::Reddit,
            post.title,
            post.url,
            format!("{}{}", PERMALINK_HOST, post.permalink),
        )
        .with_score(post.score)
        .with_comment_count(post.num_comments)
        .with_community(post.subreddit)
        .with_created_at(created_at)
    }
}

impl Fetcher for RedditFetcher {
    fn source(&self) -> Source {
        Source::Reddit
    }

    fn fetch(&self, url: &str) -> FetchOutcome {
        if let Err(e) = self.client.validate_target(url) {
            return FetchOutcome::failed(e);
        }

        let mut outcome = FetchOutcome::default();

        for variant in Self::url_variants(url) {
            let result = endpoint(
                Source::Reddit,
                &self.base_url,
                "/api/info.json",
                &[("url", variant.as_str()), ("limit", PAGE_LIMIT)],
            )
            .and_then(|api| self.client.get_text(api))
            .and_then(|body| Self::parse_listings(&body));

            match result {
                Ok(listings) => {
                    for listing in listings {
                        if !outcome.listings.iter().any(|l| l.same_thread(&listing)) {
                            outcome.listings.push(listing);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(source = "reddit", url = %variant, error = %e, "fetch failed");
                    // The same failure on both spellings is one failure
                    if !outcome.errors.contains(&e) {
                        outcome.errors.push(e);
                    }
                }
            }
        }

        outcome
    }
}
