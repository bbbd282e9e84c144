use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{same_resource, ErrorKind, FetchError, Listing, Source};
use crate::errors::DiscussItResult;
use crate::sources::http::{endpoint, HttpSettings, UpstreamClient};
use crate::sources::traits::{FetchOutcome, Fetcher};

pub const DEFAULT_BASE_URL: &str = "https://hn.algolia.com";

const ITEM_URL: &str = "https://news.ycombinator.com/item?id=";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "objectID")]
    object_id: String,
    title: Option<String>,
    url: Option<String>,
    points: Option<i64>,
    num_comments: Option<u64>,
    created_at_i: Option<i64>,
}

pub struct HackerNewsFetcher {
    client: UpstreamClient,
    base_url: String,
}

impl HackerNewsFetcher {
    pub fn new(base_url: impl Into<String>, settings: &HttpSettings) -> DiscussItResult<Self> {
        Ok(Self {
            client: UpstreamClient::new(Source::HackerNews, settings)?,
            base_url: base_url.into(),
        })
    }

    /// Algolia matches URLs by substring, so hits for other pages on the
    /// same site are dropped here.
    fn parse_listings(body: &str, query_url: &str) -> Result<Vec<Listing>, FetchError> {
        let response: SearchResponse = serde_json::from_str(body).map_err(|e| {
            FetchError::source(
                Source::HackerNews,
                ErrorKind::Parse,
                format!("Unexpected response shape: {}", e),
            )
        })?;

        Ok(response
            .hits
            .into_iter()
            .filter_map(|hit| {
                let url = hit.url.filter(|u| same_resource(u, query_url))?;
                let created_at = hit
                    .created_at_i
                    .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0));

                Some(
                    Listing::new(
                        Source::HackerNews,
                        hit.title.unwrap_or_else(|| "Untitled".to_string()),
                        url,
                        format!("{}{}", ITEM_URL, hit.object_id),
                    )
                    .with_score(hit.points.unwrap_or(0))
                    .with_comment_count(hit.num_comments.unwrap_or(0))
                    .with_created_at(created_at),
                )
            })
            .collect())
    }
}

impl Fetcher for HackerNewsFetcher {
    fn source(&self) -> Source {
        Source::HackerNews
    }

    fn fetch(&self, url: &str) -> FetchOutcome {
        if let Err(e) = self.client.validate_target(url) {
            return FetchOutcome::failed(e);
        }

        let result = endpoint(
            Source::HackerNews,
            &self.base_url,
            "/api/v1/search",
            &[
                ("query", url),
                ("restrictSearchableAttributes", "url"),
                ("tags", "story"),
            ],
        )
        .and_then(|api| self.client.get_text(api))
        .and_then(|body| Self::parse_listings(&body, url));

        match result {
            Ok(listings) => FetchOutcome::listings(listings),
            Err(e) => {
                tracing::warn!(source = "hackernews", error = %e, "fetch failed");
                FetchOutcome::failed(e)
            }
        }
    }
}
