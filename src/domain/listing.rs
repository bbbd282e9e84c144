use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::Source;

/// One discussion thread about the queried URL, normalized across sources.
#[derive(Debug, Clone)]
pub struct Listing {
    pub title: String,
    /// The discussed link, as reported by the source.
    pub url: String,
    /// The discussion page itself.
    pub source_url: String,
    source: Source,
    /// Subreddit for Reddit threads.
    pub community: Option<String>,
    comment_count: u64,
    raw_score: i64,
    pub created_at: Option<DateTime<Utc>>,
    rank: OnceLock<i64>,
}

impl Listing {
    pub fn new(source: Source, title: String, url: String, source_url: String) -> Self {
        Self {
            title,
            url,
            source_url,
            source,
            community: None,
            comment_count: 0,
            raw_score: 0,
            created_at: None,
            rank: OnceLock::new(),
        }
    }

    pub fn with_comment_count(mut self, comment_count: u64) -> Self {
        self.comment_count = comment_count;
        self.rank = OnceLock::new();
        self
    }

    pub fn with_score(mut self, raw_score: i64) -> Self {
        self.raw_score = raw_score;
        self.rank = OnceLock::new();
        self
    }

    pub fn with_community(mut self, community: Option<String>) -> Self {
        self.community = community;
        self
    }

    pub fn with_created_at(mut self, created_at: Option<DateTime<Utc>>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn comment_count(&self) -> u64 {
        self.comment_count
    }

    pub fn raw_score(&self) -> i64 {
        self.raw_score
    }

    /// Source-specific ranking, computed on first use.
    pub fn rank(&self) -> i64 {
        *self
            .rank
            .get_or_init(|| self.source.rank(self.raw_score, self.comment_count))
    }

    /// `(source, source_url)` identity, compared case-sensitively. Fetchers
    /// canonicalize discussion links.
    pub fn same_thread(&self, other: &Listing) -> bool {
        self.source == other.source && self.source_url == other.source_url
    }
}

impl PartialEq for Listing {
    fn eq(&self, other: &Self) -> bool {
        self.same_thread(other)
    }
}

impl Eq for Listing {}

impl Serialize for Listing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Listing", 9)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("url", &self.url)?;
        state.serialize_field("source_url", &self.source_url)?;
        state.serialize_field("source", &self.source)?;
        match &self.community {
            Some(community) => state.serialize_field("community", community)?,
            None => state.skip_field("community")?,
        }
        state.serialize_field("comment_count", &self.comment_count)?;
        state.serialize_field("score", &self.raw_score)?;
        state.serialize_field("rank", &self.rank())?;
        match &self.created_at {
            Some(created_at) => state.serialize_field("created_at", created_at)?,
            None => state.skip_field("created_at")?,
        }
        state.end()
    }
}
