use serde::{Deserialize, Serialize};

use crate::errors::DiscussItError;

/// An upstream discussion platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Reddit,
    HackerNews,
    Slashdot,
}

impl Source {
    /// Declared merge order. Reports always list sources in this order.
    pub const ALL: [Source; 3] = [Source::Reddit, Source::HackerNews, Source::Slashdot];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Reddit => "reddit",
            Source::HackerNews => "hackernews",
            Source::Slashdot => "slashdot",
        }
    }

    /// Rank formula for listings from this source.
    ///
    /// Slashdot does not expose a vote score, so only the comment count counts.
    pub fn rank(&self, raw_score: i64, comment_count: u64) -> i64 {
        let comments = i64::try_from(comment_count).unwrap_or(i64::MAX);
        match self {
            Source::Reddit | Source::HackerNews => raw_score.saturating_add(comments),
            Source::Slashdot => comments,
        }
    }
}

impl std::str::FromStr for Source {
    type Err = DiscussItError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reddit" => Ok(Source::Reddit),
            "hackernews" | "hn" => Ok(Source::HackerNews),
            "slashdot" => Ok(Source::Slashdot),
            _ => Err(DiscussItError::UnknownSource(s.to_string())),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which sources a request asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SourceSelector {
    Only(Source),
    #[default]
    All,
}

impl SourceSelector {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceSelector::Only(source) => source.as_str(),
            SourceSelector::All => "all",
        }
    }

    pub fn includes(&self, source: Source) -> bool {
        match self {
            SourceSelector::Only(only) => *only == source,
            SourceSelector::All => true,
        }
    }
}

impl std::str::FromStr for SourceSelector {
    type Err = DiscussItError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(SourceSelector::All);
        }
        s.parse().map(SourceSelector::Only)
    }
}

impl std::fmt::Display for SourceSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
