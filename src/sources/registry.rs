use crate::config::Config;
use crate::domain::{ApiVersion, Source, SourceSelector};
use crate::errors::DiscussItResult;
use crate::sources::traits::Fetcher;
use crate::sources::{
    hacker_news::HackerNewsFetcher, reddit::RedditFetcher, slashdot::SlashdotFetcher,
};

pub struct FetcherRegistry {
    fetchers: Vec<Box<dyn Fetcher>>,
}

impl FetcherRegistry {
    /// An empty registry; see `from_config` for the real sources.
    pub fn new() -> Self {
        Self {
            fetchers: Vec::new(),
        }
    }

    pub fn from_config(config: &Config) -> DiscussItResult<Self> {
        let mut registry = Self::new();

        registry.register(Box::new(RedditFetcher::new(&config.reddit_url, &config.http)?));
        registry.register(Box::new(HackerNewsFetcher::new(&config.hn_url, &config.http)?));
        registry.register(Box::new(SlashdotFetcher::new(&config.slashdot_url, &config.http)?));

        Ok(registry)
    }

    /// Register a fetcher, replacing any earlier one for the same source.
    pub fn register(&mut self, fetcher: Box<dyn Fetcher>) {
        self.fetchers.retain(|f| f.source() != fetcher.source());
        self.fetchers.push(fetcher);
    }

    pub fn find(&self, source: Source) -> Option<&dyn Fetcher> {
        self.fetchers
            .iter()
            .find(|f| f.source() == source)
            .map(|f| f.as_ref())
    }

    /// Sources a version is allowed to see.
    pub fn enabled_sources(version: ApiVersion) -> Vec<Source> {
        Source::ALL
            .into_iter()
            .filter(|source| *source != Source::Slashdot || version.includes_slashdot())
            .collect()
    }

    /// Fetchers to run for a request, in declared source order. Sources
    /// gated off by `version` are left out silently.
    pub fn select(&self, selector: SourceSelector, version: ApiVersion) -> Vec<&dyn Fetcher> {
        Self::enabled_sources(version)
            .into_iter()
            .filter(|source| selector.includes(*source))
            .filter_map(|source| self.find(source))
            .collect()
    }
}

impl Default for FetcherRegistry {
    fn default() -> Self {
        Self::new()
    }
}
