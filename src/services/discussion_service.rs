use std::time::Duration;

use crate::config::Config;
use crate::domain::{normalize_query_url, CacheKey, Report, SourceSelector};
use crate::errors::DiscussItResult;
use crate::services::aggregator::Aggregator;
use crate::storage::traits::ReportCache;

pub struct DiscussionService<C: ReportCache> {
    aggregator: Aggregator,
    cache: C,
    ttl: Duration,
    strip_query: bool,
}

impl<C: ReportCache> DiscussionService<C> {
    pub fn new(aggregator: Aggregator, cache: C, ttl: Duration, strip_query: bool) -> Self {
        Self {
            aggregator,
            cache,
            ttl,
            strip_query,
        }
    }

    pub fn from_config(config: &Config, cache: C) -> DiscussItResult<Self> {
        Ok(Self::new(
            Aggregator::from_config(config)?,
            cache,
            config.cache_ttl,
            config.strip_query,
        ))
    }

    /// Discussions about `url`, served from the cache while fresh.
    ///
    /// An empty URL is rejected outright. Every other problem ends up in the
    /// report's error list, and such reports are not cached.
    pub fn lookup(&self, url: &str, selector: SourceSelector) -> DiscussItResult<Report> {
        let url = normalize_query_url(url, self.strip_query)?;
        let key = CacheKey::new(url, selector);

        if let Some(report) = self.cache.get(&key)? {
            tracing::debug!(key = %key, "cache hit");
            return Ok(report);
        }

        let purged = self.cache.purge_expired()?;
        if purged > 0 {
            tracing::debug!(purged, "dropped expired reports");
        }

        let report = self.aggregator.aggregate(&key.url, selector);

        if report.errors().is_empty() {
            self.cache.put(key, report.clone(), self.ttl)?;
        } else {
            tracing::debug!(key = %key, errors = report.errors().len(), "not caching report with errors");
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApiVersion, ErrorKind, FetchError, Listing, Source};
    use crate::errors::DiscussItError;
    use crate::services::filter::Filter;
    use crate::sources::traits::MockFetcher;
    use crate::sources::{FetchOutcome, FetcherRegistry};
    use crate::storage::traits::MockReportCache;
    use crate::storage::MemoryReportCache;

    const TTL: Duration = Duration::from_secs(3600);

    fn hn_listing() -> Listing {
        Listing::new(
            Source::HackerNews,
            "X".to_string(),
            "https://example.com/article".to_string(),
            "https://news.ycombinator.com/item?id=1".to_string(),
        )
        .with_score(10)
        .with_comment_count(5)
    }

    fn aggregator_with(fetcher: MockFetcher) -> Aggregator {
        let mut registry = FetcherRegistry::new();
        registry.register(Box::new(fetcher));
        Aggregator::new(registry, Filter::default(), ApiVersion::LATEST)
    }

    fn hn_fetcher(calls: usize, outcome: FetchOutcome) -> MockFetcher {
        let mut fetcher = MockFetcher::new();
        fetcher.expect_source().return_const(Source::HackerNews);
        fetcher
            .expect_fetch()
            .times(calls)
            .returning(move |_| outcome.clone());
        fetcher
    }

    #[test]
    fn test_second_lookup_within_ttl_is_cached() {
        let fetcher = hn_fetcher(1, FetchOutcome::listings(vec![hn_listing()]));
        let service = DiscussionService::new(
            aggregator_with(fetcher),
            MemoryReportCache::new(),
            TTL,
            true,
        );

        let first = service
            .lookup("https://example.com/article", SourceSelector::All)
            .unwrap();
        // Normalizes to the same key
        let second = service
            .lookup("https://example.com/article/?ref=x", SourceSelector::All)
            .unwrap();

        assert_eq!(first.total_hits(), 1);
        assert_eq!(second.total_hits(), 1);
    }

    #[test]
    fn test_expired_entry_fetches_again() {
        let fetcher = hn_fetcher(2, FetchOutcome::listings(vec![hn_listing()]));
        let service = DiscussionService::new(
            aggregator_with(fetcher),
            MemoryReportCache::new(),
            Duration::ZERO,
            true,
        );

        service
            .lookup("https://example.com/article", SourceSelector::All)
            .unwrap();
        service
            .lookup("https://example.com/article", SourceSelector::All)
            .unwrap();
    }

    #[test]
    fn test_report_with_errors_is_not_cached() {
        let error = FetchError::source(Source::HackerNews, ErrorKind::Network, "Request timed out");
        let fetcher = hn_fetcher(1, FetchOutcome::failed(error));

        let mut cache = MockReportCache::new();
        cache.expect_get().times(1).returning(|_| Ok(None));
        cache.expect_purge_expired().returning(|| Ok(0));
        cache.expect_put().never();

        let service = DiscussionService::new(aggregator_with(fetcher), cache, TTL, true);
        let report = service
            .lookup("https://example.com/article", SourceSelector::All)
            .unwrap();

        assert_eq!(report.errors().len(), 1);
        assert_eq!(report.total_hits(), 0);
    }

    #[test]
    fn test_empty_url_is_rejected_before_fetching() {
        let fetcher = hn_fetcher(0, FetchOutcome::default());
        let mut cache = MockReportCache::new();
        cache.expect_get().never();

        let service = DiscussionService::new(aggregator_with(fetcher), cache, TTL, true);
        let result = service.lookup("  ", SourceSelector::All);

        assert!(matches!(result, Err(DiscussItError::InvalidInput(_))));
    }

    #[test]
    fn test_keep_query_separates_cache_keys() {
        let fetcher = hn_fetcher(2, FetchOutcome::listings(vec![hn_listing()]));
        let cache = MemoryReportCache::new();
        let service = DiscussionService::new(aggregator_with(fetcher), cache.clone(), TTL, false);

        service
            .lookup("https://example.com/watch?v=1", SourceSelector::All)
            .unwrap();
        service
            .lookup("https://example.com/watch?v=2", SourceSelector::All)
            .unwrap();

        assert_eq!(cache.len().unwrap(), 2);
    }
}
