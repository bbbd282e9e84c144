use std::thread;

use crate::config::Config;
use crate::domain::query::parse_http_url;
use crate::domain::{
    ApiVersion, ErrorKind, FetchError, Listing, ListingCollection, Report, SourceSelector,
};
use crate::errors::DiscussItResult;
use crate::services::filter::Filter;
use crate::sources::{FetchOutcome, Fetcher, FetcherRegistry};

/// Runs the selected fetchers for one URL and assembles their results.
pub struct Aggregator {
    registry: FetcherRegistry,
    filter: Filter,
    version: ApiVersion,
}

impl Aggregator {
    pub fn new(registry: FetcherRegistry, filter: Filter, version: ApiVersion) -> Self {
        Self {
            registry,
            filter,
            version,
        }
    }

    pub fn from_config(config: &Config) -> DiscussItResult<Self> {
        Ok(Self::new(
            FetcherRegistry::from_config(config)?,
            Filter::new(config.threshold),
            config.api_version,
        ))
    }

    /// Always returns a report. Upstream failures, and a URL that does not
    /// parse, are recorded in its error list.
    pub fn aggregate(&self, url: &str, selector: SourceSelector) -> Report {
        if let Err(msg) = parse_http_url(url) {
            tracing::warn!(url, "rejecting unparsable URL");
            let error = FetchError::aggregator(ErrorKind::InvalidInput, format!("Invalid URL {}", msg));
            return Report::new(Vec::new(), Vec::new(), Vec::new(), vec![error]);
        }

        let fetchers = self.registry.select(selector, self.version);
        tracing::info!(
            url,
            selector = %selector,
            version = %self.version,
            sources = fetchers.len(),
            "aggregating discussions"
        );

        let outcomes = fetch_all(&fetchers, url);

        // Outcomes come back in declared source order, whatever finished first
        let mut listings = Vec::new();
        let mut errors = Vec::new();
        for outcome in outcomes {
            listings.extend(outcome.listings);
            errors.extend(outcome.errors);
        }

        let report = self.assemble(ListingCollection::new(listings), errors);
        tracing::info!(
            url,
            total_hits = report.total_hits(),
            filtered = report.filtered_results().hits(),
            errors = report.errors().len(),
            "aggregation finished"
        );
        report
    }

    fn assemble(&self, collection: ListingCollection, errors: Vec<FetchError>) -> Report {
        let (kept, mut removed) = self.filter.partition(collection.all());

        // Tops come from the unfiltered set and then face the same filter
        let (tops, removed_tops) = self.filter.partition(&collection.tops());

        let others: Vec<Listing> = kept
            .into_iter()
            .filter(|listing| !tops.iter().any(|top| top.same_thread(listing)))
            .collect();

        for top in removed_tops {
            if !removed.iter().any(|r| r.same_thread(&top)) {
                removed.push(top);
            }
        }

        Report::new(tops, others, removed, errors)
    }
}

/// Run every fetcher to completion and return outcomes in input order.
/// More than one fetcher means one scoped thread each.
fn fetch_all(fetchers: &[&dyn Fetcher], url: &str) -> Vec<FetchOutcome> {
    if let [fetcher] = fetchers {
        return vec![fetcher.fetch(url)];
    }

    thread::scope(|scope| {
        let handles: Vec<_> = fetchers
            .iter()
            .map(|fetcher| (fetcher.source(), scope.spawn(move || fetcher.fetch(url))))
            .collect();

        handles
            .into_iter()
            .map(|(source, handle)| {
                handle.join().unwrap_or_else(|_| {
                    tracing::error!(source = %source, "fetcher panicked");
                    FetchOutcome::failed(FetchError::aggregator(
                        ErrorKind::Upstream,
                        format!("{} fetcher stopped unexpectedly", source),
                    ))
                })
            })
            .collect()
    })
}
