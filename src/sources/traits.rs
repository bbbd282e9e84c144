use crate::domain::{FetchError, Listing, Source};

/// What one fetch produced. Zero listings and zero errors means the source
/// has no discussions for the URL, which is not a failure.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    pub listings: Vec<Listing>,
    pub errors: Vec<FetchError>,
}

impl FetchOutcome {
    pub fn listings(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            errors: Vec::new(),
        }
    }

    pub fn failed(error: FetchError) -> Self {
        Self {
            listings: Vec::new(),
            errors: vec![error],
        }
    }

    pub fn is_failure(&self) -> bool {
        self.listings.is_empty() && !self.errors.is_empty()
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Fetcher: Send + Sync {
    /// Identifies this source
    fn source(&self) -> Source;

    /// Find discussions about `url`. Upstream failures are reported in the
    /// outcome, never as a panic or an `Err`.
    fn fetch(&self, url: &str) -> FetchOutcome;
}
