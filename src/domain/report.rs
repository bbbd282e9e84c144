use serde::{Serialize, Serializer};

use super::{FetchError, Listing};

/// A counted group of listings. `hits` is always the length of `results`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultGroup {
    hits: usize,
    results: Vec<Listing>,
}

impl ResultGroup {
    pub fn new(results: Vec<Listing>) -> Self {
        Self {
            hits: results.len(),
            results,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn results(&self) -> &[Listing] {
        &self.results
    }
}

/// The merged answer for one query.
///
/// Serializes to
/// `{total_hits, top_results{hits, results}, other_results{hits, results},
///   filtered_results{hits, results}, errors: [string]}`.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    total_hits: usize,
    top_results: ResultGroup,
    other_results: ResultGroup,
    filtered_results: ResultGroup,
    #[serde(serialize_with = "serialize_error_messages")]
    errors: Vec<FetchError>,
}

impl Report {
    pub fn new(
        top_results: Vec<Listing>,
        other_results: Vec<Listing>,
        filtered_results: Vec<Listing>,
        errors: Vec<FetchError>,
    ) -> Self {
        let top_results = ResultGroup::new(top_results);
        let other_results = ResultGroup::new(other_results);
        Self {
            total_hits: top_results.hits() + other_results.hits(),
            top_results,
            other_results,
            filtered_results: ResultGroup::new(filtered_results),
            errors,
        }
    }

    pub fn total_hits(&self) -> usize {
        self.total_hits
    }

    pub fn top_results(&self) -> &ResultGroup {
        &self.top_results
    }

    pub fn other_results(&self) -> &ResultGroup {
        &self.other_results
    }

    pub fn filtered_results(&self) -> &ResultGroup {
        &self.filtered_results
    }

    pub fn errors(&self) -> &[FetchError] {
        &self.errors
    }

    /// Some results came back but at least one source failed.
    pub fn is_partial(&self) -> bool {
        !self.errors.is_empty() && self.total_hits > 0
    }
}

fn serialize_error_messages<S: Serializer>(
    errors: &[FetchError],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(errors.iter().map(|e| e.to_string()))
}
