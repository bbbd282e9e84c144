use crate::domain::Listing;

/// Minimum signal a listing needs to be reported as a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalThreshold {
    pub min_comments: u64,
    pub min_rank: i64,
}

impl Default for SignalThreshold {
    fn default() -> Self {
        Self {
            min_comments: 1,
            min_rank: 1,
        }
    }
}

impl SignalThreshold {
    pub fn passes(&self, listing: &Listing) -> bool {
        listing.comment_count() >= self.min_comments && listing.rank() >= self.min_rank
    }
}

/// Splits listings into hits and low-signal or duplicate leftovers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Filter {
    threshold: SignalThreshold,
}

impl Filter {
    pub fn new(threshold: SignalThreshold) -> Self {
        Self { threshold }
    }

    /// Returns `(kept, removed)`, both in input order.
    ///
    /// A listing is kept when it passes the threshold and does not repeat a
    /// listing kept before it. Repeats are the same thread, or the same
    /// discussion link reported under another source. The discussed `url` is
    /// not compared: every listing of one query shares it.
    pub fn partition(&self, listings: &[Listing]) -> (Vec<Listing>, Vec<Listing>) {
        let mut kept: Vec<Listing> = Vec::new();
        let mut removed = Vec::new();

        for listing in listings {
            let duplicate = kept
                .iter()
                .any(|k| k.same_thread(listing) || k.source_url == listing.source_url);

            if !duplicate && self.threshold.passes(listing) {
                kept.push(listing.clone());
            } else {
                removed.push(listing.clone());
            }
        }

        (kept, removed)
    }
}
