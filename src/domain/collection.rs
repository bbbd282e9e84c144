use super::Listing;

/// Listings gathered for one query, in fetch order.
#[derive(Debug, Clone, Default)]
pub struct ListingCollection {
    items: Vec<Listing>,
}

impl ListingCollection {
    pub fn new(items: Vec<Listing>) -> Self {
        Self { items }
    }

    pub fn all(&self) -> &[Listing] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Highest-ranked listing per source, in order of each source's first
    /// appearance. Ties keep the earlier listing.
    pub fn tops(&self) -> Vec<Listing> {
        let mut tops: Vec<&Listing> = Vec::new();

        for listing in &self.items {
            match tops.iter().position(|top| top.source() == listing.source()) {
                Some(i) if listing.rank() > tops[i].rank() => tops[i] = listing,
                Some(_) => {}
                None => tops.push(listing),
            }
        }

        tops.into_iter().cloned().collect()
    }
}
