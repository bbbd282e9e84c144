pub mod collection;
pub mod fetch_error;
pub mod listing;
pub mod query;
pub mod report;
pub mod source;
pub mod version;

pub use collection::ListingCollection;
pub use fetch_error::{ErrorKind, ErrorOrigin, FetchError};
pub use listing::Listing;
pub use query::{normalize_query_url, same_resource, CacheKey};
pub use report::{Report, ResultGroup};
pub use source::{Source, SourceSelector};
pub use version::ApiVersion;
