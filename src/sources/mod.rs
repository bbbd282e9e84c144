pub mod hacker_news;
pub mod http;
pub mod reddit;
pub mod registry;
pub mod slashdot;
pub mod traits;

pub use http::HttpSettings;
pub use registry::FetcherRegistry;
pub use traits::{FetchOutcome, Fetcher};
