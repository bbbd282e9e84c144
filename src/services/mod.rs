pub mod aggregator;
pub mod discussion_service;
pub mod filter;

pub use aggregator::Aggregator;
pub use discussion_service::DiscussionService;
pub use filter::{Filter, SignalThreshold};
