use std::time::Duration;

use crate::domain::{CacheKey, Report};
use crate::errors::DiscussItResult;

#[cfg_attr(test, mockall::automock)]
pub trait ReportCache: Send + Sync {
    /// A fresh report for `key`. Expired entries count as absent.
    fn get(&self, key: &CacheKey) -> DiscussItResult<Option<Report>>;

    /// Store `report` for `ttl`, replacing whatever was stored for `key`.
    fn put(&self, key: CacheKey, report: Report, ttl: Duration) -> DiscussItResult<()>;

    fn invalidate(&self, key: &CacheKey) -> DiscussItResult<()>;

    /// Drop expired entries, returning how many were removed.
    fn purge_expired(&self) -> DiscussItResult<usize>;

    /// Stored entries, fresh or not.
    fn len(&self) -> DiscussItResult<usize>;
}
