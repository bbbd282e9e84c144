use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use crate::domain::{CacheKey, Report};
use crate::errors::{DiscussItError, DiscussItResult};
use crate::storage::traits::ReportCache;

type Clock = Arc<dyn Fn() -> Instant + Send + Sync>;

struct CacheEntry {
    report: Report,
    /// `None` when the TTL reaches past what `Instant` can represent.
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |expires_at| now < expires_at)
    }
}

/// Process-local report cache. Readers run concurrently; the last writer
/// for a key wins.
#[derive(Clone)]
pub struct MemoryReportCache {
    entries: Arc<RwLock<HashMap<CacheKey, CacheEntry>>>,
    clock: Clock,
}

impl MemoryReportCache {
    pub fn new() -> Self {
        Self::with_clock(Instant::now)
    }

    /// Use `clock` instead of the system clock to decide expiry.
    pub fn with_clock(clock: impl Fn() -> Instant + Send + Sync + 'static) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            clock: Arc::new(clock),
        }
    }

    fn read(&self) -> DiscussItResult<RwLockReadGuard<'_, HashMap<CacheKey, CacheEntry>>> {
        self.entries
            .read()
            .map_err(|e| DiscussItError::Cache(format!("Failed to read cache: {}", e)))
    }

    fn write(&self) -> DiscussItResult<RwLockWriteGuard<'_, HashMap<CacheKey, CacheEntry>>> {
        self.entries
            .write()
            .map_err(|e| DiscussItError::Cache(format!("Failed to write cache: {}", e)))
    }
}

impl Default for MemoryReportCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportCache for MemoryReportCache {
    fn get(&self, key: &CacheKey) -> DiscussItResult<Option<Report>> {
        let now = (self.clock)();
        let entries = self.read()?;

        Ok(entries
            .get(key)
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| entry.report.clone()))
    }

    fn put(&self, key: CacheKey, report: Report, ttl: Duration) -> DiscussItResult<()> {
        let expires_at = (self.clock)().checked_add(ttl);
        self.write()?.insert(key, CacheEntry { report, expires_at });
        Ok(())
    }

    fn invalidate(&self, key: &CacheKey) -> DiscussItResult<()> {
        self.write()?.remove(key);
        Ok(())
    }

    fn purge_expired(&self) -> DiscussItResult<usize> {
        let now = (self.clock)();
        let mut entries = self.write()?;

        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh(now));
        Ok(before - entries.len())
    }

    fn len(&self) -> DiscussItResult<usize> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SourceSelector;
    use std::sync::Mutex;

    const TTL: Duration = Duration::from_secs(60);

    /// A cache whose clock only moves when the returned handle is advanced.
    fn manual_clock() -> (MemoryReportCache, Arc<Mutex<Instant>>) {
        let now = Arc::new(Mutex::new(Instant::now()));
        let handle = Arc::clone(&now);
        let cache = MemoryReportCache::with_clock(move || *now.lock().unwrap());
        (cache, handle)
    }

    fn advance(clock: &Arc<Mutex<Instant>>, by: Duration) {
        let mut now = clock.lock().unwrap();
        *now += by;
    }

    fn key(url: &str) -> CacheKey {
        CacheKey::new(url, SourceSelector::All)
    }

    fn empty_report() -> Report {
        Report::new(Vec::new(), Vec::new(), Vec::new(), Vec::new())
    }

    #[test]
    fn test_get_missing_key() {
        let cache = MemoryReportCache::new();
        assert!(cache.get(&key("https://example.com")).unwrap().is_none());
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        let (cache, clock) = manual_clock();
        cache.put(key("https://example.com"), empty_report(), TTL).unwrap();

        advance(&clock, TTL - Duration::from_secs(1));
        assert!(cache.get(&key("https://example.com")).unwrap().is_some());

        advance(&clock, Duration::from_secs(1));
        assert!(cache.get(&key("https://example.com")).unwrap().is_none());
    }

    #[test]
    fn test_huge_ttl_never_expires() {
        let (cache, clock) = manual_clock();
        let ttl = Duration::from_secs(u64::MAX);
        cache.put(key("https://example.com"), empty_report(), ttl).unwrap();

        advance(&clock, Duration::from_secs(100 * 365 * 24 * 60 * 60));
        assert!(cache.get(&key("https://example.com")).unwrap().is_some());
        assert_eq!(cache.purge_expired().unwrap(), 0);
    }

    #[test]
    fn test_put_replaces_stale_entry() {
        let (cache, clock) = manual_clock();
        cache.put(key("https://example.com"), empty_report(), TTL).unwrap();
        advance(&clock, TTL * 2);

        cache.put(key("https://example.com"), empty_report(), TTL).unwrap();

        assert!(cache.get(&key("https://example.com")).unwrap().is_some());
        assert_eq!(cache.len().unwrap(), 1);
    }

    #[test]
    fn test_selector_is_part_of_key() {
        let cache = MemoryReportCache::new();
        cache.put(key("https://example.com"), empty_report(), TTL).unwrap();

        let reddit_only = CacheKey::new(
            "https://example.com",
            SourceSelector::Only(crate::domain::Source::Reddit),
        );
        assert!(cache.get(&reddit_only).unwrap().is_none());
    }

    #[test]
    fn test_invalidate_and_purge() {
        let (cache, clock) = manual_clock();
        cache.put(key("https://a.example"), empty_report(), TTL).unwrap();
        cache.put(key("https://b.example"), empty_report(), TTL * 3).unwrap();
        cache.put(key("https://c.example"), empty_report(), TTL * 3).unwrap();

        cache.invalidate(&key("https://c.example")).unwrap();
        assert_eq!(cache.len().unwrap(), 2);

        advance(&clock, TTL * 2);
        assert_eq!(cache.purge_expired().unwrap(), 1);
        assert_eq!(cache.len().unwrap(), 1);
        assert!(cache.get(&key("https://b.example")).unwrap().is_some());
    }

    #[test]
    fn test_concurrent_readers_and_writers() {
        let cache = MemoryReportCache::new();

        std::thread::scope(|scope| {
            for i in 0..8 {
                let cache = cache.clone();
                scope.spawn(move || {
                    let key = key(&format!("https://example.com/{}", i % 2));
                    cache.put(key.clone(), empty_report(), TTL).unwrap();
                    assert!(cache.get(&key).unwrap().is_some());
                });
            }
        });

        assert_eq!(cache.len().unwrap(), 2);
    }
}
