//! # Statement Cache
//!
//! Bounded, insertion-frozen memoization in front of the sanitize engine.
//!
//! ## Why Freeze Instead of Evict?
//!
//! Telemetry traffic is dominated by a small recurring set of normalized
//! statements; a bounded map that simply stops inserting once full gives
//! those statements permanent hits with an exact memory ceiling. Eviction
//! would buy hit rate for the long tail at the cost of churn on exactly the
//! workloads (generated, high-cardinality SQL) where memoization pays least.
//! The engine is cheap and pure, so an uncached statement costs one scan.
//!
//! ## Locking
//!
//! Lookups take the shared side of an `RwLock`; insertion takes the
//! exclusive side once per distinct statement, ever. An atomic mirror of
//! the map size lets a saturated cache skip the exclusive lock entirely.
//! Two readers racing on the same missing statement both run the engine;
//! whoever takes the write lock first inserts, and the loser returns the
//! winner's entry so the cached identity stays stable.
//!
//! ## Usage
//!
//! ```ignore
//! use sqlscrub::get;
//!
//! let info = get(Some("SELECT name FROM Customers"));
//! assert_eq!(info.summary(), "SELECT Customers");
//! assert!(std::sync::Arc::ptr_eq(&info, &get(Some("SELECT name FROM Customers"))));
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use eyre::{ensure, Result};
use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::config::DEFAULT_CACHE_CAPACITY;
use crate::sanitize::{sanitize, StatementInfo};

/// Maps raw statement text to its sanitized form, up to a fixed number of
/// distinct statements. Entries are never evicted or replaced.
pub struct StatementCache {
    entries: RwLock<HashMap<String, Arc<StatementInfo>>>,
    /// Mirror of the map size, readable without the lock.
    len: AtomicUsize,
    capacity: AtomicUsize,
}

impl StatementCache {
    /// A cache with the default capacity of
    /// [`DEFAULT_CACHE_CAPACITY`] distinct statements.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            len: AtomicUsize::new(0),
            capacity: AtomicUsize::new(DEFAULT_CACHE_CAPACITY),
        }
    }

    /// A cache with an explicit capacity.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        ensure!(capacity > 0, "statement cache capacity must be nonzero");
        let cache = Self::new();
        cache.capacity.store(capacity, Ordering::Relaxed);
        Ok(cache)
    }

    /// The memoized result for `sql`.
    ///
    /// `None` yields the shared empty [`StatementInfo`] without touching the
    /// map. A miss runs the engine; the result is inserted unless the cache
    /// is already at capacity, in which case it is returned unmemoized.
    pub fn get(&self, sql: Option<&str>) -> Arc<StatementInfo> {
        let Some(sql) = sql else {
            return empty_statement_info();
        };

        if let Some(hit) = self.entries.read().get(sql) {
            return Arc::clone(hit);
        }

        let info = Arc::new(sanitize(sql));

        // A saturated cache is frozen; skip the exclusive lock entirely.
        if self.len.load(Ordering::Acquire) >= self.capacity() {
            return info;
        }

        let mut entries = self.entries.write();
        if let Some(winner) = entries.get(sql) {
            return Arc::clone(winner);
        }
        if entries.len() >= self.capacity() {
            return info;
        }
        entries.insert(sql.to_owned(), Arc::clone(&info));
        self.len.store(entries.len(), Ordering::Release);
        info
    }

    /// Number of memoized statements.
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity.load(Ordering::Relaxed)
    }

    /// Reconfigures the capacity.
    ///
    /// Meant for test harnesses; production callers size the cache once at
    /// startup. Shrinking below the current size freezes the cache without
    /// shedding entries already inserted.
    pub fn set_capacity(&self, capacity: usize) {
        self.capacity.store(capacity, Ordering::Relaxed);
    }
}

impl Default for StatementCache {
    fn default() -> Self {
        Self::new()
    }
}

static STATEMENT_CACHE: OnceLock<StatementCache> = OnceLock::new();
static EMPTY_INFO: OnceLock<Arc<StatementInfo>> = OnceLock::new();

fn statement_cache() -> &'static StatementCache {
    STATEMENT_CACHE.get_or_init(StatementCache::new)
}

fn empty_statement_info() -> Arc<StatementInfo> {
    Arc::clone(EMPTY_INFO.get_or_init(|| Arc::new(StatementInfo::default())))
}

/// Memoized entry point over the process-wide [`StatementCache`].
pub fn get(sql: Option<&str>) -> Arc<StatementInfo> {
    statement_cache().get(sql)
}

/// Capacity of the process-wide cache.
pub fn cache_capacity() -> usize {
    statement_cache().capacity()
}

/// Reconfigures the process-wide cache capacity. See
/// [`StatementCache::set_capacity`].
pub fn set_cache_capacity(capacity: usize) {
    statement_cache().set_capacity(capacity);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_then_hit_returns_the_same_value() {
        let cache = StatementCache::new();
        let first = cache.get(Some("SELECT a FROM b"));
        let second = cache.get(Some("SELECT a FROM b"));
        assert_eq!(first, second);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cached_result_matches_the_engine() {
        let cache = StatementCache::new();
        let via_cache = cache.get(Some("INSERT INTO t VALUES (1)"));
        let direct = sanitize("INSERT INTO t VALUES (1)");
        assert_eq!(*via_cache, direct);
    }

    #[test]
    fn null_input_is_empty_and_never_cached() {
        let cache = StatementCache::new();
        let info = cache.get(None);
        assert_eq!(info.sanitized_sql(), "");
        assert_eq!(info.summary(), "");
        assert!(cache.is_empty());
    }

    #[test]
    fn empty_statement_is_a_regular_entry() {
        let cache = StatementCache::new();
        let info = cache.get(Some(""));
        assert_eq!(info.sanitized_sql(), "");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn freezes_at_capacity() {
        let cache = StatementCache::with_capacity(3).unwrap();
        for i in 0..10 {
            let sql = format!("SELECT {i} FROM t");
            let info = cache.get(Some(&sql));
            assert_eq!(info.sanitized_sql(), "SELECT ? FROM t");
        }
        assert_eq!(cache.len(), 3);

        // Statements that made it in still hit; later ones recompute.
        let early = cache.get(Some("SELECT 0 FROM t"));
        assert!(Arc::ptr_eq(&early, &cache.get(Some("SELECT 0 FROM t"))));
        let late = cache.get(Some("SELECT 9 FROM t"));
        assert!(!Arc::ptr_eq(&late, &cache.get(Some("SELECT 9 FROM t"))));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(StatementCache::with_capacity(0).is_err());
        assert!(StatementCache::with_capacity(1).is_ok());
    }

    #[test]
    fn shrinking_capacity_freezes_without_shedding() {
        let cache = StatementCache::with_capacity(8).unwrap();
        for i in 0..5 {
            cache.get(Some(&format!("DELETE FROM t{i}")));
        }
        cache.set_capacity(2);
        assert_eq!(cache.len(), 5);

        cache.get(Some("SELECT brand_new FROM t"));
        assert_eq!(cache.len(), 5);

        // Existing entries keep hitting after the shrink.
        let hit = cache.get(Some("DELETE FROM t0"));
        assert!(Arc::ptr_eq(&hit, &cache.get(Some("DELETE FROM t0"))));
    }

    #[test]
    fn raising_capacity_thaws_insertion() {
        let cache = StatementCache::with_capacity(1).unwrap();
        cache.get(Some("SELECT 1"));
        cache.get(Some("SELECT 2"));
        assert_eq!(cache.len(), 1);

        cache.set_capacity(4);
        cache.get(Some("SELECT 2"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn process_wide_entry_point_memoizes() {
        let a = get(Some("SELECT process_wide FROM here"));
        let b = get(Some("SELECT process_wide FROM here"));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.summary(), "SELECT here");
    }

    #[test]
    fn process_wide_null_is_shared() {
        assert!(Arc::ptr_eq(&get(None), &get(None)));
    }
}
