//! Client-side schedule cache with staleness and preloading semantics.
//!
//! Keys resolved day schedules by (view, day, scope, role) and distinguishes
//! "never fetched" from "fetched and empty", so a teacher with no lessons on
//! a day is not re-fetched on every render. Reads serve stale values;
//! staleness only governs whether a background refresh is due
//! (stale-while-revalidate). Entries past the longer eviction window are
//! deleted outright, forcing the next read to treat them as absent.
//!
//! The cache is a cheap-to-clone shared handle. Construct one per logical
//! session (per user/view) and pass it explicitly.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use futures::future::join_all;
use parking_lot::RwLock;
use tokio::sync::Semaphore;

use crate::api::{Role, ScopeId};
use crate::error::{EngineError, EngineResult};
use crate::models::lesson::LessonInstance;
use crate::models::time::week_of;
use crate::source::LessonFetcher;

/// Freshness windows and fetch bound for a [`ScheduleCache`].
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// After this much time without a write, an entry still serves reads but
    /// is due for a background refresh.
    pub stale_after: Duration,
    /// After this much time without a write, an entry is deleted outright.
    /// Must exceed `stale_after`.
    pub evict_after: Duration,
    /// Upper bound on concurrent `fetch_day` calls across all overlapping
    /// `preload_week` invocations on this cache.
    pub max_concurrent_fetches: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            stale_after: Duration::from_secs(60),
            evict_after: Duration::from_secs(300),
            max_concurrent_fetches: 4,
        }
    }
}

impl CacheConfig {
    fn validate(&self) -> EngineResult<()> {
        if self.stale_after >= self.evict_after {
            return Err(EngineError::invalid_request(format!(
                "stale_after ({:?}) must be shorter than evict_after ({:?})",
                self.stale_after, self.evict_after
            )));
        }
        if self.max_concurrent_fetches == 0 {
            return Err(EngineError::invalid_request(
                "max_concurrent_fetches must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Key of one cached day schedule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Subject of the view (whose schedule is being looked at).
    pub view: String,
    pub day: NaiveDate,
    pub scope: ScopeId,
    pub role: Role,
}

impl CacheKey {
    pub fn new(view: impl Into<String>, day: NaiveDate, scope: ScopeId, role: Role) -> Self {
        CacheKey {
            view: view.into(),
            day,
            scope,
            role,
        }
    }
}

/// One day's fetch failure reported by [`ScheduleCache::preload_week`].
///
/// The failed day is still cached as populated-empty; retrying is an explicit
/// caller action, never an automatic engine behavior.
#[derive(Debug)]
pub struct PreloadFailure {
    pub day: NaiveDate,
    pub error: anyhow::Error,
}

struct CacheEntry {
    lessons: Vec<LessonInstance>,
    written: Instant,
}

struct CacheInner {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    fetch_permits: Semaphore,
    config: CacheConfig,
}

/// In-memory schedule cache.
///
/// Every write is a full replacement of the entry, so no read ever observes
/// a half-written value. Reads never block writers beyond the map lock;
/// there is no blocking wait inside `get`/`set`/`is_stale` — callers needing
/// fresh data run [`preload_week`](Self::preload_week) (or a single-day
/// fetch-and-set) and re-read.
#[derive(Clone)]
pub struct ScheduleCache {
    inner: Arc<CacheInner>,
}

impl ScheduleCache {
    /// Create a cache with the given freshness windows.
    ///
    /// # Errors
    /// `EngineError::InvalidRequest` when `stale_after >= evict_after` or the
    /// fetch bound is zero.
    pub fn new(config: CacheConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(ScheduleCache {
            inner: Arc::new(CacheInner {
                entries: RwLock::new(HashMap::new()),
                fetch_permits: Semaphore::new(config.max_concurrent_fetches),
                config,
            }),
        })
    }

    /// Read a cached day schedule.
    ///
    /// Returns the stored list (which may be empty) regardless of staleness.
    /// An entry older than the eviction window is deleted on the spot and
    /// reported as absent.
    pub fn get(&self, key: &CacheKey) -> Option<Vec<LessonInstance>> {
        let evict_after = self.inner.config.evict_after;
        {
            let entries = self.inner.entries.read();
            match entries.get(key) {
                None => return None,
                Some(entry) if entry.written.elapsed() <= evict_after => {
                    return Some(entry.lessons.clone());
                }
                Some(_) => {}
            }
        }
        let mut entries = self.inner.entries.write();
        if let Some(entry) = entries.get(key) {
            if entry.written.elapsed() <= evict_after {
                // Rewritten between dropping the read lock and taking the
                // write lock.
                return Some(entry.lessons.clone());
            }
            log::debug!("evicting {} ({}) on read", key.day, key.view);
            entries.remove(key);
        }
        None
    }

    /// Store a day schedule, including an explicitly empty one. Always
    /// overwrites; the write timestamp restarts both freshness windows.
    pub fn set(&self, key: CacheKey, lessons: Vec<LessonInstance>) {
        self.inner.entries.write().insert(
            key,
            CacheEntry {
                lessons,
                written: Instant::now(),
            },
        );
    }

    /// Store a fetched result unless the entry was rewritten after the fetch
    /// started. Guards abandoned or slow fetches from clobbering a newer
    /// value. Returns whether the value was written.
    pub fn set_if_unchanged_since(
        &self,
        key: &CacheKey,
        lessons: Vec<LessonInstance>,
        fetch_started: Instant,
    ) -> bool {
        let mut entries = self.inner.entries.write();
        if let Some(existing) = entries.get(key) {
            if existing.written > fetch_started {
                log::debug!(
                    "discarding stale fetch result for {} ({})",
                    key.day,
                    key.view
                );
                return false;
            }
        }
        entries.insert(
            key.clone(),
            CacheEntry {
                lessons,
                written: Instant::now(),
            },
        );
        true
    }

    /// Whether the entry is absent or past the staleness window. A stale
    /// entry still serves reads; this only signals that a refresh is due.
    pub fn is_stale(&self, key: &CacheKey) -> bool {
        let entries = self.inner.entries.read();
        match entries.get(key) {
            None => true,
            Some(entry) => entry.written.elapsed() > self.inner.config.stale_after,
        }
    }

    /// Remove one entry.
    pub fn invalidate(&self, key: &CacheKey) {
        self.inner.entries.write().remove(key);
    }

    /// Remove every entry sharing a scope. Called when a lesson in that scope
    /// is edited, so every cached day re-fetches on its next read path.
    pub fn invalidate_scope(&self, scope: ScopeId) {
        let mut entries = self.inner.entries.write();
        let before = entries.len();
        entries.retain(|key, _| key.scope != scope);
        log::debug!(
            "invalidated {} entries for scope {}",
            before - entries.len(),
            scope
        );
    }

    /// Delete every entry older than the eviction window. Returns the number
    /// of entries removed. Lazy eviction on [`get`](Self::get) holds
    /// regardless; this is the explicit sweep form.
    pub fn sweep(&self) -> usize {
        let evict_after = self.inner.config.evict_after;
        let mut entries = self.inner.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.written.elapsed() <= evict_after);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.inner.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.read().is_empty()
    }

    /// Fill the seven daily entries of the week containing `reference`.
    ///
    /// Days whose entry is present and fresh are skipped. The rest are
    /// fetched concurrently, bounded by the cache's fetch permit pool so
    /// overlapping preloads share one bound. A day whose fetch fails is
    /// cached as populated-empty and reported in the returned list; one
    /// day's failure never aborts its siblings. Results of fetches that were
    /// overtaken by a newer `set` are discarded.
    pub async fn preload_week(
        &self,
        scope: ScopeId,
        role: Role,
        view: &str,
        reference: NaiveDate,
        fetcher: &dyn LessonFetcher,
    ) -> Vec<PreloadFailure> {
        let pending: Vec<CacheKey> = week_of(reference)
            .into_iter()
            .map(|day| CacheKey::new(view, day, scope, role))
            .filter(|key| self.is_stale(key))
            .collect();
        log::debug!(
            "preloading {} of 7 days for scope {} around {}",
            pending.len(),
            scope,
            reference
        );

        let fetches = pending.into_iter().map(|key| async move {
            // The semaphore is never closed, so acquisition cannot fail.
            let _permit = self.inner.fetch_permits.acquire().await.ok();
            let started = Instant::now();
            let day = key.day;
            match fetcher.fetch_day(scope, role, day).await {
                Ok(lessons) => {
                    self.set_if_unchanged_since(&key, lessons, started);
                    None
                }
                Err(error) => {
                    log::warn!("fetch for {} failed: {:#}", day, error);
                    self.set_if_unchanged_since(&key, Vec::new(), started);
                    Some(PreloadFailure { day, error })
                }
            }
        });

        join_all(fetches).await.into_iter().flatten().collect()
    }
}
