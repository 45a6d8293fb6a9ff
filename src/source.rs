//! Traits for the external collaborators the engine consumes.
//!
//! The engine exposes no network protocol of its own; day schedules and
//! bell-period configuration come from the caller through these traits,
//! typically backed by a remote lookup. Errors crossing this boundary are
//! opaque `anyhow` errors; the engine does not retry them.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::{Role, ScopeId};
use crate::models::bell::{default_bell_periods, BellPeriod};
use crate::models::lesson::LessonInstance;
use crate::models::time::YearRange;

/// Supplies the lesson instances of one calendar day for a scope and role.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait LessonFetcher: Send + Sync {
    async fn fetch_day(
        &self,
        scope: ScopeId,
        role: Role,
        day: NaiveDate,
    ) -> Result<Vec<LessonInstance>>;
}

/// Supplies the ordered bell-period table configured for a year range.
#[async_trait]
pub trait BellPeriodSource: Send + Sync {
    async fn list_bell_periods(&self, range: &YearRange) -> Result<Vec<BellPeriod>>;
}

/// Fetch the bell table for a year range, substituting the built-in default
/// table when the source has no configuration. A source *error* still
/// propagates; the fallback covers missing data, not a broken backend.
pub async fn bell_periods_or_default(
    source: &dyn BellPeriodSource,
    range: &YearRange,
) -> Result<Vec<BellPeriod>> {
    let periods = source.list_bell_periods(range).await?;
    if periods.is_empty() {
        log::debug!(
            "no bell periods configured for {}..{}, using default table",
            range.start,
            range.end
        );
        return Ok(default_bell_periods().to_vec());
    }
    Ok(periods)
}

/// In-memory [`LessonFetcher`] for unit testing and local development.
///
/// Serves a fixed per-day map, optionally failing for selected days, and
/// counts fetch calls so tests can assert that fresh cache entries are not
/// re-fetched.
#[derive(Default)]
pub struct FixedLessonFetcher {
    days: HashMap<NaiveDate, Vec<LessonInstance>>,
    failing_days: HashSet<NaiveDate>,
    calls: AtomicUsize,
}

impl FixedLessonFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_day(mut self, day: NaiveDate, lessons: Vec<LessonInstance>) -> Self {
        self.days.insert(day, lessons);
        self
    }

    pub fn with_failure(mut self, day: NaiveDate) -> Self {
        self.failing_days.insert(day);
        self
    }

    /// Number of `fetch_day` calls served so far (including failures).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LessonFetcher for FixedLessonFetcher {
    async fn fetch_day(
        &self,
        _scope: ScopeId,
        _role: Role,
        day: NaiveDate,
    ) -> Result<Vec<LessonInstance>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_days.contains(&day) {
            anyhow::bail!("backend unavailable for {}", day);
        }
        Ok(self.days.get(&day).cloned().unwrap_or_default())
    }
}
