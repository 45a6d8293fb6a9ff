use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Key identifying one time slot in a schedule grid, formatted `HH:MM-HH:MM`.
///
/// Derived either from a bell period's start-end pair or, for lessons whose
/// times match no bell period, from the lesson's own start-end pair. Keys are
/// zero-padded, so lexicographic order equals chronological order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotKey(String);

impl SlotKey {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        SlotKey(format!(
            "{}-{}",
            start.format("%H:%M"),
            end.format("%H:%M")
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inclusive date range covering an academic year (or a slice of one).
///
/// Used to scope bell-period configuration lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl YearRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        YearRange { start, end }
    }
}

/// The seven calendar days of the Monday-based week containing `reference`.
pub fn week_of(reference: NaiveDate) -> [NaiveDate; 7] {
    let offset = u64::from(reference.weekday().num_days_from_monday());
    let monday = reference - Days::new(offset);
    std::array::from_fn(|i| monday + Days::new(i as u64))
}

/// The standard Monday-to-Friday school week, in display order.
pub fn school_week() -> [Weekday; 5] {
    [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ]
}
