//! Bell-grid resolution: place a day's lesson instances into the fixed bell
//! schedule to produce a period-by-weekday grid.

use std::collections::HashMap;

use chrono::{NaiveTime, Weekday};

use crate::error::{EngineError, EngineResult};
use crate::models::bell::BellPeriod;
use crate::models::grid::{GridRow, ScheduleGrid};
use crate::models::lesson::LessonInstance;
use crate::models::time::SlotKey;

/// Resolve lesson instances against a bell table.
///
/// Bell periods are sorted by start time (stable on ties) and contribute one
/// row each, in chronological order. Instances whose `(start, end)` pair
/// matches no bell period are bucketed into extra rows appended after the
/// bell rows, sorted ascending by start and de-duplicated by identical
/// `(start, end)` pair; extra rows carry no label or break flag.
///
/// Each instance's weekday is recomputed from its own date; instances whose
/// weekday is not among the requested `weekdays` have no column and are
/// skipped. When two instances resolve to the same cell, the last one
/// processed wins; the collision is not reported.
///
/// Pure and deterministic. An empty `instances` list yields a valid grid
/// with the no-lesson state everywhere.
///
/// # Errors
/// `EngineError::InvalidInput` when `periods` is empty while `instances` is
/// non-empty (no row exists to host any instance).
pub fn resolve(
    periods: &[BellPeriod],
    instances: &[LessonInstance],
    weekdays: &[Weekday],
) -> EngineResult<ScheduleGrid> {
    if periods.is_empty() && !instances.is_empty() {
        return Err(EngineError::invalid_input(
            "no bell periods supplied for a non-empty instance list",
        ));
    }

    let mut sorted_periods: Vec<&BellPeriod> = periods.iter().collect();
    sorted_periods.sort_by_key(|p| p.start);

    let mut rows: Vec<GridRow> = Vec::with_capacity(sorted_periods.len());
    let mut row_index: HashMap<SlotKey, usize> = HashMap::new();
    for period in &sorted_periods {
        let key = period.slot_key();
        row_index.entry(key.clone()).or_insert(rows.len());
        rows.push(GridRow::with_annotation(
            key,
            Some(period.label.clone()),
            period.is_break,
            weekdays.len(),
        ));
    }

    // Distinct (start, end) pairs that match no bell period become extra
    // rows after the bell rows.
    let mut extra_pairs: Vec<(NaiveTime, NaiveTime)> = instances
        .iter()
        .map(|i| (i.start.time(), i.end.time()))
        .filter(|&(start, end)| !row_index.contains_key(&SlotKey::new(start, end)))
        .collect();
    extra_pairs.sort();
    extra_pairs.dedup();
    for (start, end) in extra_pairs {
        let key = SlotKey::new(start, end);
        row_index.entry(key.clone()).or_insert(rows.len());
        rows.push(GridRow::with_annotation(key, None, false, weekdays.len()));
    }

    let column_index: HashMap<Weekday, usize> = weekdays
        .iter()
        .enumerate()
        .map(|(i, &w)| (w, i))
        .collect();

    for instance in instances {
        let Some(&column) = column_index.get(&instance.effective_weekday()) else {
            continue;
        };
        let key = SlotKey::new(instance.start.time(), instance.end.time());
        if let Some(&row) = row_index.get(&key) {
            rows[row].cells[column] = Some(instance.clone());
        }
    }

    Ok(ScheduleGrid::new(weekdays.to_vec(), rows))
}
