//! The schedule grid: a period-by-weekday table of lesson instances used for
//! display.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::models::lesson::LessonInstance;
use crate::models::time::SlotKey;

/// One row of a [`ScheduleGrid`].
///
/// Bell rows carry the period's label and break flag; rows synthesized for
/// lessons whose times match no bell period carry neither (`label == None`,
/// `is_break == false`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRow {
    pub slot: SlotKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub is_break: bool,
    /// One cell per requested weekday, in the grid's weekday order.
    pub cells: Vec<Option<LessonInstance>>,
}

impl GridRow {
    pub(crate) fn with_annotation(
        slot: SlotKey,
        label: Option<String>,
        is_break: bool,
        columns: usize,
    ) -> Self {
        GridRow {
            slot,
            label,
            is_break,
            cells: vec![None; columns],
        }
    }
}

/// A resolved period-by-weekday grid.
///
/// Rows appear in the bell table's chronological order, followed by any
/// synthesized extra rows sorted by start time. Every row has exactly one
/// cell per requested weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleGrid {
    weekdays: Vec<Weekday>,
    rows: Vec<GridRow>,
}

impl ScheduleGrid {
    pub(crate) fn new(weekdays: Vec<Weekday>, rows: Vec<GridRow>) -> Self {
        ScheduleGrid { weekdays, rows }
    }

    /// Column order of the grid.
    pub fn weekdays(&self) -> &[Weekday] {
        &self.weekdays
    }

    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    /// Look up the lesson placed at `(slot, weekday)`, if any.
    pub fn cell(&self, slot: &SlotKey, weekday: Weekday) -> Option<&LessonInstance> {
        let column = self.weekdays.iter().position(|&w| w == weekday)?;
        self.rows
            .iter()
            .find(|row| &row.slot == slot)
            .and_then(|row| row.cells.get(column))
            .and_then(Option::as_ref)
    }

    /// Total number of non-empty cells.
    pub fn lesson_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.cells.iter().filter(|c| c.is_some()).count())
            .sum()
    }
}
