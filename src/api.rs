//! Public API surface for the timetable engine.
//!
//! This file consolidates the identifier newtypes used across the data model
//! and re-exports the main domain types so callers can use a single import
//! path. All types derive Serialize/Deserialize for JSON serialization.

pub use crate::models::bell::{default_bell_periods, BellPeriod};
pub use crate::models::grid::{GridRow, ScheduleGrid};
pub use crate::models::lesson::{LessonInstance, LessonStatus, TopicRecord};
pub use crate::models::recurrence::{RecurrenceRequest, WeekdaySchedule};
pub use crate::models::time::{SlotKey, YearRange};

use crate::define_id_type;

define_id_type!(i64, BranchId);
define_id_type!(i64, ClassId);
define_id_type!(
    /// Subject reference carried on lesson instances. Multi-subject
    /// recurrence requests persist only their first subject.
    i64, SubjectId
);
define_id_type!(i64, TeacherId);
define_id_type!(i64, AcademicYearId);
define_id_type!(
    /// Synthetic or persisted lesson-instance identifier; absent on
    /// instances fresh out of recurrence expansion.
    i64, LessonId
);
define_id_type!(
    /// Identifier of the scope a cached schedule view belongs to (the
    /// branch, class, or teacher dimension the view is keyed by). Editing
    /// any lesson in a scope invalidates every cached day for that scope.
    i64, ScopeId
);

/// Role under which a schedule view is requested.
///
/// Part of the cache key: a teacher's view of a day and a student's view of
/// the same day are cached independently (the backing fetch is scoped
/// differently for each).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
    Admin,
}
