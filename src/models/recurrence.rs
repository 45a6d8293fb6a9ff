//! Recurrence pattern types: the weekly day/time pattern and the request
//! that the expander consumes.

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::api::{AcademicYearId, BranchId, ClassId, SubjectId, TeacherId};
use crate::error::{EngineError, EngineResult};
use crate::models::lesson::LessonStatus;

/// One enabled day-of-week plus a start and end wall-clock time (no date).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdaySchedule {
    pub weekday: Weekday,
    pub enabled: bool,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl WeekdaySchedule {
    pub fn new(weekday: Weekday, start: NaiveTime, end: NaiveTime) -> Self {
        WeekdaySchedule {
            weekday,
            enabled: true,
            start,
            end,
        }
    }

    /// The same entry, disabled. Disabled entries are carried in the request
    /// but never produce lesson instances.
    pub fn disabled(weekday: Weekday, start: NaiveTime, end: NaiveTime) -> Self {
        WeekdaySchedule {
            enabled: false,
            ..Self::new(weekday, start, end)
        }
    }
}

/// A weekly pattern plus a date range describing repeating lessons to
/// generate.
///
/// Immutable once submitted; the expander consumes it by reference and never
/// mutates it. Entity references arrive already validated by the surrounding
/// application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceRequest {
    pub branch_id: BranchId,
    pub class_id: ClassId,
    pub academic_year_id: AcademicYearId,
    /// Ordered, non-empty. Only the first subject is carried on expanded
    /// instances; the rest exist for teacher-filtering in the create form.
    pub subjects: Vec<SubjectId>,
    /// Non-empty; copied in full onto every expanded instance.
    pub teachers: Vec<TeacherId>,
    /// Inclusive.
    pub start_date: NaiveDate,
    /// Inclusive; must not precede `start_date`.
    pub end_date: NaiveDate,
    pub room: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    pub status: LessonStatus,
    /// Ordered; at least one entry must be enabled.
    pub weekday_schedules: Vec<WeekdaySchedule>,
}

impl RecurrenceRequest {
    /// Check the request invariants the expander relies on.
    ///
    /// # Returns
    /// * `Ok(())` - The request is well-formed
    /// * `Err(EngineError::InvalidRequest)` - Naming the offending field
    pub fn validate(&self) -> EngineResult<()> {
        if self.end_date < self.start_date {
            return Err(EngineError::invalid_request(format!(
                "end_date {} precedes start_date {}",
                self.end_date, self.start_date
            )));
        }
        if self.subjects.is_empty() {
            return Err(EngineError::invalid_request("subject set is empty"));
        }
        if self.teachers.is_empty() {
            return Err(EngineError::invalid_request("teacher set is empty"));
        }
        if !self.weekday_schedules.iter().any(|s| s.enabled) {
            return Err(EngineError::invalid_request(
                "no enabled weekday schedule",
            ));
        }
        for schedule in self.weekday_schedules.iter().filter(|s| s.enabled) {
            if schedule.start >= schedule.end {
                return Err(EngineError::invalid_request(format!(
                    "schedule for {} has start {} >= end {}",
                    schedule.weekday, schedule.start, schedule.end
                )));
            }
        }
        Ok(())
    }

    /// First enabled schedule entry for the given weekday, if any.
    pub fn schedule_for(&self, weekday: Weekday) -> Option<&WeekdaySchedule> {
        self.weekday_schedules
            .iter()
            .find(|s| s.enabled && s.weekday == weekday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn minimal_request() -> RecurrenceRequest {
        RecurrenceRequest {
            branch_id: BranchId::new(1),
            class_id: ClassId::new(10),
            academic_year_id: AcademicYearId::new(2024),
            subjects: vec![SubjectId::new(100)],
            teachers: vec![TeacherId::new(200)],
            start_date: date(2024, 1, 1),
            end_date: date(2024, 1, 5),
            room: "101".to_string(),
            building: None,
            status: LessonStatus::Active,
            weekday_schedules: vec![WeekdaySchedule::new(
                Weekday::Mon,
                time(9, 0),
                time(9, 45),
            )],
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(minimal_request().validate().is_ok());
    }

    #[test]
    fn test_inverted_date_range_rejected() {
        let mut request = minimal_request();
        request.end_date = date(2023, 12, 31);
        let err = request.validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidRequest(_)));
    }

    #[test]
    fn test_empty_subjects_rejected() {
        let mut request = minimal_request();
        request.subjects.clear();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_empty_teachers_rejected() {
        let mut request = minimal_request();
        request.teachers.clear();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_no_enabled_day_rejected() {
        let mut request = minimal_request();
        request.weekday_schedules =
            vec![WeekdaySchedule::disabled(Weekday::Mon, time(9, 0), time(9, 45))];
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_inverted_time_range_rejected() {
        let mut request = minimal_request();
        request.weekday_schedules =
            vec![WeekdaySchedule::new(Weekday::Mon, time(9, 45), time(9, 0))];
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_disabled_inverted_entry_is_ignored() {
        let mut request = minimal_request();
        request
            .weekday_schedules
            .push(WeekdaySchedule::disabled(Weekday::Tue, time(9, 45), time(9, 0)));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_schedule_for_skips_disabled_entries() {
        let mut request = minimal_request();
        request.weekday_schedules.insert(
            0,
            WeekdaySchedule::disabled(Weekday::Mon, time(7, 0), time(7, 45)),
        );
        let found = request.schedule_for(Weekday::Mon).unwrap();
        assert_eq!(found.start, time(9, 0));
        assert!(request.schedule_for(Weekday::Fri).is_none());
    }
}
