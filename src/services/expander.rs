//! Recurrence expansion: weekly pattern + date range -> concrete lesson
//! instances.

use chrono::Datelike;

use crate::error::EngineResult;
use crate::models::lesson::LessonInstance;
use crate::models::recurrence::RecurrenceRequest;

/// Expand a recurrence request into dated lesson instances.
///
/// Iterates every calendar date from `start_date` to `end_date` inclusive.
/// Dates whose weekday has no enabled schedule entry are skipped; every other
/// date produces exactly one instance combining the date with the entry's
/// wall-clock times. The instance weekday is always recomputed from the date,
/// never taken from caller input.
///
/// Multi-subject requests produce instances carrying only the first subject;
/// the extra subjects exist for teacher-filtering in the create form. The
/// teacher set is copied in full.
///
/// Pure and deterministic: no I/O, identical input yields identical output.
/// The returned vector is the exact payload the caller hands to its
/// bulk-insert storage call.
///
/// # Errors
/// `EngineError::InvalidRequest` when no weekday schedule is enabled, an
/// enabled entry has `start >= end`, the subject or teacher set is empty, or
/// the date range is inverted.
pub fn expand(request: &RecurrenceRequest) -> EngineResult<Vec<LessonInstance>> {
    request.validate()?;

    if request.subjects.len() > 1 {
        log::warn!(
            "recurrence request for class {} carries {} subjects; only {} is persisted on instances",
            request.class_id,
            request.subjects.len(),
            request.subjects[0]
        );
    }
    let subject = request.subjects[0];

    let mut instances = Vec::new();
    let mut date = request.start_date;
    while date <= request.end_date {
        if let Some(entry) = request.schedule_for(date.weekday()) {
            instances.push(LessonInstance {
                id: None,
                date,
                start: date.and_time(entry.start),
                end: date.and_time(entry.end),
                weekday: date.weekday(),
                subject,
                teachers: request.teachers.clone(),
                class_id: request.class_id,
                branch_id: request.branch_id,
                room: request.room.clone(),
                building: request.building.clone(),
                status: request.status,
                topics: Vec::new(),
            });
        }
        let Some(next) = date.succ_opt() else {
            break;
        };
        date = next;
    }

    Ok(instances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AcademicYearId, BranchId, ClassId, SubjectId, TeacherId};
    use crate::error::EngineError;
    use crate::models::lesson::LessonStatus;
    use crate::models::recurrence::WeekdaySchedule;
    use chrono::{NaiveDate, NaiveTime, Weekday};

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request_with_schedules(schedules: Vec<WeekdaySchedule>) -> RecurrenceRequest {
        RecurrenceRequest {
            branch_id: BranchId::new(1),
            class_id: ClassId::new(10),
            academic_year_id: AcademicYearId::new(2024),
            subjects: vec![SubjectId::new(100)],
            teachers: vec![TeacherId::new(200), TeacherId::new(201)],
            start_date: date(2024, 1, 1), // a Monday
            end_date: date(2024, 1, 5),   // the Friday of the same week
            room: "101".to_string(),
            building: Some("Main".to_string()),
            status: LessonStatus::Active,
            weekday_schedules: schedules,
        }
    }

    #[test]
    fn test_expand_monday_wednesday_scenario() {
        let request = request_with_schedules(vec![
            WeekdaySchedule::new(Weekday::Mon, time(9, 0), time(9, 45)),
            WeekdaySchedule::new(Weekday::Wed, time(9, 0), time(9, 45)),
        ]);

        let instances = expand(&request).unwrap();

        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].date, date(2024, 1, 1));
        assert_eq!(instances[1].date, date(2024, 1, 3));
        for instance in &instances {
            assert_eq!(instance.start.time(), time(9, 0));
            assert_eq!(instance.end.time(), time(9, 45));
        }
    }

    #[test]
    fn test_expand_length_matches_enabled_days_in_one_week() {
        let request = request_with_schedules(vec![
            WeekdaySchedule::new(Weekday::Mon, time(8, 0), time(8, 45)),
            WeekdaySchedule::new(Weekday::Tue, time(8, 0), time(8, 45)),
            WeekdaySchedule::new(Weekday::Thu, time(8, 0), time(8, 45)),
        ]);

        let instances = expand(&request).unwrap();
        assert_eq!(instances.len(), 3);
    }

    #[test]
    fn test_expand_is_ordered_ascending_by_date() {
        let mut request = request_with_schedules(vec![
            WeekdaySchedule::new(Weekday::Fri, time(8, 0), time(8, 45)),
            WeekdaySchedule::new(Weekday::Mon, time(8, 0), time(8, 45)),
        ]);
        request.end_date = date(2024, 1, 12);

        let instances = expand(&request).unwrap();
        let dates: Vec<NaiveDate> = instances.iter().map(|i| i.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
        assert_eq!(instances.len(), 4);
    }

    #[test]
    fn test_expand_is_deterministic() {
        let request = request_with_schedules(vec![WeekdaySchedule::new(
            Weekday::Wed,
            time(10, 0),
            time(10, 45),
        )]);

        let first = expand(&request).unwrap();
        let second = expand(&request).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_expand_weekday_recomputed_from_date() {
        let request = request_with_schedules(vec![WeekdaySchedule::new(
            Weekday::Wed,
            time(10, 0),
            time(10, 45),
        )]);

        let instances = expand(&request).unwrap();
        assert_eq!(instances[0].weekday, Weekday::Wed);
        assert_eq!(instances[0].date.weekday(), Weekday::Wed);
    }

    #[test]
    fn test_expand_multi_subject_uses_first() {
        let mut request = request_with_schedules(vec![WeekdaySchedule::new(
            Weekday::Mon,
            time(9, 0),
            time(9, 45),
        )]);
        request.subjects = vec![SubjectId::new(100), SubjectId::new(101)];

        let instances = expand(&request).unwrap();
        assert_eq!(instances[0].subject, SubjectId::new(100));
    }

    #[test]
    fn test_expand_copies_full_teacher_set() {
        let request = request_with_schedules(vec![WeekdaySchedule::new(
            Weekday::Mon,
            time(9, 0),
            time(9, 45),
        )]);

        let instances = expand(&request).unwrap();
        assert_eq!(
            instances[0].teachers,
            vec![TeacherId::new(200), TeacherId::new(201)]
        );
    }

    #[test]
    fn test_expand_rejects_no_enabled_day() {
        let request = request_with_schedules(vec![WeekdaySchedule::disabled(
            Weekday::Mon,
            time(9, 0),
            time(9, 45),
        )]);
        assert!(matches!(
            expand(&request),
            Err(EngineError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_expand_rejects_inverted_times() {
        let request = request_with_schedules(vec![WeekdaySchedule::new(
            Weekday::Mon,
            time(9, 45),
            time(9, 0),
        )]);
        assert!(matches!(
            expand(&request),
            Err(EngineError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_expand_single_day_range() {
        let mut request = request_with_schedules(vec![WeekdaySchedule::new(
            Weekday::Mon,
            time(9, 0),
            time(9, 45),
        )]);
        request.end_date = request.start_date;

        let instances = expand(&request).unwrap();
        assert_eq!(instances.len(), 1);
    }

    #[test]
    fn test_expand_instances_are_pre_persistence() {
        let request = request_with_schedules(vec![WeekdaySchedule::new(
            Weekday::Mon,
            time(9, 0),
            time(9, 45),
        )]);

        let instances = expand(&request).unwrap();
        assert!(instances[0].id.is_none());
        assert!(instances[0].topics.is_empty());
    }
}
