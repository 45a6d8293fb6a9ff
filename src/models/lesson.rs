//! The lesson instance: one concrete, dated occurrence of a lesson.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::api::{BranchId, ClassId, LessonId, SubjectId, TeacherId};

/// Status flag carried by requests and instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonStatus {
    Active,
    Inactive,
}

/// One topic record attached to a lesson. The payload is opaque to this
/// engine; it is carried through unmodified for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicRecord {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

/// One concrete, dated occurrence of a lesson.
///
/// Created by recurrence expansion (ephemeral, `id == None`) or returned by
/// storage (`id == Some`); the engine treats both forms identically. Never
/// mutated in place — an edit produces a new instance value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonInstance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<LessonId>,
    pub date: NaiveDate,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Denormalization hint only. Consumers recompute the weekday from
    /// `date`; a stored day string can drift from the actual calendar date.
    pub weekday: Weekday,
    pub subject: SubjectId,
    /// Non-empty.
    pub teachers: Vec<TeacherId>,
    pub class_id: ClassId,
    pub branch_id: BranchId,
    pub room: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    pub status: LessonStatus,
    /// Ordered, possibly empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<TopicRecord>,
}

impl LessonInstance {
    /// The authoritative weekday, recomputed from the instance date.
    pub fn effective_weekday(&self) -> Weekday {
        self.date.weekday()
    }
}
