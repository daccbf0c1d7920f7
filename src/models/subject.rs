//! Subject and batch models.
//!
//! A subject is the unit of teaching demand: it needs a number of weekly
//! periods from one faculty member and, at exam time, one sitting for its
//! enrolled students.

use serde::{Deserialize, Serialize};

/// Weekly periods assumed when a subject does not state its own.
pub const DEFAULT_WEEKLY_HOURS: u32 = 3;

/// Enrolment assumed when a subject does not state its own.
pub const DEFAULT_STUDENT_COUNT: u32 = 30;

/// Batch bucket for subjects without a batch id.
pub const UNKNOWN_BATCH: &str = "unknown";

/// A subject to be timetabled and examined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Owning batch.
    #[serde(default)]
    pub batch_id: Option<String>,
    /// Owning department.
    #[serde(default)]
    pub department_id: Option<String>,
    /// Periods required per week. `None` = [`DEFAULT_WEEKLY_HOURS`].
    #[serde(default)]
    pub weekly_hours: Option<u32>,
    /// Faculty member teaching this subject.
    #[serde(default)]
    pub faculty_id: Option<String>,
    /// Expected enrolment. `None` = [`DEFAULT_STUDENT_COUNT`].
    #[serde(default)]
    pub student_count: Option<u32>,
}

impl Subject {
    /// Creates a subject with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            batch_id: None,
            department_id: None,
            weekly_hours: None,
            faculty_id: None,
            student_count: None,
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the batch.
    pub fn with_batch(mut self, batch_id: impl Into<String>) -> Self {
        self.batch_id = Some(batch_id.into());
        self
    }

    /// Sets the department.
    pub fn with_department(mut self, department_id: impl Into<String>) -> Self {
        self.department_id = Some(department_id.into());
        self
    }

    /// Sets the weekly period requirement.
    pub fn with_weekly_hours(mut self, hours: u32) -> Self {
        self.weekly_hours = Some(hours);
        self
    }

    /// Sets the teaching faculty member.
    pub fn with_faculty(mut self, faculty_id: impl Into<String>) -> Self {
        self.faculty_id = Some(faculty_id.into());
        self
    }

    /// Sets the expected enrolment.
    pub fn with_student_count(mut self, count: u32) -> Self {
        self.student_count = Some(count);
        self
    }

    /// Periods this subject needs each week.
    #[inline]
    pub fn required_periods(&self) -> u32 {
        self.weekly_hours.unwrap_or(DEFAULT_WEEKLY_HOURS)
    }

    /// Students expected to sit this subject's exam.
    #[inline]
    pub fn expected_students(&self) -> u32 {
        self.student_count.unwrap_or(DEFAULT_STUDENT_COUNT)
    }

    /// Batch bucket used when grouping exams.
    pub fn batch_key(&self) -> &str {
        self.batch_id.as_deref().unwrap_or(UNKNOWN_BATCH)
    }
}

/// A cohort of students sharing one timetable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    /// Unique batch identifier.
    pub id: String,
    /// Display name (e.g. "CSE 2A").
    pub name: String,
    /// Department whose subjects and faculty serve this batch.
    #[serde(default)]
    pub department_id: Option<String>,
}

impl Batch {
    /// Creates a batch.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department_id: None,
        }
    }

    /// Sets the department.
    pub fn with_department(mut self, department_id: impl Into<String>) -> Self {
        self.department_id = Some(department_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_defaults() {
        let s = Subject::new("S1").with_name("Algorithms");
        assert_eq!(s.required_periods(), 3);
        assert_eq!(s.expected_students(), 30);
        assert_eq!(s.batch_key(), "unknown");
    }

    #[test]
    fn test_subject_builder() {
        let s = Subject::new("S1")
            .with_batch("B1")
            .with_department("CSE")
            .with_weekly_hours(5)
            .with_faculty("F1")
            .with_student_count(64);
        assert_eq!(s.required_periods(), 5);
        assert_eq!(s.expected_students(), 64);
        assert_eq!(s.batch_key(), "B1");
        assert_eq!(s.faculty_id.as_deref(), Some("F1"));
    }

    #[test]
    fn test_subject_deserialize_sparse() {
        let s: Subject = serde_json::from_str(r#"{ "id": "S9", "name": "Physics" }"#).unwrap();
        assert_eq!(s.required_periods(), DEFAULT_WEEKLY_HOURS);
        assert!(s.faculty_id.is_none());
    }
}
