//! Exam configuration and exam timetable models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ExamSession, ExamSlot, Violation};
use crate::error::{EngineError, Result};

/// Placeholder shown for an unassigned hall or invigilator.
pub const TBD: &str = "TBD";

/// Kind of examination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamType {
    Internal,
    Model,
    Semester,
}

/// An exam window to be timetabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub exam_type: Option<ExamType>,
    /// First exam date (inclusive).
    pub start_date: NaiveDate,
    /// Last exam date (inclusive).
    pub end_date: NaiveDate,
}

impl ExamConfig {
    /// Creates an exam configuration.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            exam_type: None,
            start_date,
            end_date,
        }
    }

    /// Creates an exam configuration from ISO `YYYY-MM-DD` dates.
    pub fn parse(
        id: impl Into<String>,
        name: impl Into<String>,
        start_date: &str,
        end_date: &str,
    ) -> Result<Self> {
        Ok(Self::new(
            id,
            name,
            parse_iso_date(start_date)?,
            parse_iso_date(end_date)?,
        ))
    }

    /// Sets the exam type.
    pub fn with_exam_type(mut self, exam_type: ExamType) -> Self {
        self.exam_type = Some(exam_type);
        self
    }

    /// Finds a configuration by id.
    pub fn find<'a>(configs: &'a [ExamConfig], id: &str) -> Result<&'a ExamConfig> {
        configs
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| EngineError::not_found("exam", id))
    }
}

/// Parses an ISO `YYYY-MM-DD` date.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| EngineError::InvalidInput(format!("bad date '{value}': {e}")))
}

/// One scheduled exam sitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamAssignment {
    pub exam_id: String,
    pub subject_id: String,
    pub subject_name: String,
    pub batch_id: String,
    pub exam_date: NaiveDate,
    pub session: ExamSession,
    /// `None` = no suitable hall (shown as "TBD").
    pub hall_id: Option<String>,
    pub hall_name: String,
    /// `None` = no free invigilator (shown as "TBD").
    pub invigilator_id: Option<String>,
    pub invigilator_name: String,
}

impl ExamAssignment {
    /// The slot this sitting occupies.
    #[inline]
    pub fn slot(&self) -> ExamSlot {
        ExamSlot::new(self.exam_date, self.session)
    }
}

/// A subject that found no exam slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnscheduledExam {
    pub subject_id: String,
    pub subject_name: String,
    pub batch_id: String,
    pub reason: String,
}

/// Exam timetable for one exam configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExamTimetable {
    /// Scheduled sittings, batch by batch.
    pub entries: Vec<ExamAssignment>,
    /// Subjects left without a slot.
    pub unscheduled: Vec<UnscheduledExam>,
    /// Hall / invigilator shortfalls and overflow.
    pub violations: Vec<Violation>,
    /// Exam slots generated for the window.
    pub slot_count: usize,
}

impl ExamTimetable {
    /// Whether every subject got a slot, a hall and an invigilator.
    pub fn is_complete(&self) -> bool {
        self.unscheduled.is_empty() && self.violations.is_empty()
    }

    /// Sittings of one batch.
    pub fn entries_for_batch(&self, batch_id: &str) -> Vec<&ExamAssignment> {
        self.entries
            .iter()
            .filter(|e| e.batch_id == batch_id)
            .collect()
    }

    /// Sittings in one slot, across batches.
    pub fn entries_in_slot(&self, slot: ExamSlot) -> Vec<&ExamAssignment> {
        self.entries.iter().filter(|e| e.slot() == slot).collect()
    }

    /// Invigilation duties per faculty member.
    pub fn invigilation_load(&self, faculty_id: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| e.invigilator_id.as_deref() == Some(faculty_id))
            .count()
    }
}
