//! Substitution models: existing timetable records, substitution duties,
//! and ranked substitute candidates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored weekly timetable cell, as the ranker sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSlotRecord {
    pub id: String,
    /// Day name (e.g. "Monday").
    pub day: String,
    /// Free-form time-slot label (e.g. "09:30 - 10:30").
    pub time_slot: String,
    #[serde(default)]
    pub faculty_id: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub subject_name: Option<String>,
}

impl ScheduleSlotRecord {
    /// Creates a record.
    pub fn new(
        id: impl Into<String>,
        day: impl Into<String>,
        time_slot: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            day: day.into(),
            time_slot: time_slot.into(),
            faculty_id: None,
            class_name: None,
            subject_name: None,
        }
    }

    /// Sets the teaching faculty member.
    pub fn with_faculty(mut self, faculty_id: impl Into<String>) -> Self {
        self.faculty_id = Some(faculty_id.into());
        self
    }

    /// Sets the class name.
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }
}

/// A substitution duty already recorded for a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubstitutionRecord {
    pub id: String,
    /// The timetable cell being covered.
    pub schedule_slot_id: String,
    #[serde(default)]
    pub substitute_faculty_id: Option<String>,
    pub date: NaiveDate,
    /// Time slot of the covered cell, when the caller already joined it.
    #[serde(default)]
    pub time_slot: Option<String>,
}

impl SubstitutionRecord {
    /// Creates a record.
    pub fn new(
        id: impl Into<String>,
        schedule_slot_id: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            schedule_slot_id: schedule_slot_id.into(),
            substitute_faculty_id: None,
            date,
            time_slot: None,
        }
    }

    /// Sets the substitute.
    pub fn with_substitute(mut self, faculty_id: impl Into<String>) -> Self {
        self.substitute_faculty_id = Some(faculty_id.into());
        self
    }

    /// Sets the covered time slot.
    pub fn with_time_slot(mut self, time_slot: impl Into<String>) -> Self {
        self.time_slot = Some(time_slot.into());
        self
    }
}

/// The vacated slot a substitute is wanted for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubstituteRequest {
    /// Time-slot label, compared exactly.
    pub time_slot: String,
    /// Day name the slot falls on.
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Faculty member on leave; never recommended.
    #[serde(default)]
    pub absent_faculty_id: Option<String>,
}

impl SubstituteRequest {
    /// Creates a request for a time slot.
    pub fn new(time_slot: impl Into<String>) -> Self {
        Self {
            time_slot: time_slot.into(),
            day: None,
            date: None,
            absent_faculty_id: None,
        }
    }

    /// Sets the day and date.
    pub fn on(mut self, day: impl Into<String>, date: NaiveDate) -> Self {
        self.day = Some(day.into());
        self.date = Some(date);
        self
    }

    /// Excludes the absent faculty member.
    pub fn excluding(mut self, faculty_id: impl Into<String>) -> Self {
        self.absent_faculty_id = Some(faculty_id.into());
        self
    }
}

/// A ranked substitute recommendation. Derived per request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstituteCandidate {
    pub faculty_id: String,
    pub faculty_name: String,
    /// Department id, or "Unknown".
    pub department: String,
    /// Same-day commitments: regular periods plus substitution duties.
    pub workload_score: usize,
    pub is_free: bool,
    /// Why the candidate is busy; `None` when free.
    pub conflict_reason: Option<String>,
}
