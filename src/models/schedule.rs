//! Weekly schedule (solution) model.
//!
//! A weekly schedule assigns subject periods to `(day, period)` cells. It
//! carries the units that could not be placed and any constraint violations,
//! so a partial result is never silent.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{ScheduleSlotRecord, WeeklySlot};

/// Faculty name used when a subject's faculty is not in the input.
pub const UNKNOWN_FACULTY: &str = "Unknown";

/// One taught period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassAssignment {
    /// Day index (0-based).
    pub day: usize,
    /// Period index (0-based).
    pub period: usize,
    pub subject_id: String,
    pub subject_name: String,
    /// `None` when the subject's faculty could not be resolved.
    pub faculty_id: Option<String>,
    pub faculty_name: String,
}

impl ClassAssignment {
    /// The cell this period occupies.
    #[inline]
    pub fn slot(&self) -> WeeklySlot {
        WeeklySlot::new(self.day, self.period)
    }
}

/// Required periods of one subject that did not make it into the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnplacedUnit {
    pub subject_id: String,
    pub subject_name: String,
    /// Periods of the subject left out for `reason`.
    pub count: usize,
    pub reason: String,
}

/// Why the optimizer stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The full generation budget ran.
    #[default]
    Generations,
    /// The wall-clock budget ran out first.
    TimeLimit,
}

/// A constraint violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity ID (subject, faculty, hall).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
    /// Severity (0-100, higher = worse).
    pub severity: i32,
}

/// Classification of constraint violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// One faculty member in two places in the same slot.
    FacultyDoubleBooked,
    /// Two periods of one batch in the same slot.
    BatchClash,
    /// Demand exceeded the slot space; some units were left out.
    CapacityOverflow,
    /// No suitable hall was free for an exam.
    HallUnavailable,
    /// No invigilator was free for an exam.
    InvigilatorUnavailable,
    /// Domain-specific violation.
    Custom(String),
}

impl Violation {
    /// Creates a capacity overflow violation.
    pub fn capacity_overflow(entity_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::CapacityOverflow,
            entity_id: entity_id.into(),
            message: message.into(),
            severity: 90,
        }
    }

    /// Creates a hall-unavailable violation.
    pub fn hall_unavailable(subject_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::HallUnavailable,
            entity_id: subject_id.into(),
            message: message.into(),
            severity: 60,
        }
    }

    /// Creates an invigilator-unavailable violation.
    pub fn invigilator_unavailable(
        subject_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type: ViolationType::InvigilatorUnavailable,
            entity_id: subject_id.into(),
            message: message.into(),
            severity: 50,
        }
    }

    /// Creates a faculty double-booking violation.
    pub fn faculty_double_booked(
        faculty_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type: ViolationType::FacultyDoubleBooked,
            entity_id: faculty_id.into(),
            message: message.into(),
            severity: 95,
        }
    }
}

/// A weekly timetable for one batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklySchedule {
    /// Taught periods.
    pub entries: Vec<ClassAssignment>,
    /// Required periods left out.
    pub unplaced: Vec<UnplacedUnit>,
    /// Constraint violations detected in this schedule.
    pub violations: Vec<Violation>,
    /// Fitness of the returned individual (higher = better).
    pub fitness: f64,
    /// Generations actually run.
    pub generations: usize,
    /// Why the search stopped.
    pub termination: Termination,
}

impl WeeklySchedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every unit was placed without violations.
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty() && self.violations.is_empty()
    }

    /// Number of required periods left out.
    pub fn unplaced_periods(&self) -> usize {
        self.unplaced.iter().map(|u| u.count).sum()
    }

    /// Number of taught periods.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Entries on a day, ordered by period.
    pub fn entries_on_day(&self, day: usize) -> Vec<&ClassAssignment> {
        let mut on_day: Vec<&ClassAssignment> =
            self.entries.iter().filter(|e| e.day == day).collect();
        on_day.sort_by_key(|e| e.period);
        on_day
    }

    /// Entries taught by a faculty member.
    pub fn entries_for_faculty(&self, faculty_id: &str) -> Vec<&ClassAssignment> {
        self.entries
            .iter()
            .filter(|e| e.faculty_id.as_deref() == Some(faculty_id))
            .collect()
    }

    /// Periods per day for a `days`-day week (days without periods count 0).
    pub fn daily_loads(&self, days: usize) -> Vec<usize> {
        let mut loads = vec![0; days];
        for e in &self.entries {
            if let Some(load) = loads.get_mut(e.day) {
                *load += 1;
            }
        }
        loads
    }

    /// `(slot, faculty_id)` pairs booked more than once.
    pub fn faculty_conflicts(&self) -> Vec<(WeeklySlot, String)> {
        let mut counts: HashMap<(WeeklySlot, &str), usize> = HashMap::new();
        for e in &self.entries {
            if let Some(fid) = e.faculty_id.as_deref() {
                *counts.entry((e.slot(), fid)).or_insert(0) += 1;
            }
        }
        let mut conflicts: Vec<(WeeklySlot, String)> = counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|((slot, fid), _)| (slot, fid.to_string()))
            .collect();
        conflicts.sort();
        conflicts
    }

    /// Slots holding more than one period of the batch.
    pub fn batch_clashes(&self) -> Vec<WeeklySlot> {
        let mut counts: HashMap<WeeklySlot, usize> = HashMap::new();
        for e in &self.entries {
            *counts.entry(e.slot()).or_insert(0) += 1;
        }
        let mut clashes: Vec<WeeklySlot> = counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(slot, _)| slot)
            .collect();
        clashes.sort();
        clashes
    }

    /// Renders the schedule as stored slot records.
    ///
    /// `labels[period]` gives the time-slot string; missing labels fall back
    /// to `Period <n>`.
    pub fn to_slot_records(&self, class_name: &str, labels: &[String]) -> Vec<ScheduleSlotRecord> {
        let mut entries: Vec<&ClassAssignment> = self.entries.iter().collect();
        entries.sort_by_key(|e| (e.day, e.period));
        entries
            .into_iter()
            .map(|e| ScheduleSlotRecord {
                id: format!("{class_name}-{}-{}", e.day, e.period),
                day: e.slot().day_name(),
                time_slot: labels
                    .get(e.period)
                    .cloned()
                    .unwrap_or_else(|| format!("Period {}", e.period + 1)),
                faculty_id: e.faculty_id.clone(),
                class_name: Some(class_name.to_string()),
                subject_name: Some(e.subject_name.clone()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: usize, period: usize, subject: &str, faculty: Option<&str>) -> ClassAssignment {
        ClassAssignment {
            day,
            period,
            subject_id: subject.into(),
            subject_name: format!("{subject} name"),
            faculty_id: faculty.map(String::from),
            faculty_name: faculty.unwrap_or(UNKNOWN_FACULTY).into(),
        }
    }

    fn sample_schedule() -> WeeklySchedule {
        let mut s = WeeklySchedule::new();
        s.entries = vec![
            entry(0, 2, "S1", Some("F1")),
            entry(0, 0, "S2", Some("F2")),
            entry(1, 0, "S1", Some("F1")),
            entry(3, 4, "S3", None),
        ];
        s
    }

    #[test]
    fn test_daily_loads_include_empty_days() {
        let s = sample_schedule();
        assert_eq!(s.daily_loads(5), vec![2, 1, 0, 1, 0]);
    }

    #[test]
    fn test_entries_on_day_sorted() {
        let s = sample_schedule();
        let monday = s.entries_on_day(0);
        assert_eq!(monday.len(), 2);
        assert_eq!(monday[0].period, 0);
        assert_eq!(monday[1].period, 2);
    }

    #[test]
    fn test_entries_for_faculty() {
        let s = sample_schedule();
        assert_eq!(s.entries_for_faculty("F1").len(), 2);
        assert!(s.entries_for_faculty("F9").is_empty());
    }

    #[test]
    fn test_conflict_queries() {
        let mut s = sample_schedule();
        assert!(s.faculty_conflicts().is_empty());
        assert!(s.batch_clashes().is_empty());

        s.entries.push(entry(0, 2, "S4", Some("F1")));
        assert_eq!(
            s.faculty_conflicts(),
            vec![(WeeklySlot::new(0, 2), "F1".to_string())]
        );
        assert_eq!(s.batch_clashes(), vec![WeeklySlot::new(0, 2)]);
    }

    #[test]
    fn test_unknown_faculty_never_conflicts() {
        let mut s = WeeklySchedule::new();
        s.entries = vec![entry(2, 2, "S1", None), entry(2, 2, "S2", None)];
        assert!(s.faculty_conflicts().is_empty());
        assert_eq!(s.batch_clashes().len(), 1);
    }

    #[test]
    fn test_to_slot_records() {
        let s = sample_schedule();
        let labels = vec!["09:00-10:00".to_string(), "10:00-11:00".to_string()];
        let records = s.to_slot_records("CSE-2A", &labels);
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].day, "Monday");
        assert_eq!(records[0].time_slot, "09:00-10:00");
        assert_eq!(records[1].time_slot, "Period 3");
        assert_eq!(records[2].day, "Tuesday");
        assert_eq!(records[3].faculty_id, None);
        assert_eq!(records[0].class_name.as_deref(), Some("CSE-2A"));
    }

    #[test]
    fn test_is_complete() {
        let mut s = sample_schedule();
        assert!(s.is_complete());
        s.unplaced.push(UnplacedUnit {
            subject_id: "S5".into(),
            subject_name: "Overflow".into(),
            count: 2,
            reason: "no slot".into(),
        });
        assert!(!s.is_complete());
        assert_eq!(s.unplaced_periods(), 2);
    }
}
