//! Substitute ranker.
//!
//! # Algorithm
//!
//! For each faculty member (except the absent one):
//! 1. Busy if a same-day timetable record has them teaching at the target
//!    time slot ("Regular class: <class>").
//! 2. With `strict_substitution_time_check`, also busy if one of their
//!    substitution duties on that date covers the target time slot
//!    ("Substitution duty: <class>"). The duty's time slot comes from the
//!    covered timetable record, else from the duty record itself.
//! 3. Workload = same-day timetable records + same-date substitution duties.
//!
//! Candidates are then stable-sorted by (busy, workload): free before busy,
//! lighter before heavier, input order among equals.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::SubstituteConfig;
use crate::models::{
    time_slots_match, Faculty, ScheduleSlotRecord, SubstituteCandidate, SubstituteRequest,
    SubstitutionRecord,
};

/// Department shown for faculty without one.
const UNKNOWN_DEPARTMENT: &str = "Unknown";

/// Ranks faculty members as substitutes for a vacated slot.
///
/// # Example
/// ```
/// use u_timetable::config::SubstituteConfig;
/// use u_timetable::models::{Faculty, ScheduleSlotRecord, SubstituteRequest};
/// use u_timetable::substitute::SubstituteRanker;
///
/// let faculty = vec![Faculty::new("A", "Dr. Rao"), Faculty::new("B", "Dr. Iyer")];
/// let slots = vec![ScheduleSlotRecord::new("r1", "Monday", "09:30 - 10:30")
///     .with_faculty("A")
///     .with_class("CSE-A")];
///
/// let ranked = SubstituteRanker::new(SubstituteConfig::default())
///     .rank(&faculty, &slots, &[], &SubstituteRequest::new("09:30 - 10:30"));
/// assert_eq!(ranked[0].faculty_id, "B");
/// assert!(!ranked[1].is_free);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SubstituteRanker {
    config: SubstituteConfig,
}

impl SubstituteRanker {
    /// Creates a ranker.
    pub fn new(config: SubstituteConfig) -> Self {
        Self { config }
    }

    /// Ranker settings.
    pub fn config(&self) -> &SubstituteConfig {
        &self.config
    }

    /// Ranks `faculty` for `request`.
    ///
    /// `slots_on_day` and `substitutions_on_date` are expected to be already
    /// narrowed to the request's day and date; when the request names a day
    /// or date, records for other days or dates are ignored as well.
    ///
    /// Never fails: an empty faculty list gives an empty ranking.
    pub fn rank(
        &self,
        faculty: &[Faculty],
        slots_on_day: &[ScheduleSlotRecord],
        substitutions_on_date: &[SubstitutionRecord],
        request: &SubstituteRequest,
    ) -> Vec<SubstituteCandidate> {
        info!(
            faculty = faculty.len(),
            slots = slots_on_day.len(),
            substitutions = substitutions_on_date.len(),
            time_slot = %request.time_slot,
            "ranking substitutes"
        );

        let slots: Vec<&ScheduleSlotRecord> = slots_on_day
            .iter()
            .filter(|s| request.day.as_deref().map_or(true, |day| s.day == day))
            .collect();
        let duties: Vec<&SubstitutionRecord> = substitutions_on_date
            .iter()
            .filter(|d| request.date.map_or(true, |date| d.date == date))
            .collect();
        let slots_by_id: HashMap<&str, &ScheduleSlotRecord> =
            slots.iter().map(|s| (s.id.as_str(), *s)).collect();

        let mut candidates: Vec<SubstituteCandidate> = faculty
            .iter()
            .filter(|f| request.absent_faculty_id.as_deref() != Some(f.id.as_str()))
            .map(|f| {
                let own_slots: Vec<&&ScheduleSlotRecord> = slots
                    .iter()
                    .filter(|s| s.faculty_id.as_deref() == Some(f.id.as_str()))
                    .collect();
                let own_duties: Vec<&&SubstitutionRecord> = duties
                    .iter()
                    .filter(|d| d.substitute_faculty_id.as_deref() == Some(f.id.as_str()))
                    .collect();

                let mut conflict_reason = own_slots
                    .iter()
                    .find(|s| time_slots_match(&s.time_slot, &request.time_slot))
                    .map(|s| format!("Regular class: {}", s.class_name.as_deref().unwrap_or("")));

                if conflict_reason.is_none() && self.config.strict_substitution_time_check {
                    conflict_reason = own_duties.iter().find_map(|d| {
                        let covered = slots_by_id.get(d.schedule_slot_id.as_str());
                        let time_slot = covered
                            .map(|s| s.time_slot.as_str())
                            .or(d.time_slot.as_deref())?;
                        time_slots_match(time_slot, &request.time_slot).then(|| {
                            let class = covered.and_then(|s| s.class_name.as_deref()).unwrap_or("");
                            format!("Substitution duty: {class}")
                        })
                    });
                }

                SubstituteCandidate {
                    faculty_id: f.id.clone(),
                    faculty_name: f.name.clone(),
                    department: f
                        .department_id
                        .clone()
                        .unwrap_or_else(|| UNKNOWN_DEPARTMENT.to_string()),
                    workload_score: own_slots.len() + own_duties.len(),
                    is_free: conflict_reason.is_none(),
                    conflict_reason,
                }
            })
            .collect();

        candidates.sort_by_key(|c| (!c.is_free, c.workload_score));
        if let Some(limit) = self.config.max_candidates {
            candidates.truncate(limit);
        }

        debug!(
            free = candidates.iter().filter(|c| c.is_free).count(),
            returned = candidates.len(),
            "substitutes ranked"
        );
        candidates
    }
}
