//! Exam slot assigner.
//!
//! # Algorithm
//!
//! 1. Enumerate exam slots for the window (no Sundays; Morning, Afternoon).
//! 2. Group subjects by batch, in first-appearance order.
//! 3. Per batch: shuffle the subjects, pick a spacing `step` (2 when the
//!    window has at least two slots per subject, else 1) and walk the slot
//!    list with that step, one subject per reachable slot. Subjects past the
//!    end of the list are reported as unscheduled.
//! 4. Per sitting: a random hall that seats the subject's students and is
//!    free in that slot, and a random invigilator free in that slot.
//!
//! Batches may share a slot (they are disjoint student populations) but
//! never a hall or an invigilator within it.

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::ExamAssignerConfig;
use crate::error::{EngineError, Result};
use crate::models::{
    exam_slots, ExamAssignment, ExamConfig, ExamSlot, ExamTimetable, Faculty, Hall,
    SlotOccupancy, Subject, UnscheduledExam, Violation, TBD,
};

/// Places exam sittings into (date, session) slots.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_timetable::config::ExamAssignerConfig;
/// use u_timetable::exam::ExamSlotAssigner;
/// use u_timetable::models::{ExamConfig, Faculty, Hall, Subject};
///
/// let exam = ExamConfig::parse("E1", "Internal 1", "2024-01-01", "2024-01-07").unwrap();
/// let subjects = vec![Subject::new("S1").with_batch("B1").with_student_count(40)];
/// let halls = vec![Hall::new("H1", "Main", 60)];
/// let faculty = vec![Faculty::new("F1", "Dr. Rao")];
///
/// let mut rng = SmallRng::seed_from_u64(42);
/// let timetable = ExamSlotAssigner::new(ExamAssignerConfig::default())
///     .assign_with_rng(&exam, &subjects, &halls, &faculty, &mut rng)
///     .unwrap();
/// assert_eq!(timetable.slot_count, 12);
/// assert_eq!(timetable.entries[0].hall_id.as_deref(), Some("H1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExamSlotAssigner {
    config: ExamAssignerConfig,
}

impl ExamSlotAssigner {
    /// Creates an assigner.
    pub fn new(config: ExamAssignerConfig) -> Self {
        Self { config }
    }

    /// Assigner settings.
    pub fn config(&self) -> &ExamAssignerConfig {
        &self.config
    }

    /// Assigns with an OS-seeded RNG.
    pub fn assign(
        &self,
        exam: &ExamConfig,
        subjects: &[Subject],
        halls: &[Hall],
        faculty: &[Faculty],
    ) -> Result<ExamTimetable> {
        let mut rng = SmallRng::from_os_rng();
        self.assign_with_rng(exam, subjects, halls, faculty, &mut rng)
    }

    /// Assigns with a caller-supplied RNG.
    ///
    /// # Errors
    /// - `MissingData` when subjects, halls (unless `allow_empty_halls`) or
    ///   faculty is empty.
    /// - `InvalidInput` when the window ends before it starts.
    /// - `Infeasible` when subjects are left over and `strict_capacity` is set.
    pub fn assign_with_rng<R: Rng>(
        &self,
        exam: &ExamConfig,
        subjects: &[Subject],
        halls: &[Hall],
        faculty: &[Faculty],
        rng: &mut R,
    ) -> Result<ExamTimetable> {
        info!(
            exam = %exam.id,
            subjects = subjects.len(),
            halls = halls.len(),
            faculty = faculty.len(),
            "assigning exam slots"
        );

        if subjects.is_empty() {
            return Err(EngineError::missing("subjects"));
        }
        if halls.is_empty() && !self.config.allow_empty_halls {
            return Err(EngineError::missing("halls"));
        }
        if faculty.is_empty() {
            return Err(EngineError::missing("faculty"));
        }
        if exam.end_date < exam.start_date {
            return Err(EngineError::InvalidInput(format!(
                "exam '{}' ends ({}) before it starts ({})",
                exam.id, exam.end_date, exam.start_date
            )));
        }

        let slots = exam_slots(exam.start_date, exam.end_date);
        let mut timetable = ExamTimetable {
            slot_count: slots.len(),
            ..ExamTimetable::default()
        };
        let mut halls_used: SlotOccupancy<ExamSlot> = SlotOccupancy::new();
        let mut invigilators_used: SlotOccupancy<ExamSlot> = SlotOccupancy::new();

        for (batch_id, mut batch_subjects) in group_by_batch(subjects) {
            if self.config.shuffle_subjects {
                batch_subjects.shuffle(rng);
            }
            let step = if slots.len() >= 2 * batch_subjects.len() { 2 } else { 1 };
            debug!(batch = batch_id, subjects = batch_subjects.len(), step, "placing batch");

            let mut reachable = slots.iter().step_by(step);
            for subject in batch_subjects {
                let Some(&slot) = reachable.next() else {
                    timetable.unscheduled.push(UnscheduledExam {
                        subject_id: subject.id.clone(),
                        subject_name: subject.name.clone(),
                        batch_id: batch_id.to_string(),
                        reason: "exam window has no slot left".into(),
                    });
                    continue;
                };

                let hall =
                    self.pick_hall(subject, slot, halls, &mut halls_used, rng, &mut timetable);
                let invigilator = self.pick_invigilator(
                    subject,
                    slot,
                    faculty,
                    &mut invigilators_used,
                    rng,
                    &mut timetable,
                );

                timetable.entries.push(ExamAssignment {
                    exam_id: exam.id.clone(),
                    subject_id: subject.id.clone(),
                    subject_name: subject.name.clone(),
                    batch_id: batch_id.to_string(),
                    exam_date: slot.date,
                    session: slot.session,
                    hall_id: hall.map(|h| h.id.clone()),
                    hall_name: hall.map_or_else(|| TBD.to_string(), |h| h.name.clone()),
                    invigilator_id: invigilator.map(|f| f.id.clone()),
                    invigilator_name: invigilator
                        .map_or_else(|| TBD.to_string(), |f| f.name.clone()),
                });
            }
        }

        if !timetable.unscheduled.is_empty() {
            let reason = format!(
                "{} of {} subjects did not fit {} exam slots",
                timetable.unscheduled.len(),
                subjects.len(),
                slots.len()
            );
            warn!(exam = %exam.id, "{reason}");
            if self.config.strict_capacity {
                return Err(EngineError::Infeasible {
                    reason,
                    unplaced: timetable.unscheduled.len(),
                });
            }
            timetable
                .violations
                .push(Violation::capacity_overflow(exam.id.clone(), reason));
        }

        info!(
            exam = %exam.id,
            entries = timetable.entries.len(),
            unscheduled = timetable.unscheduled.len(),
            "exam timetable ready"
        );
        Ok(timetable)
    }

    /// Random hall that seats the subject and is free in `slot`.
    fn pick_hall<'h, R: Rng>(
        &self,
        subject: &Subject,
        slot: ExamSlot,
        halls: &'h [Hall],
        used: &mut SlotOccupancy<ExamSlot>,
        rng: &mut R,
        timetable: &mut ExamTimetable,
    ) -> Option<&'h Hall> {
        let students = subject.expected_students();
        let eligible: Vec<&Hall> = halls.iter().filter(|h| h.fits(students)).collect();
        if eligible.is_empty() {
            if !halls.is_empty() {
                warn!(subject = %subject.id, students, "no hall large enough");
            }
            timetable.violations.push(Violation::hall_unavailable(
                subject.id.clone(),
                format!("no hall seats {students} students"),
            ));
            return None;
        }

        let free: Vec<&Hall> = eligible
            .into_iter()
            .filter(|h| !self.config.exclusive_halls || !used.is_taken(slot, &h.id))
            .collect();
        let Some(&hall) = free.choose(rng) else {
            warn!(
                subject = %subject.id,
                date = %slot.date,
                session = %slot.session,
                "every suitable hall is taken"
            );
            timetable.violations.push(Violation::hall_unavailable(
                subject.id.clone(),
                format!("every hall seating {students} is taken on {} {}", slot.date, slot.session),
            ));
            return None;
        };
        used.reserve(slot, &hall.id);
        Some(hall)
    }

    /// Random faculty member free in `slot`.
    fn pick_invigilator<'f, R: Rng>(
        &self,
        subject: &Subject,
        slot: ExamSlot,
        faculty: &'f [Faculty],
        used: &mut SlotOccupancy<ExamSlot>,
        rng: &mut R,
        timetable: &mut ExamTimetable,
    ) -> Option<&'f Faculty> {
        let free: Vec<&Faculty> = faculty
            .iter()
            .filter(|f| !self.config.exclusive_invigilators || !used.is_taken(slot, &f.id))
            .collect();
        let Some(&invigilator) = free.choose(rng) else {
            warn!(
                subject = %subject.id,
                date = %slot.date,
                session = %slot.session,
                "no invigilator free"
            );
            timetable.violations.push(Violation::invigilator_unavailable(
                subject.id.clone(),
                format!("no invigilator free on {} {}", slot.date, slot.session),
            ));
            return None;
        };
        used.reserve(slot, &invigilator.id);
        Some(invigilator)
    }
}

/// Groups subjects by batch, keeping first-appearance order of batches.
fn group_by_batch(subjects: &[Subject]) -> Vec<(&str, Vec<&Subject>)> {
    let mut groups: Vec<(&str, Vec<&Subject>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for subject in subjects {
        let key = subject.batch_key();
        let at = *index.entry(key).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[at].1.push(subject);
    }
    groups
}
