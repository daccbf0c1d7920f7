//! Scheduling engine facade.
//!
//! One entry point per request kind. Calls are independent: each owns its
//! random source and occupancy indexes, so a failed call leaves nothing
//! behind for the next one.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::exam::ExamSlotAssigner;
use crate::ga::WeeklyOptimizer;
use crate::models::{
    Batch, ExamConfig, ExamTimetable, Faculty, Hall, ScheduleSlotRecord, Subject,
    SubstituteCandidate, SubstituteRequest, SubstitutionRecord, WeeklySchedule,
};
use crate::substitute::SubstituteRanker;
use crate::validation::{validate_exam_input, validate_weekly_input};

/// Weekly timetables, exam timetables and substitute rankings.
///
/// # Usage
///
/// ```
/// use u_timetable::config::{EngineConfig, OptimizerConfig};
/// use u_timetable::models::{Faculty, Subject};
/// use u_timetable::scheduler::SchedulingEngine;
///
/// let config = EngineConfig::default().with_optimizer(OptimizerConfig::default().with_seed(7));
/// let engine = SchedulingEngine::new(config);
///
/// let subjects = vec![Subject::new("S1").with_name("Maths").with_faculty("F1")];
/// let faculty = vec![Faculty::new("F1", "Dr. Rao")];
/// let schedule = engine.optimize_weekly(&subjects, &faculty).unwrap();
/// assert_eq!(schedule.entry_count(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchedulingEngine {
    config: EngineConfig,
}

impl SchedulingEngine {
    /// Creates an engine.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Engine settings.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Fresh random source for one call.
    fn rng(&self) -> SmallRng {
        match self.config.optimizer.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        }
    }

    /// Builds a weekly timetable from subjects and faculty.
    pub fn optimize_weekly(
        &self,
        subjects: &[Subject],
        faculty: &[Faculty],
    ) -> Result<WeeklySchedule> {
        if self.config.validate_input {
            validate_weekly_input(subjects, faculty).map_err(EngineError::Validation)?;
        }
        let optimizer = WeeklyOptimizer::new(self.config.optimizer.clone());
        optimizer.optimize_with_rng(subjects, faculty, &mut self.rng())
    }

    /// Builds the weekly timetable of the batch named `batch_name`.
    ///
    /// Subjects and faculty are narrowed to the batch's department first.
    ///
    /// # Errors
    /// - `NotFound` when no batch has that name.
    /// - `MissingData` when the department has no subjects or no faculty.
    pub fn optimize_for_batch(
        &self,
        batch_name: &str,
        batches: &[Batch],
        subjects: &[Subject],
        faculty: &[Faculty],
    ) -> Result<WeeklySchedule> {
        let batch = batches
            .iter()
            .find(|b| b.name == batch_name)
            .ok_or_else(|| EngineError::not_found("batch", batch_name))?;
        let department = batch.department_id.as_deref();
        info!(batch = batch_name, department = ?department, "building batch timetable");

        let in_department = |d: &Option<String>| d.is_some() && d.as_deref() == department;
        let subjects: Vec<Subject> = subjects
            .iter()
            .filter(|s| in_department(&s.department_id))
            .cloned()
            .collect();
        let faculty: Vec<Faculty> = faculty
            .iter()
            .filter(|f| in_department(&f.department_id))
            .cloned()
            .collect();
        if subjects.is_empty() {
            return Err(EngineError::missing("subjects"));
        }
        if faculty.is_empty() {
            return Err(EngineError::missing("faculty"));
        }

        self.optimize_weekly(&subjects, &faculty)
    }

    /// Looks up an exam configuration by id.
    pub fn find_exam<'a>(&self, exams: &'a [ExamConfig], exam_id: &str) -> Result<&'a ExamConfig> {
        ExamConfig::find(exams, exam_id)
    }

    /// Builds the exam timetable for one exam configuration.
    pub fn assign_exams(
        &self,
        exam: &ExamConfig,
        subjects: &[Subject],
        halls: &[Hall],
        faculty: &[Faculty],
    ) -> Result<ExamTimetable> {
        if self.config.validate_input {
            validate_exam_input(subjects, halls, faculty).map_err(EngineError::Validation)?;
        }
        let assigner = ExamSlotAssigner::new(self.config.exam.clone());
        assigner.assign_with_rng(exam, subjects, halls, faculty, &mut self.rng())
    }

    /// Ranks substitutes for a vacated slot.
    ///
    /// # Errors
    /// `InvalidInput` when the request carries no time slot.
    pub fn rank_substitutes(
        &self,
        faculty: &[Faculty],
        slots_on_day: &[ScheduleSlotRecord],
        substitutions_on_date: &[SubstitutionRecord],
        request: &SubstituteRequest,
    ) -> Result<Vec<SubstituteCandidate>> {
        if request.time_slot.trim().is_empty() {
            return Err(EngineError::InvalidInput("substitute request has no time slot".into()));
        }
        let ranker = SubstituteRanker::new(self.config.substitute.clone());
        Ok(ranker.rank(faculty, slots_on_day, substitutions_on_date, request))
    }
}
