//! Weekly timetable optimizer.
//!
//! Runs the timetable GA for one batch and packages the best individual as a
//! [`WeeklySchedule`], reporting every required period that could not be
//! placed instead of dropping it silently.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use super::problem::TimetableProblem;
use super::runner::GaRunner;
use crate::config::OptimizerConfig;
use crate::error::{EngineError, Result};
use crate::models::{Faculty, Subject, UnplacedUnit, Violation, WeeklySchedule};

/// GA-driven weekly timetable optimizer.
///
/// # Example
/// ```
/// use u_timetable::config::OptimizerConfig;
/// use u_timetable::ga::WeeklyOptimizer;
/// use u_timetable::models::{Faculty, Subject};
///
/// let subjects = vec![
///     Subject::new("S1").with_name("Maths").with_faculty("F1"),
///     Subject::new("S2").with_name("Physics").with_faculty("F2"),
/// ];
/// let faculty = vec![Faculty::new("F1", "Dr. Rao"), Faculty::new("F2", "Dr. Iyer")];
///
/// let optimizer = WeeklyOptimizer::new(OptimizerConfig::default().with_seed(42));
/// let schedule = optimizer.optimize(&subjects, &faculty).unwrap();
/// assert_eq!(schedule.entry_count(), 6);
/// assert!(schedule.faculty_conflicts().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct WeeklyOptimizer {
    config: OptimizerConfig,
}

impl WeeklyOptimizer {
    /// Creates an optimizer.
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Optimizer settings.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Optimizes with an RNG seeded from `config.seed` (or the OS).
    pub fn optimize(&self, subjects: &[Subject], faculty: &[Faculty]) -> Result<WeeklySchedule> {
        let mut rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        self.optimize_with_rng(subjects, faculty, &mut rng)
    }

    /// Optimizes with a caller-supplied RNG.
    ///
    /// # Errors
    /// - `InvalidInput` for out-of-range settings.
    /// - `MissingData` when `subjects` is empty.
    /// - `Infeasible` when no unit can be placed, or when units overflow the
    ///   week and `strict_capacity` is set.
    pub fn optimize_with_rng<R: Rng>(
        &self,
        subjects: &[Subject],
        faculty: &[Faculty],
        rng: &mut R,
    ) -> Result<WeeklySchedule> {
        let config = &self.config;
        config.validate()?;
        info!(
            subjects = subjects.len(),
            faculty = faculty.len(),
            days = config.days,
            periods = config.periods_per_day,
            "optimizing weekly timetable"
        );

        if subjects.is_empty() {
            return Err(EngineError::missing("subjects"));
        }

        let problem = TimetableProblem::from_config(subjects, faculty, config);
        if problem.units.is_empty() {
            return Err(EngineError::Infeasible {
                reason: "no subject requires a weekly period".into(),
                unplaced: 0,
            });
        }

        let mut violations = Vec::new();
        let overflow = problem.overflow_count();
        if overflow > 0 {
            let demand = problem.units.len().saturating_add(overflow);
            let reason = format!(
                "{demand} periods requested, {} slots available",
                problem.slot_capacity()
            );
            warn!(overflow, "{reason}");
            if config.strict_capacity {
                return Err(EngineError::Infeasible {
                    reason,
                    unplaced: overflow,
                });
            }
            violations.push(Violation::capacity_overflow("schedule", reason));
        }

        let result = GaRunner::run_with_rng(&problem, &config.ga_config(), rng);

        // Units of a subject are contiguous, so dropped ones merge per subject.
        let mut dropped: Vec<UnplacedUnit> = Vec::new();
        for (idx, unit) in problem.units.iter().enumerate() {
            if result.best.contains_unit(idx) {
                continue;
            }
            match dropped.last_mut() {
                Some(last) if last.subject_id == unit.subject_id => last.count += 1,
                _ => dropped.push(UnplacedUnit {
                    subject_id: unit.subject_id.clone(),
                    subject_name: unit.subject_name.clone(),
                    count: 1,
                    reason: "no conflict-free slot".into(),
                }),
            }
        }
        let mut unplaced = problem.overflow.clone();
        unplaced.extend(dropped);

        let mut schedule = WeeklySchedule {
            entries: problem.decode(&result.best),
            unplaced,
            violations,
            fitness: result.best_fitness,
            generations: result.generations,
            termination: result.termination,
        };
        for (slot, faculty_id) in schedule.faculty_conflicts() {
            schedule.violations.push(Violation::faculty_double_booked(
                faculty_id.clone(),
                format!(
                    "{faculty_id} teaches twice on {} period {}",
                    slot.day_name(),
                    slot.period + 1
                ),
            ));
        }

        info!(
            entries = schedule.entry_count(),
            unplaced = schedule.unplaced_periods(),
            fitness = schedule.fitness,
            generations = schedule.generations,
            "weekly timetable ready"
        );
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Termination;

    fn three_subjects() -> (Vec<Subject>, Vec<Faculty>) {
        let subjects = vec![
            Subject::new("S1").with_name("Maths").with_faculty("F1").with_weekly_hours(3),
            Subject::new("S2").with_name("Physics").with_faculty("F2").with_weekly_hours(3),
            Subject::new("S3").with_name("Chemistry").with_faculty("F1").with_weekly_hours(3),
        ];
        let faculty = vec![Faculty::new("F1", "Dr. Rao"), Faculty::new("F2", "Dr. Iyer")];
        (subjects, faculty)
    }

    fn seeded() -> OptimizerConfig {
        OptimizerConfig::default().with_seed(42)
    }

    #[test]
    fn test_nine_units_in_bounds() {
        let (subjects, faculty) = three_subjects();
        let schedule = WeeklyOptimizer::new(seeded())
            .optimize(&subjects, &faculty)
            .unwrap();
        assert_eq!(schedule.entry_count(), 9);
        assert!(schedule.entries.iter().all(|e| e.day < 5 && e.period < 7));
        assert!(schedule.unplaced.is_empty());
        assert!(schedule.is_complete());
        assert_eq!(schedule.generations, 100);
        assert_eq!(schedule.termination, Termination::Generations);
    }

    #[test]
    fn test_result_is_balanced_and_conflict_free() {
        let (subjects, faculty) = three_subjects();
        let schedule = WeeklyOptimizer::new(seeded())
            .optimize(&subjects, &faculty)
            .unwrap();
        assert!(schedule.faculty_conflicts().is_empty());
        assert!(schedule.batch_clashes().is_empty());
        let loads = schedule.daily_loads(5);
        assert_eq!(loads.iter().sum::<usize>(), 9);
        // 9 periods over 5 days: best possible spread is 2/2/2/2/1.
        assert!(loads.iter().all(|&l| l == 1 || l == 2));
        assert!((schedule.fitness - 996.0).abs() < 1e-10);
    }

    #[test]
    fn test_custom_week_shape() {
        let (subjects, faculty) = three_subjects();
        let config = seeded().with_week(6, 4).with_max_generations(10);
        let schedule = WeeklyOptimizer::new(config)
            .optimize(&subjects, &faculty)
            .unwrap();
        assert!(schedule.entries.iter().all(|e| e.day < 6 && e.period < 4));
    }

    #[test]
    fn test_overflow_is_reported() {
        let (subjects, faculty) = three_subjects();
        let config = seeded().with_week(2, 3).with_max_generations(5);
        let schedule = WeeklyOptimizer::new(config)
            .optimize(&subjects, &faculty)
            .unwrap();
        assert_eq!(schedule.entry_count(), 6);
        assert_eq!(schedule.unplaced.len(), 1);
        assert_eq!(schedule.unplaced[0].subject_id, "S3");
        assert_eq!(schedule.unplaced_periods(), 3);
        assert!(schedule
            .violations
            .iter()
            .any(|v| v.violation_type == crate::models::ViolationType::CapacityOverflow));
        assert!(!schedule.is_complete());
    }

    #[test]
    fn test_overflow_strict_is_infeasible() {
        let (subjects, faculty) = three_subjects();
        let config = seeded().with_week(2, 3).with_strict_capacity(true);
        let err = WeeklyOptimizer::new(config)
            .optimize(&subjects, &faculty)
            .unwrap_err();
        assert!(matches!(err, EngineError::Infeasible { unplaced: 3, .. }));
    }

    #[test]
    fn test_huge_weekly_hours_reported_as_count() {
        let subjects = vec![Subject::new("S1").with_faculty("F1").with_weekly_hours(20_000_000)];
        let faculty = vec![Faculty::new("F1", "Dr. Rao")];
        let config = seeded().with_max_generations(2).with_parallel(false);
        let schedule = WeeklyOptimizer::new(config)
            .optimize(&subjects, &faculty)
            .unwrap();
        assert_eq!(schedule.entry_count(), 35);
        assert_eq!(schedule.unplaced.len(), 1);
        assert_eq!(schedule.unplaced[0].count, 19_999_965);
        assert_eq!(schedule.unplaced_periods(), 19_999_965);

        let strict = seeded().with_strict_capacity(true);
        let err = WeeklyOptimizer::new(strict)
            .optimize(&subjects, &faculty)
            .unwrap_err();
        assert!(matches!(err, EngineError::Infeasible { unplaced: 19_999_965, .. }));
    }

    #[test]
    fn test_oversized_week_is_invalid() {
        let (subjects, faculty) = three_subjects();
        let err = WeeklyOptimizer::new(seeded().with_week(usize::MAX, 2))
            .optimize(&subjects, &faculty)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_subjects() {
        let err = WeeklyOptimizer::new(seeded())
            .optimize(&[], &[Faculty::new("F1", "A")])
            .unwrap_err();
        assert!(matches!(err, EngineError::MissingData { collection: "subjects" }));
    }

    #[test]
    fn test_zero_hours_is_infeasible() {
        let subjects = vec![Subject::new("S1").with_weekly_hours(0)];
        let err = WeeklyOptimizer::new(seeded())
            .optimize(&subjects, &[])
            .unwrap_err();
        assert!(matches!(err, EngineError::Infeasible { .. }));
    }

    #[test]
    fn test_unknown_faculty_still_scheduled() {
        let subjects = vec![Subject::new("S1").with_name("Art").with_faculty("F404")];
        let schedule = WeeklyOptimizer::new(seeded().with_max_generations(5))
            .optimize(&subjects, &[])
            .unwrap();
        assert_eq!(schedule.entry_count(), 3);
        assert!(schedule.entries.iter().all(|e| e.faculty_id.is_none()));
        assert!(schedule.entries.iter().all(|e| e.faculty_name == "Unknown"));
    }

    #[test]
    fn test_time_limit_returns_best_so_far() {
        let (subjects, faculty) = three_subjects();
        let config = seeded().with_time_limit_ms(0);
        let schedule = WeeklyOptimizer::new(config)
            .optimize(&subjects, &faculty)
            .unwrap();
        assert_eq!(schedule.termination, Termination::TimeLimit);
        assert_eq!(schedule.generations, 0);
        assert_eq!(schedule.entry_count(), 9);
    }

    #[test]
    fn test_seed_reproducible() {
        let (subjects, faculty) = three_subjects();
        let optimizer = WeeklyOptimizer::new(seeded().with_max_generations(20));
        let a = optimizer.optimize(&subjects, &faculty).unwrap();
        let b = optimizer.optimize(&subjects, &faculty).unwrap();
        assert_eq!(a.entries, b.entries);
    }

    #[test]
    fn test_invalid_config() {
        let (subjects, faculty) = three_subjects();
        let config = seeded().with_mutation_rate(2.0);
        let err = WeeklyOptimizer::new(config)
            .optimize(&subjects, &faculty)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }
}
