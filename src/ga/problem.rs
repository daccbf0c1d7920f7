//! Weekly timetable GA problem definition.
//!
//! Implements [`GaProblem`] for one batch's week. Bridges domain models
//! (Subject, Faculty) to the generic GA runner.
//!
//! # Fitness
//! `base_score − σ(daily loads) × imbalance_weight`, where σ is the
//! population standard deviation of periods per day over all days of the
//! week. An evenly spread week scores highest.

use std::collections::HashMap;

use rand::Rng;

use super::chromosome::{random_slot_mutation, repair, single_point_crossover, TimetableChromosome};
use super::runner::GaProblem;
use crate::config::OptimizerConfig;
use crate::models::{ClassAssignment, Faculty, Subject, UnplacedUnit, UNKNOWN_FACULTY};

/// One required period of one subject.
///
/// Extracted from `Subject`/`Faculty` to avoid cloning full domain objects
/// per gene.
#[derive(Debug, Clone)]
pub struct AllocationUnit {
    pub subject_id: String,
    pub subject_name: String,
    /// `None` when the subject's faculty is not in the input.
    pub faculty_id: Option<String>,
    pub faculty_name: String,
}

impl AllocationUnit {
    /// Expands subjects into one unit per required period, in input order,
    /// stopping once `capacity` units exist.
    ///
    /// Periods past the cap are returned as one [`UnplacedUnit`] per subject
    /// carrying the number of periods left out.
    pub fn expand(
        subjects: &[Subject],
        faculty: &[Faculty],
        capacity: usize,
    ) -> (Vec<Self>, Vec<UnplacedUnit>) {
        let by_id: HashMap<&str, &Faculty> =
            faculty.iter().map(|f| (f.id.as_str(), f)).collect();
        let mut units = Vec::new();
        let mut overflow = Vec::new();
        for subject in subjects {
            let required = subject.required_periods() as usize;
            let fits = required.min(capacity - units.len());
            if fits < required {
                overflow.push(UnplacedUnit {
                    subject_id: subject.id.clone(),
                    subject_name: subject.name.clone(),
                    count: required - fits,
                    reason: "weekly slot space exhausted".into(),
                });
            }
            if fits == 0 {
                continue;
            }
            let lecturer = subject
                .faculty_id
                .as_deref()
                .and_then(|id| by_id.get(id).copied());
            let unit = AllocationUnit {
                subject_id: subject.id.clone(),
                subject_name: subject.name.clone(),
                faculty_id: lecturer.map(|f| f.id.clone()),
                faculty_name: lecturer
                    .map(|f| f.name.clone())
                    .unwrap_or_else(|| UNKNOWN_FACULTY.to_string()),
            };
            units.extend(std::iter::repeat(unit).take(fits));
        }
        (units, overflow)
    }
}

/// GA problem for one batch's weekly timetable.
///
/// # Example
/// ```
/// use u_timetable::ga::{GaConfig, GaRunner, TimetableProblem};
/// use u_timetable::models::{Faculty, Subject};
///
/// let subjects = vec![Subject::new("S1").with_faculty("F1").with_weekly_hours(4)];
/// let faculty = vec![Faculty::new("F1", "Dr. Rao")];
/// let problem = TimetableProblem::new(&subjects, &faculty, 5, 7);
/// let config = GaConfig::default().with_max_generations(5).with_seed(1);
/// let result = GaRunner::run(&problem, &config);
/// assert_eq!(problem.decode(&result.best).len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct TimetableProblem {
    /// Units that fit the slot space.
    pub units: Vec<AllocationUnit>,
    /// Periods beyond the slot space, one entry per subject.
    pub overflow: Vec<UnplacedUnit>,
    pub days: usize,
    pub periods_per_day: usize,
    /// Fitness of a perfectly balanced week (default: 1000).
    pub base_score: f64,
    /// Penalty per unit of daily-load standard deviation (default: 10).
    pub imbalance_weight: f64,
    /// Forbid two periods of the batch in one cell (default: true).
    pub batch_exclusive: bool,
}

impl TimetableProblem {
    /// Creates a problem for a `days × periods_per_day` week.
    pub fn new(
        subjects: &[Subject],
        faculty: &[Faculty],
        days: usize,
        periods_per_day: usize,
    ) -> Self {
        let capacity = days.saturating_mul(periods_per_day);
        let (units, overflow) = AllocationUnit::expand(subjects, faculty, capacity);
        Self {
            units,
            overflow,
            days,
            periods_per_day,
            base_score: 1000.0,
            imbalance_weight: 10.0,
            batch_exclusive: true,
        }
    }

    /// Creates a problem from optimizer settings.
    pub fn from_config(
        subjects: &[Subject],
        faculty: &[Faculty],
        config: &OptimizerConfig,
    ) -> Self {
        Self::new(subjects, faculty, config.days, config.periods_per_day)
            .with_weights(config.base_score, config.imbalance_weight)
            .with_batch_exclusive(config.batch_exclusive)
    }

    /// Sets the fitness base score and imbalance weight.
    pub fn with_weights(mut self, base_score: f64, imbalance_weight: f64) -> Self {
        self.base_score = base_score;
        self.imbalance_weight = imbalance_weight;
        self
    }

    /// Sets batch slot exclusivity.
    pub fn with_batch_exclusive(mut self, exclusive: bool) -> Self {
        self.batch_exclusive = exclusive;
        self
    }

    /// Cells in the week.
    pub fn slot_capacity(&self) -> usize {
        self.days.saturating_mul(self.periods_per_day)
    }

    /// Periods left out because the week is full.
    pub fn overflow_count(&self) -> usize {
        self.overflow.iter().map(|u| u.count).sum()
    }

    /// Periods per day for a chromosome.
    pub fn daily_loads(&self, chromosome: &TimetableChromosome) -> Vec<usize> {
        let mut loads = vec![0; self.days];
        for gene in &chromosome.genes {
            if let Some(load) = loads.get_mut(gene.slot.day) {
                *load += 1;
            }
        }
        loads
    }

    /// Decodes a chromosome into class assignments, in gene order.
    pub fn decode(&self, chromosome: &TimetableChromosome) -> Vec<ClassAssignment> {
        chromosome
            .genes
            .iter()
            .filter_map(|gene| {
                let unit = self.units.get(gene.unit)?;
                Some(ClassAssignment {
                    day: gene.slot.day,
                    period: gene.slot.period,
                    subject_id: unit.subject_id.clone(),
                    subject_name: unit.subject_name.clone(),
                    faculty_id: unit.faculty_id.clone(),
                    faculty_name: unit.faculty_name.clone(),
                })
            })
            .collect()
    }

    /// Computes fitness: base score minus the weighted daily-load spread.
    fn compute_fitness(&self, chromosome: &TimetableChromosome) -> f64 {
        self.base_score - population_std_dev(&self.daily_loads(chromosome)) * self.imbalance_weight
    }
}

/// Population standard deviation. Zero for an empty slice.
pub fn population_std_dev(values: &[usize]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<usize>() as f64 / n;
    let variance = values
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    variance.sqrt()
}

impl GaProblem for TimetableProblem {
    type Individual = TimetableChromosome;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> TimetableChromosome {
        TimetableChromosome::random(self.units.len(), self.days, self.periods_per_day, rng)
    }

    fn evaluate(&self, individual: &TimetableChromosome) -> f64 {
        self.compute_fitness(individual)
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &TimetableChromosome,
        parent2: &TimetableChromosome,
        rng: &mut R,
    ) -> TimetableChromosome {
        let mut child = single_point_crossover(parent1, parent2, rng);
        repair(
            &mut child,
            &self.units,
            self.days,
            self.periods_per_day,
            self.batch_exclusive,
            rng,
        );
        child
    }

    fn mutate<R: Rng>(&self, individual: &mut TimetableChromosome, rng: &mut R) {
        random_slot_mutation(individual, self.days, self.periods_per_day, rng);
        repair(
            individual,
            &self.units,
            self.days,
            self.periods_per_day,
            self.batch_exclusive,
            rng,
        );
    }
}
