//! Engine configuration.
//!
//! All sections deserialize with defaults for missing fields, so a partial
//! JSON document (or none at all) yields the stock behavior:
//!
//! ```
//! use u_timetable::config::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{ "optimizer": { "max_generations": 20 } }"#).unwrap();
//! assert_eq!(config.optimizer.max_generations, 20);
//! assert_eq!(config.optimizer.population_size, 50);
//! assert!(!config.substitute.strict_substitution_time_check);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::ga::GaConfig;

/// Most teaching days a week can hold.
pub const MAX_DAYS: usize = 7;

/// Most periods a teaching day can hold.
pub const MAX_PERIODS_PER_DAY: usize = 24;

/// Top-level configuration for [`SchedulingEngine`](crate::scheduler::SchedulingEngine).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Weekly timetable optimizer settings.
    pub optimizer: OptimizerConfig,
    /// Exam slot assigner settings.
    pub exam: ExamAssignerConfig,
    /// Substitute ranker settings.
    pub substitute: SubstituteConfig,
    /// Run structural input validation before each invocation.
    pub validate_input: bool,
}

impl EngineConfig {
    /// Parses a JSON configuration document.
    pub fn from_json(document: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(document)?;
        config.optimizer.validate()?;
        Ok(config)
    }

    /// Sets the optimizer section.
    pub fn with_optimizer(mut self, optimizer: OptimizerConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// Sets the exam section.
    pub fn with_exam(mut self, exam: ExamAssignerConfig) -> Self {
        self.exam = exam;
        self
    }

    /// Sets the substitute section.
    pub fn with_substitute(mut self, substitute: SubstituteConfig) -> Self {
        self.substitute = substitute;
        self
    }

    /// Enables or disables input validation.
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_input = enabled;
        self
    }
}

/// Weekly timetable optimizer settings.
///
/// GA hyperparameters default to population 50, 100 generations,
/// mutation rate 0.1, 10 elites and a parent pool of the top 20.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Teaching days per week.
    pub days: usize,
    /// Periods per teaching day.
    pub periods_per_day: usize,
    /// Individuals per generation.
    pub population_size: usize,
    /// Generation budget.
    pub max_generations: usize,
    /// Probability of mutating a freshly bred child.
    pub mutation_rate: f64,
    /// Individuals copied unchanged into the next generation.
    pub elite_count: usize,
    /// Parents are drawn uniformly from this many top-ranked individuals.
    pub parent_pool: usize,
    /// Fitness of a perfectly balanced week.
    pub base_score: f64,
    /// Penalty per unit of daily-load standard deviation.
    pub imbalance_weight: f64,
    /// Forbid two entries of the batch in the same (day, period).
    pub batch_exclusive: bool,
    /// Fail with `Infeasible` instead of returning a partial schedule.
    pub strict_capacity: bool,
    /// Evaluate fitness on the rayon pool.
    pub parallel: bool,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
    /// Wall-clock budget; the best-so-far schedule is returned when exceeded.
    pub time_limit_ms: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            days: 5,
            periods_per_day: 7,
            population_size: 50,
            max_generations: 100,
            mutation_rate: 0.1,
            elite_count: 10,
            parent_pool: 20,
            base_score: 1000.0,
            imbalance_weight: 10.0,
            batch_exclusive: true,
            strict_capacity: false,
            parallel: true,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl OptimizerConfig {
    /// Sets the week shape.
    pub fn with_week(mut self, days: usize, periods_per_day: usize) -> Self {
        self.days = days;
        self.periods_per_day = periods_per_day;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets elite count and parent pool size.
    pub fn with_elitism(mut self, elite_count: usize, parent_pool: usize) -> Self {
        self.elite_count = elite_count;
        self.parent_pool = parent_pool;
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Toggles parallel fitness evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets a wall-clock budget in milliseconds.
    pub fn with_time_limit_ms(mut self, limit_ms: u64) -> Self {
        self.time_limit_ms = Some(limit_ms);
        self
    }

    /// Toggles failing on capacity overflow.
    pub fn with_strict_capacity(mut self, strict: bool) -> Self {
        self.strict_capacity = strict;
        self
    }

    /// Toggles batch slot exclusivity.
    pub fn with_batch_exclusive(mut self, exclusive: bool) -> Self {
        self.batch_exclusive = exclusive;
        self
    }

    /// Checks parameter ranges. The week is capped at
    /// [`MAX_DAYS`] × [`MAX_PERIODS_PER_DAY`] cells.
    pub fn validate(&self) -> Result<()> {
        if self.days == 0 || self.periods_per_day == 0 {
            return Err(EngineError::InvalidInput(format!(
                "week shape must be non-empty, got {} days x {} periods",
                self.days, self.periods_per_day
            )));
        }
        if self.days > MAX_DAYS || self.periods_per_day > MAX_PERIODS_PER_DAY {
            return Err(EngineError::InvalidInput(format!(
                "week shape {} days x {} periods exceeds {MAX_DAYS} x {MAX_PERIODS_PER_DAY}",
                self.days, self.periods_per_day
            )));
        }
        if self.population_size == 0 {
            return Err(EngineError::InvalidInput(
                "population_size must be at least 1".into(),
            ));
        }
        if self.elite_count > self.population_size {
            return Err(EngineError::InvalidInput(format!(
                "elite_count {} exceeds population_size {}",
                self.elite_count, self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(EngineError::InvalidInput(format!(
                "mutation_rate {} outside [0, 1]",
                self.mutation_rate
            )));
        }
        Ok(())
    }

    /// GA runner settings derived from this section.
    pub fn ga_config(&self) -> GaConfig {
        GaConfig {
            population_size: self.population_size,
            max_generations: self.max_generations,
            mutation_rate: self.mutation_rate,
            elite_count: self.elite_count,
            parent_pool: self.parent_pool,
            parallel: self.parallel,
            seed: self.seed,
            time_limit_ms: self.time_limit_ms,
        }
    }
}

/// Exam slot assigner settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamAssignerConfig {
    /// Shuffle each batch's subjects before walking the slot list.
    pub shuffle_subjects: bool,
    /// Never seat two exams in one hall during the same session.
    pub exclusive_halls: bool,
    /// Never give one invigilator two exams in the same session.
    pub exclusive_invigilators: bool,
    /// Fail with `Infeasible` when subjects are left unscheduled.
    pub strict_capacity: bool,
    /// Accept an empty hall list (every exam gets "TBD").
    pub allow_empty_halls: bool,
}

impl Default for ExamAssignerConfig {
    fn default() -> Self {
        Self {
            shuffle_subjects: true,
            exclusive_halls: true,
            exclusive_invigilators: true,
            strict_capacity: false,
            allow_empty_halls: false,
        }
    }
}

/// Substitute ranker settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstituteConfig {
    /// Resolve each substitution duty's time slot and treat a match as busy.
    ///
    /// Off by default: substitution duties only add to the workload score.
    pub strict_substitution_time_check: bool,
    /// Truncate the ranked list to this many candidates.
    pub max_candidates: Option<usize>,
}
