//! GA-based weekly timetable optimization.
//!
//! # Encoding
//!
//! A candidate timetable is a list of genes `(unit, slot)`: each subject is
//! expanded into one allocation unit per required weekly period, and units
//! are paired positionally with a shuffled copy of the `days × periods`
//! slot space.
//!
//! # Submodules
//!
//! - [`runner`]: generic elitist GA (`GaProblem`, `GaConfig`, `GaRunner`)
//! - `chromosome`: encoding, single-point crossover, slot mutation, clash repair
//! - `problem`: fitness (daily-load balance) and decoding
//! - `optimizer`: the [`WeeklyOptimizer`] entry point
//!
//! # Reference
//! Burke & Petrovic (2002), "Recent research directions in automated timetabling"

mod chromosome;
mod optimizer;
mod problem;
pub mod runner;

pub use chromosome::{
    random_slot_mutation, repair, single_point_crossover, Gene, TimetableChromosome,
};
pub use optimizer::WeeklyOptimizer;
pub use problem::{population_std_dev, AllocationUnit, TimetableProblem};
pub use runner::{GaConfig, GaProblem, GaResult, GaRunner, GenerationStats, Individual};
