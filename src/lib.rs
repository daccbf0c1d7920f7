//! Academic scheduling engine.
//!
//! Allocates scarce slots (class periods, exam sessions, halls,
//! invigilators, substitute staff) to academic entities under capacity and
//! conflict constraints. The engine is pure computation: callers pass
//! already-fetched collections and get back a (possibly partial) assignment
//! plus a quality signal.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Subject`, `Faculty`, `Hall`, `Batch`,
//!   slots, `WeeklySchedule`, `ExamTimetable`, substitution records
//! - **`ga`**: Genetic weekly timetable optimizer (daily-load balancing)
//! - **`exam`**: Exam slot assigner with hall and invigilator exclusivity
//! - **`substitute`**: Substitute ranker for vacated time slots
//! - **`scheduler`**: `SchedulingEngine` facade and `TimetableKpi`
//! - **`validation`**: Input integrity checks (duplicate IDs, faculty refs)
//! - **`config`** / **`error`**: `EngineConfig` and `EngineError`
//!
//! # Example
//!
//! ```
//! use u_timetable::{EngineConfig, OptimizerConfig, SchedulingEngine, TimetableKpi};
//! use u_timetable::models::{Faculty, Subject};
//!
//! let engine = SchedulingEngine::new(
//!     EngineConfig::default().with_optimizer(OptimizerConfig::default().with_seed(42)),
//! );
//! let subjects = vec![
//!     Subject::new("S1").with_name("Maths").with_faculty("F1"),
//!     Subject::new("S2").with_name("Physics").with_faculty("F1"),
//! ];
//! let faculty = vec![Faculty::new("F1", "Dr. Rao")];
//!
//! let schedule = engine.optimize_weekly(&subjects, &faculty).unwrap();
//! let kpi = TimetableKpi::calculate(&schedule, &subjects, 5);
//! assert_eq!(kpi.placed_units, 6);
//! assert_eq!(kpi.faculty_conflicts, 0);
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Carter, Laporte & Lee (1996), "Examination Timetabling"

pub mod config;
pub mod error;
pub mod exam;
pub mod ga;
pub mod models;
pub mod scheduler;
pub mod substitute;
pub mod validation;

pub use config::{EngineConfig, ExamAssignerConfig, OptimizerConfig, SubstituteConfig};
pub use error::{EngineError, Result};
pub use scheduler::{SchedulingEngine, TimetableKpi};
