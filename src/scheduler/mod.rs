//! Engine facade and timetable KPIs.
//!
//! # Engine
//!
//! `SchedulingEngine` is the single entry point for callers: weekly
//! timetables (whole input or one batch's department), exam timetables and
//! substitute rankings. It applies the configured input validation and gives
//! every call its own random source.
//!
//! # KPI
//!
//! `TimetableKpi` computes weekly timetable metrics: placement rate, daily
//! load spread, faculty loads, conflicts.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

mod engine;
mod kpi;

pub use engine::SchedulingEngine;
pub use kpi::TimetableKpi;
