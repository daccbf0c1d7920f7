//! Timetabling domain models.
//!
//! Inputs (`Subject`, `Faculty`, `Hall`, `Batch`, exam configurations and
//! stored timetable records) are read-only for the duration of one engine
//! invocation. Outputs (`WeeklySchedule`, `ExamTimetable`,
//! `SubstituteCandidate`) are built fresh per invocation and handed to the
//! caller.
//!
//! # Slot spaces
//!
//! | Allocator | Slot | Contended resources |
//! |-----------|------|---------------------|
//! | Weekly optimizer | (day, period) | faculty, batch |
//! | Exam assigner | (date, session) | halls, invigilators |
//! | Substitute ranker | time-slot label | faculty |

mod exam;
mod resource;
mod schedule;
mod slot;
mod subject;
mod substitution;
mod timings;

pub use exam::{
    parse_iso_date, ExamAssignment, ExamConfig, ExamTimetable, ExamType, UnscheduledExam, TBD,
};
pub use resource::{Faculty, Hall};
pub use schedule::{
    ClassAssignment, Termination, UnplacedUnit, Violation, ViolationType, WeeklySchedule,
    UNKNOWN_FACULTY,
};
pub use slot::{
    exam_slots, time_slots_match, ExamSession, ExamSlot, SlotOccupancy, WeeklySlot, DAY_NAMES,
};
pub use subject::{Batch, Subject, DEFAULT_STUDENT_COUNT, DEFAULT_WEEKLY_HOURS, UNKNOWN_BATCH};
pub use substitution::{
    ScheduleSlotRecord, SubstituteCandidate, SubstituteRequest, SubstitutionRecord,
};
pub use timings::{Break, BreakKind, CollegeTimings};
