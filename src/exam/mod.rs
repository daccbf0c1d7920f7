//! Exam slot assignment.
//!
//! Places each subject's exam sitting into a (date, session) slot within an
//! exam window, spreading a batch's exams apart when the window allows and
//! attaching a hall and an invigilator per sitting.
//!
//! # Reference
//! Carter, Laporte & Lee (1996), "Examination Timetabling: Algorithmic
//! Strategies and Applications"

mod assigner;

pub use assigner::ExamSlotAssigner;
