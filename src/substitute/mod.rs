//! Substitute ranking.
//!
//! Given the timetable records for a day and the substitution duties already
//! recorded for a date, finds who can cover a vacated time slot and orders
//! them free-first, then by same-day workload.

mod ranker;

pub use ranker::SubstituteRanker;
