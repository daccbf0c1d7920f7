//! Slot model shared by every allocator.
//!
//! Two slot spaces exist:
//! - **Weekly**: `(day, period)` with `day ∈ [0, days)` and
//!   `period ∈ [0, periods_per_day)`.
//! - **Exam**: `(date, session)` for every non-Sunday date of an exam window,
//!   Morning before Afternoon.
//!
//! [`SlotOccupancy`] is the per-slot index of resources already in use; the
//! allocators consult it before accepting a placement.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Day names for weekly day indices (0 = Monday).
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A (day, period) cell of the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeeklySlot {
    /// Day index (0-based).
    pub day: usize,
    /// Period index within the day (0-based).
    pub period: usize,
}

impl WeeklySlot {
    /// Creates a weekly slot.
    pub fn new(day: usize, period: usize) -> Self {
        Self { day, period }
    }

    /// Every slot of a `days × periods` week, day-major.
    pub fn all(days: usize, periods: usize) -> Vec<Self> {
        (0..days)
            .flat_map(|day| (0..periods).map(move |period| Self { day, period }))
            .collect()
    }

    /// Whether the slot lies inside a `days × periods` week.
    #[inline]
    pub fn in_bounds(&self, days: usize, periods: usize) -> bool {
        self.day < days && self.period < periods
    }

    /// Day name, or `Day <n>` beyond Sunday.
    pub fn day_name(&self) -> String {
        DAY_NAMES
            .get(self.day)
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("Day {}", self.day + 1))
    }
}

/// Exam session within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExamSession {
    Morning,
    Afternoon,
}

impl fmt::Display for ExamSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Morning => f.write_str("Morning"),
            Self::Afternoon => f.write_str("Afternoon"),
        }
    }
}

/// A (date, session) exam slot.
///
/// Ordering is chronological: by date, then Morning before Afternoon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExamSlot {
    pub date: NaiveDate,
    pub session: ExamSession,
}

impl ExamSlot {
    /// Creates an exam slot.
    pub fn new(date: NaiveDate, session: ExamSession) -> Self {
        Self { date, session }
    }
}

/// Enumerates exam slots for `[start, end]` inclusive.
///
/// Every non-Sunday date contributes a Morning and an Afternoon slot, in date
/// order. An inverted range yields no slots.
///
/// ```
/// use chrono::NaiveDate;
/// use u_timetable::models::exam_slots;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(); // Monday
/// let end = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();   // Sunday
/// assert_eq!(exam_slots(start, end).len(), 12);
/// ```
pub fn exam_slots(start: NaiveDate, end: NaiveDate) -> Vec<ExamSlot> {
    start
        .iter_days()
        .take_while(|date| *date <= end)
        .filter(|date| date.weekday() != Weekday::Sun)
        .flat_map(|date| {
            [
                ExamSlot::new(date, ExamSession::Morning),
                ExamSlot::new(date, ExamSession::Afternoon),
            ]
        })
        .collect()
}

/// Exact comparison of free-form time-slot labels such as `"09:30 - 10:30"`.
///
/// Both sides must agree on one canonical rendering; no normalization is
/// attempted.
#[inline]
pub fn time_slots_match(a: &str, b: &str) -> bool {
    a == b
}

/// Per-slot index of occupied resource ids (faculty, halls, invigilators).
///
/// Owned by a single engine invocation.
#[derive(Debug, Clone)]
pub struct SlotOccupancy<S: Eq + Hash> {
    taken: HashMap<S, HashSet<String>>,
}

impl<S: Eq + Hash> Default for SlotOccupancy<S> {
    fn default() -> Self {
        Self {
            taken: HashMap::new(),
        }
    }
}

impl<S: Eq + Hash + Copy> SlotOccupancy<S> {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `resource_id` is already used in `slot`.
    pub fn is_taken(&self, slot: S, resource_id: &str) -> bool {
        self.taken
            .get(&slot)
            .is_some_and(|ids| ids.contains(resource_id))
    }

    /// Marks `resource_id` as used in `slot`. Returns `false` if it already was.
    pub fn reserve(&mut self, slot: S, resource_id: &str) -> bool {
        self.taken
            .entry(slot)
            .or_default()
            .insert(resource_id.to_string())
    }

}
