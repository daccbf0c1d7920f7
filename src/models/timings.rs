//! Daily period clock.
//!
//! Turns college timings (first bell, period length, gaps, breaks) into the
//! time-slot labels stored with timetable records, e.g. `"09:00-10:00"`.
//!
//! # Break handling
//! A break is honoured only when it starts exactly at the time the next
//! period would start; the period is then pushed to the break's end.

use chrono::{NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Break classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakKind {
    Lunch,
    Short,
}

/// A break in the teaching day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Break {
    pub name: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub kind: BreakKind,
}

impl Break {
    /// Creates a break.
    pub fn new(name: impl Into<String>, start: NaiveTime, end: NaiveTime, kind: BreakKind) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            kind,
        }
    }
}

/// College timing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollegeTimings {
    /// Start of the first period.
    pub start_time: NaiveTime,
    /// Periods per day.
    pub num_periods: usize,
    /// Length of one period (minutes).
    pub period_minutes: u32,
    /// Gap between consecutive periods (minutes).
    #[serde(default)]
    pub gap_minutes: u32,
    #[serde(default)]
    pub breaks: Vec<Break>,
}

impl CollegeTimings {
    /// Creates timings with no gaps or breaks.
    pub fn new(start_time: NaiveTime, num_periods: usize, period_minutes: u32) -> Self {
        Self {
            start_time,
            num_periods,
            period_minutes,
            gap_minutes: 0,
            breaks: Vec::new(),
        }
    }

    /// Sets the gap between periods.
    pub fn with_gap(mut self, minutes: u32) -> Self {
        self.gap_minutes = minutes;
        self
    }

    /// Adds a break.
    pub fn with_break(mut self, brk: Break) -> Self {
        self.breaks.push(brk);
        self
    }

    /// `(start, end)` of every period, in order.
    pub fn periods(&self) -> Vec<(NaiveTime, NaiveTime)> {
        let mut breaks: Vec<&Break> = self.breaks.iter().collect();
        breaks.sort_by_key(|b| b.start);

        let period = TimeDelta::minutes(i64::from(self.period_minutes));
        let gap = TimeDelta::minutes(i64::from(self.gap_minutes));

        let mut periods = Vec::with_capacity(self.num_periods);
        let mut current = self.start_time;
        for i in 0..self.num_periods {
            if let Some(brk) = breaks.iter().find(|b| b.start == current) {
                current = brk.end;
            }
            let end = current + period;
            periods.push((current, end));
            if i + 1 < self.num_periods {
                current = end + gap;
            }
        }
        periods
    }

    /// Time-slot labels, `"HH:MM-HH:MM"`.
    pub fn slot_labels(&self) -> Vec<String> {
        self.periods()
            .into_iter()
            .map(|(start, end)| format!("{}-{}", start.format("%H:%M"), end.format("%H:%M")))
            .collect()
    }

    /// Period index of a label produced by [`slot_labels`](Self::slot_labels).
    pub fn period_of(&self, label: &str) -> Option<usize> {
        self.slot_labels().iter().position(|l| l == label)
    }
}
