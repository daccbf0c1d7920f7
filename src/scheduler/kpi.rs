//! Weekly timetable quality metrics (KPIs).
//!
//! Computes timetable indicators from an optimized schedule and the
//! subjects it was built from.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Required units | Sum of required weekly periods over all subjects |
//! | Placed units | Number of schedule entries |
//! | Placement rate | placed / required |
//! | Daily loads | Periods per day over the whole week |
//! | Load std-dev | Population std-dev of the daily loads |
//! | Faculty loads | Weekly periods per faculty member |
//! | Faculty conflicts | (slot, faculty) pairs booked twice |
//! | Batch clashes | Slots holding more than one period |
//!
//! # Reference
//! Schaerf (1999), "A Survey of Automated Timetabling", Sec. 2

use std::collections::HashMap;

use crate::ga::population_std_dev;
use crate::models::{Subject, WeeklySchedule};

/// Weekly timetable performance indicators.
#[derive(Debug, Clone)]
pub struct TimetableKpi {
    /// Periods the subjects ask for.
    pub required_units: usize,
    /// Periods actually scheduled.
    pub placed_units: usize,
    /// Fraction of required periods scheduled (0.0..1.0).
    pub placement_rate: f64,
    /// Periods per day, index = day.
    pub daily_loads: Vec<usize>,
    /// Population std-dev of `daily_loads`.
    pub load_std_dev: f64,
    /// Weekly periods per faculty id.
    pub faculty_loads: HashMap<String, usize>,
    pub faculty_conflicts: usize,
    pub batch_clashes: usize,
}

impl TimetableKpi {
    /// Computes KPIs from a schedule and its input subjects.
    ///
    /// # Arguments
    /// * `schedule` - The optimized weekly schedule.
    /// * `subjects` - The input subjects (for required periods).
    /// * `days` - Days in the week the schedule was built for.
    pub fn calculate(schedule: &WeeklySchedule, subjects: &[Subject], days: usize) -> Self {
        let required_units: usize = subjects.iter().map(|s| s.required_periods() as usize).sum();
        let placed_units = schedule.entry_count();
        let placement_rate = if required_units == 0 {
            1.0
        } else {
            placed_units as f64 / required_units as f64
        };

        let daily_loads = schedule.daily_loads(days);
        let load_std_dev = population_std_dev(&daily_loads);

        let mut faculty_loads: HashMap<String, usize> = HashMap::new();
        for fid in schedule.entries.iter().filter_map(|e| e.faculty_id.as_ref()) {
            *faculty_loads.entry(fid.clone()).or_insert(0) += 1;
        }

        Self {
            required_units,
            placed_units,
            placement_rate,
            daily_loads,
            load_std_dev,
            faculty_loads,
            faculty_conflicts: schedule.faculty_conflicts().len(),
            batch_clashes: schedule.batch_clashes().len(),
        }
    }

    /// Heaviest weekly load of any faculty member.
    pub fn max_faculty_load(&self) -> usize {
        self.faculty_loads.values().copied().max().unwrap_or(0)
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_std_dev: f64, min_placement_rate: f64) -> bool {
        self.load_std_dev <= max_std_dev && self.placement_rate >= min_placement_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassAssignment, UNKNOWN_FACULTY};

    fn entry(day: usize, period: usize, subject: &str, faculty: Option<&str>) -> ClassAssignment {
        ClassAssignment {
            day,
            period,
            subject_id: subject.into(),
            subject_name: subject.into(),
            faculty_id: faculty.map(String::from),
            faculty_name: faculty.unwrap_or(UNKNOWN_FACULTY).into(),
        }
    }

    fn schedule(entries: Vec<ClassAssignment>) -> WeeklySchedule {
        WeeklySchedule {
            entries,
            ..WeeklySchedule::new()
        }
    }

    #[test]
    fn test_kpi_basic() {
        let subjects = vec![
            Subject::new("S1").with_weekly_hours(2).with_faculty("F1"),
            Subject::new("S2").with_weekly_hours(2).with_faculty("F2"),
        ];
        let s = schedule(vec![
            entry(0, 0, "S1", Some("F1")),
            entry(1, 0, "S1", Some("F1")),
            entry(2, 0, "S2", Some("F2")),
            entry(3, 0, "S2", Some("F2")),
        ]);

        let kpi = TimetableKpi::calculate(&s, &subjects, 4);
        assert_eq!(kpi.required_units, 4);
        assert_eq!(kpi.placed_units, 4);
        assert!((kpi.placement_rate - 1.0).abs() < 1e-10);
        assert_eq!(kpi.daily_loads, vec![1, 1, 1, 1]);
        assert!(kpi.load_std_dev.abs() < 1e-10);
        assert_eq!(kpi.faculty_loads["F1"], 2);
        assert_eq!(kpi.max_faculty_load(), 2);
        assert_eq!(kpi.faculty_conflicts, 0);
        assert_eq!(kpi.batch_clashes, 0);
    }

    #[test]
    fn test_kpi_imbalance_over_whole_week() {
        let subjects = vec![Subject::new("S1").with_weekly_hours(2)];
        let s = schedule(vec![entry(0, 0, "S1", None), entry(0, 1, "S1", None)]);

        // loads [2, 0]: mean 1, pstdev 1
        let kpi = TimetableKpi::calculate(&s, &subjects, 2);
        assert!((kpi.load_std_dev - 1.0).abs() < 1e-10);
        assert!(kpi.faculty_loads.is_empty());
        assert_eq!(kpi.max_faculty_load(), 0);
    }

    #[test]
    fn test_kpi_partial_placement() {
        let subjects = vec![Subject::new("S1").with_weekly_hours(4)];
        let s = schedule(vec![entry(0, 0, "S1", None)]);

        let kpi = TimetableKpi::calculate(&s, &subjects, 5);
        assert!((kpi.placement_rate - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_conflicts() {
        let subjects = vec![
            Subject::new("S1").with_faculty("F1"),
            Subject::new("S2").with_faculty("F1"),
        ];
        let s = schedule(vec![entry(0, 0, "S1", Some("F1")), entry(0, 0, "S2", Some("F1"))]);

        let kpi = TimetableKpi::calculate(&s, &subjects, 5);
        assert_eq!(kpi.faculty_conflicts, 1);
        assert_eq!(kpi.batch_clashes, 1);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = TimetableKpi::calculate(&WeeklySchedule::new(), &[], 5);
        assert_eq!(kpi.placed_units, 0);
        assert!((kpi.placement_rate - 1.0).abs() < 1e-10);
        assert_eq!(kpi.daily_loads, vec![0; 5]);
    }

    #[test]
    fn test_meets_thresholds() {
        let subjects = vec![Subject::new("S1").with_weekly_hours(4)];
        let s = schedule(vec![entry(0, 0, "S1", None), entry(0, 1, "S1", None)]);

        // loads [2, 0], pstdev 1; placement 0.5
        let kpi = TimetableKpi::calculate(&s, &subjects, 2);
        assert!(kpi.meets_thresholds(1.0, 0.5));
        assert!(!kpi.meets_thresholds(0.9, 0.5));
        assert!(!kpi.meets_thresholds(1.0, 0.6));
    }
}
