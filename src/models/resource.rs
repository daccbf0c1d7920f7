//! Staff and room models.
//!
//! Faculty teach periods, invigilate exams and stand in as substitutes.
//! Halls seat exam sittings up to their capacity.

use serde::{Deserialize, Serialize};

/// A faculty (staff) member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faculty {
    /// Unique faculty identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Home department.
    #[serde(default)]
    pub department_id: Option<String>,
}

impl Faculty {
    /// Creates a faculty member.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department_id: None,
        }
    }

    /// Sets the department.
    pub fn with_department(mut self, department_id: impl Into<String>) -> Self {
        self.department_id = Some(department_id.into());
        self
    }
}

/// An exam hall.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hall {
    /// Unique hall identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Seats available for one sitting.
    pub capacity: u32,
}

impl Hall {
    /// Creates a hall.
    pub fn new(id: impl Into<String>, name: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capacity,
        }
    }

    /// Whether `students` can be seated in one sitting.
    #[inline]
    pub fn fits(&self, students: u32) -> bool {
        self.capacity >= students
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hall_fits() {
        let h = Hall::new("H1", "Main Hall", 60);
        assert!(h.fits(60));
        assert!(h.fits(1));
        assert!(!h.fits(61));
    }

    #[test]
    fn test_faculty_builder() {
        let f = Faculty::new("F1", "Dr. Rao").with_department("CSE");
        assert_eq!(f.department_id.as_deref(), Some("CSE"));
    }
}
