//! Input validation for timetabling problems.
//!
//! Checks structural integrity of subjects, faculty and halls before an
//! allocator runs. Detects:
//! - Duplicate IDs
//! - Subjects assigned to faculty that doesn't exist
//! - Subjects that request zero weekly periods
//! - Halls that seat nobody
//!
//! Every issue is collected; validation never stops at the first one.

use std::collections::HashSet;

use crate::models::{Faculty, Hall, Subject};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A subject references a faculty member that doesn't exist.
    UnknownFaculty,
    /// A subject explicitly requests zero periods per week.
    ZeroWeeklyHours,
    /// A hall has zero capacity.
    ZeroCapacityHall,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input of a weekly timetable run.
///
/// Checks:
/// 1. No duplicate subject IDs
/// 2. No duplicate faculty IDs
/// 3. Every subject's faculty reference points to a known faculty member
/// 4. No subject requests zero weekly hours
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_weekly_input(subjects: &[Subject], faculty: &[Faculty]) -> ValidationResult {
    let mut errors = Vec::new();

    check_unique("subject", subjects.iter().map(|s| s.id.as_str()), &mut errors);
    let faculty_ids = check_unique("faculty", faculty.iter().map(|f| f.id.as_str()), &mut errors);

    for subject in subjects {
        if let Some(fid) = &subject.faculty_id {
            if !faculty_ids.contains(fid.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownFaculty,
                    format!("Subject '{}' references unknown faculty '{}'", subject.id, fid),
                ));
            }
        }
        if subject.weekly_hours == Some(0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroWeeklyHours,
                format!("Subject '{}' requests zero weekly hours", subject.id),
            ));
        }
    }

    finish(errors)
}

/// Validates the input of an exam assignment run.
///
/// Checks:
/// 1. No duplicate subject, hall or faculty IDs
/// 2. No hall with zero capacity
pub fn validate_exam_input(
    subjects: &[Subject],
    halls: &[Hall],
    faculty: &[Faculty],
) -> ValidationResult {
    let mut errors = Vec::new();

    check_unique("subject", subjects.iter().map(|s| s.id.as_str()), &mut errors);
    check_unique("hall", halls.iter().map(|h| h.id.as_str()), &mut errors);
    check_unique("faculty", faculty.iter().map(|f| f.id.as_str()), &mut errors);

    for hall in halls.iter().filter(|h| h.capacity == 0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroCapacityHall,
            format!("Hall '{}' has zero capacity", hall.id),
        ));
    }

    finish(errors)
}

/// Records a `DuplicateId` error per repeated id; returns the distinct ids.
fn check_unique<'a>(
    entity: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {entity} ID: {id}"),
            ));
        }
    }
    seen
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_faculty() -> Vec<Faculty> {
        vec![
            Faculty::new("F1", "Dr. Rao"),
            Faculty::new("F2", "Dr. Iyer"),
        ]
    }

    fn sample_subjects() -> Vec<Subject> {
        vec![
            Subject::new("S1").with_name("Maths").with_faculty("F1").with_weekly_hours(4),
            Subject::new("S2").with_name("Physics").with_faculty("F2"),
            Subject::new("S3").with_name("Library"),
        ]
    }

    #[test]
    fn test_valid_weekly_input() {
        assert!(validate_weekly_input(&sample_subjects(), &sample_faculty()).is_ok());
    }

    #[test]
    fn test_duplicate_subject_id() {
        let mut subjects = sample_subjects();
        subjects.push(Subject::new("S1"));

        let errors = validate_weekly_input(&subjects, &sample_faculty()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("subject")));
    }

    #[test]
    fn test_duplicate_faculty_id() {
        let faculty = vec![Faculty::new("F1", "A"), Faculty::new("F1", "B")];
        let subjects = vec![Subject::new("S1").with_faculty("F1")];

        let errors = validate_weekly_input(&subjects, &faculty).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("faculty"));
    }

    #[test]
    fn test_unknown_faculty_reference() {
        let subjects = vec![Subject::new("S1").with_faculty("NONEXISTENT")];

        let errors = validate_weekly_input(&subjects, &sample_faculty()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownFaculty));
    }

    #[test]
    fn test_zero_weekly_hours() {
        let subjects = vec![Subject::new("S1").with_weekly_hours(0)];

        let errors = validate_weekly_input(&subjects, &sample_faculty()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::ZeroWeeklyHours));
    }

    #[test]
    fn test_zero_capacity_hall() {
        let halls = vec![Hall::new("H1", "Main", 120), Hall::new("H2", "Closet", 0)];

        let errors =
            validate_exam_input(&sample_subjects(), &halls, &sample_faculty()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::ZeroCapacityHall);
        assert!(errors[0].message.contains("H2"));
    }

    #[test]
    fn test_valid_exam_input_ignores_faculty_links() {
        let subjects = vec![Subject::new("S1").with_faculty("NONEXISTENT")];
        let halls = vec![Hall::new("H1", "Main", 120)];
        assert!(validate_exam_input(&subjects, &halls, &sample_faculty()).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let subjects = vec![
            Subject::new("S1").with_weekly_hours(0),
            Subject::new("S1").with_faculty("UNKNOWN"),
        ];

        let errors = validate_weekly_input(&subjects, &[]).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
