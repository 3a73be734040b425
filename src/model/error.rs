use super::AssignmentKind;
use thiserror::Error;

/// Errors reported by school operations. None of them leaves the school
/// in a partially updated state.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchoolError {
    #[error("unknown assignment kind: {0}")]
    InvalidKind(String),
    #[error("student {student} is not enrolled in course {course}")]
    NotEnrolled { student: String, course: String },
    #[error("student {student} has no {kind} graded in course {course}")]
    EmptyRubricTerm {
        student: String,
        course: String,
        kind: AssignmentKind,
    },
}
