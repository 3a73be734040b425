pub use self::assignment::{Assignment, AssignmentId, AssignmentKind};
pub use self::codes::Codes;
pub use self::course::{Course, CourseId};
pub use self::error::SchoolError;
#[cfg(test)]
pub use self::grade_source::FixedGrades;
pub use self::grade_source::{GradeSource, RandomGrades};
pub use self::rubric::Rubric;
pub use self::school::{EmptyTermPolicy, School};
pub use self::student::{Student, StudentId};
pub use self::teacher::{Teacher, TeacherId};

/// A grade, in `[0, 1]`.
pub type Grade = f64;

mod assignment;
mod codes;
mod course;
mod error;
mod grade_source;
mod rubric;
mod school;
mod student;
mod teacher;
