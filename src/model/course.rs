use super::{AssignmentId, Rubric, StudentId, TeacherId};
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CourseId(pub usize);

#[derive(Clone, Debug)]
pub struct Course {
    pub id: CourseId,
    pub code: String,
    pub name: String,
    pub slot: u32,
    pub rubric: Rubric,
    pub(super) teacher: Option<TeacherId>,
    pub(super) students: Vec<StudentId>,
    pub(super) assignments: Vec<AssignmentId>,
}

impl Course {
    pub fn teacher(&self) -> Option<TeacherId> {
        self.teacher
    }

    /// Roster, in enrollment order.
    pub fn students(&self) -> &[StudentId] {
        &self.students
    }

    /// Assignments, in creation order.
    pub fn assignments(&self) -> &[AssignmentId] {
        &self.assignments
    }

    pub fn has_student(&self, student: StudentId) -> bool {
        self.students.contains(&student)
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{} ({})", self.name, self.code)
        }
    }
}
