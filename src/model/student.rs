use super::{AssignmentId, CourseId, Grade};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StudentId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradeEntry {
    pub assignment: AssignmentId,
    pub grade: Grade,
}

#[derive(Clone, Debug)]
pub struct Student {
    pub id: StudentId,
    pub code: String,
    pub name: String,
    courses: Vec<CourseId>,
    record: HashMap<CourseId, Vec<GradeEntry>>,
    grades: BTreeMap<CourseId, Grade>,
}

impl Student {
    pub fn new(id: StudentId, code: String, name: String) -> Student {
        Student {
            id,
            code,
            name,
            courses: Vec::new(),
            record: HashMap::new(),
            grades: BTreeMap::new(),
        }
    }

    /// Enrolled courses, in enrollment order.
    pub fn courses(&self) -> &[CourseId] {
        &self.courses
    }

    pub fn is_enrolled_in(&self, course: CourseId) -> bool {
        self.courses.contains(&course)
    }

    pub fn add_course(&mut self, course: CourseId) {
        if !self.is_enrolled_in(course) {
            self.courses.push(course);
        }
    }

    /// Forget the enrollment and the cached grade. Recorded grades stay.
    pub fn remove_course(&mut self, course: CourseId) {
        self.courses.retain(|&c| c != course);
        self.grades.remove(&course);
    }

    pub fn add_assignment(&mut self, course: CourseId, assignment: AssignmentId, grade: Grade) {
        self.record
            .entry(course)
            .or_default()
            .push(GradeEntry { assignment, grade });
    }

    pub fn record(&self, course: CourseId) -> &[GradeEntry] {
        self.record.get(&course).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Last computed cumulative grade of every course.
    pub fn grades(&self) -> &BTreeMap<CourseId, Grade> {
        &self.grades
    }

    pub(super) fn cache_grade(&mut self, course: CourseId, grade: Grade) {
        self.grades.insert(course, grade);
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{} ({})", self.name, self.code)
        }
    }
}

#[test]
fn test_enrollment_links() {
    let mut s = Student::new(StudentId(0), "s-abcdef".into(), "Ada".into());
    s.add_course(CourseId(2));
    s.add_course(CourseId(1));
    s.add_course(CourseId(2));
    assert_eq!(s.courses(), &[CourseId(2), CourseId(1)]);
    s.add_assignment(CourseId(2), AssignmentId(0), 0.5);
    s.cache_grade(CourseId(2), 0.5);
    s.remove_course(CourseId(2));
    assert_eq!(s.courses(), &[CourseId(1)]);
    assert!(s.grades().is_empty());
    assert_eq!(s.record(CourseId(2)).len(), 1);
    assert_eq!(s.to_string(), "Ada (s-abcdef)");
}
