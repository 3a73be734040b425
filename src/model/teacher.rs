use super::CourseId;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TeacherId(pub usize);

#[derive(Clone, Debug)]
pub struct Teacher {
    pub id: TeacherId,
    pub code: String,
    pub name: String,
    courses: Vec<CourseId>,
}

impl Teacher {
    pub fn new(id: TeacherId, code: String, name: String) -> Teacher {
        Teacher {
            id,
            code,
            name,
            courses: Vec::new(),
        }
    }

    pub fn courses(&self) -> &[CourseId] {
        &self.courses
    }

    pub fn add_course(&mut self, course: CourseId) {
        if !self.courses.contains(&course) {
            self.courses.push(course);
        }
    }

    pub fn remove_course(&mut self, course: CourseId) {
        self.courses.retain(|&c| c != course);
    }
}

impl fmt::Display for Teacher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{} ({})", self.name, self.code)
        }
    }
}
