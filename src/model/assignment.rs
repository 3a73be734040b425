use super::{CourseId, SchoolError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct AssignmentId(pub usize);

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentKind {
    Homework,
    Test,
}

impl AssignmentKind {
    /// Every kind, in the order used to build rubrics and grades.
    pub const ALL: [AssignmentKind; 2] = [AssignmentKind::Homework, AssignmentKind::Test];

    pub fn index(self) -> usize {
        match self {
            AssignmentKind::Homework => 0,
            AssignmentKind::Test => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AssignmentKind::Homework => "homework",
            AssignmentKind::Test => "test",
        }
    }
}

impl fmt::Display for AssignmentKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AssignmentKind {
    type Err = SchoolError;

    fn from_str(s: &str) -> Result<AssignmentKind, SchoolError> {
        AssignmentKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SchoolError::InvalidKind(s.to_owned()))
    }
}

/// A graded task, owned by the course which created it.
#[derive(Clone, Debug)]
pub struct Assignment {
    pub id: AssignmentId,
    pub code: String,
    pub course: CourseId,
    pub kind: AssignmentKind,
    pub time: u32,
}

#[test]
fn test_parse_kind() {
    assert_eq!("homework".parse::<AssignmentKind>(), Ok(AssignmentKind::Homework));
    assert_eq!(" Test ".parse::<AssignmentKind>(), Ok(AssignmentKind::Test));
    assert_eq!(
        "quiz".parse::<AssignmentKind>(),
        Err(SchoolError::InvalidKind("quiz".into()))
    );
}
