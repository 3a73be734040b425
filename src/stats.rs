use crate::model::{Grade, StudentId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CourseSummary {
    pub graded: usize,
    pub mean: Grade,
    pub min: Grade,
    pub max: Grade,
}

/// Summarize the cumulative grades of the students of a course.
pub fn course_summary(grades: &[(StudentId, Grade)]) -> Option<CourseSummary> {
    if grades.is_empty() {
        return None;
    }
    let values = grades.iter().map(|&(_, g)| g);
    Some(CourseSummary {
        graded: grades.len(),
        mean: values.clone().sum::<f64>() / grades.len() as f64,
        min: values.clone().fold(f64::INFINITY, f64::min),
        max: values.fold(f64::NEG_INFINITY, f64::max),
    })
}

#[test]
fn test_course_summary() {
    use crate::model::{AssignmentKind, FixedGrades, Rubric, School};

    let mut school = School::seeded(31);
    let students = (0..3).map(|_| school.add_student("")).collect::<Vec<_>>();
    let rubric = Rubric::with_weights([(AssignmentKind::Test, 1.0)]);
    let c = school.add_course_with_rubric("math", 0, rubric);
    assert_eq!(course_summary(&school.student_grades(c).unwrap()), None);
    for (n, g) in [0.2, 0.5, 0.8].into_iter().enumerate() {
        school.set_students(c, &students[..=n]);
        school.create_assignment(c, AssignmentKind::Test, 0, &mut FixedGrades(g));
    }
    // Test grades: first student 0.2/0.5/0.8, second 0.5/0.8, third 0.8.
    let summary = course_summary(&school.student_grades(c).unwrap()).unwrap();
    assert_eq!(summary.graded, 3);
    assert!((summary.mean - (0.5 + 0.65 + 0.8) / 3.0).abs() < 1e-12);
    assert!((summary.min - 0.5).abs() < 1e-12);
    assert!((summary.max - 0.8).abs() < 1e-12);
}
