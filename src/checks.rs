use crate::model::School;
use eyre::{Result, ensure};
use tracing::warn;

/// Check that every link between courses, students and teachers is
/// present on both sides, and that recorded grades point to assignments
/// of the right course.
pub fn check_consistency(school: &School) -> Result<()> {
    for course in school.courses() {
        if let Some(t) = course.teacher() {
            ensure!(
                school.teacher(t).courses().contains(&course.id),
                "course {course} is missing from the courses of its teacher {}",
                school.teacher(t)
            );
        }
        for &s in course.students() {
            ensure!(
                school.student(s).is_enrolled_in(course.id),
                "student {} is on the roster of course {course} but not enrolled",
                school.student(s)
            );
        }
    }
    for teacher in school.teachers() {
        for &c in teacher.courses() {
            ensure!(
                school.course(c).teacher() == Some(teacher.id),
                "teacher {teacher} lists course {} taught by someone else",
                school.course(c)
            );
        }
    }
    for student in school.students() {
        for &c in student.courses() {
            ensure!(
                school.course(c).has_student(student.id),
                "student {student} is enrolled in course {} but not on its roster",
                school.course(c)
            );
        }
        for course in school.courses() {
            for entry in student.record(course.id) {
                ensure!(
                    course.assignments().contains(&entry.assignment)
                        && school.assignment(entry.assignment).course == course.id,
                    "student {student} has a grade in course {course} for foreign assignment {}",
                    school.assignment(entry.assignment).code
                );
            }
        }
    }
    Ok(())
}

/// Warn about students who have nothing graded for a kind of assignment
/// which counts in a course rubric.
pub fn warn_empty_terms(school: &School) {
    for course in school.courses() {
        for (kind, weight) in course.rubric.iter() {
            if weight == 0.0 {
                continue;
            }
            for &s in course.students() {
                let graded = school
                    .student(s)
                    .record(course.id)
                    .iter()
                    .any(|e| school.assignment(e.assignment).kind == kind);
                if !graded {
                    warn!(
                        "student {} has no {kind} graded in course {course} (weight {weight:.3})",
                        school.student(s)
                    );
                }
            }
        }
    }
}

#[test]
fn test_consistent_after_reassignments() {
    use crate::model::{AssignmentKind, RandomGrades};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    let mut school = School::seeded(21);
    let students = (0..6).map(|_| school.add_student("")).collect::<Vec<_>>();
    let teachers = (0..2).map(|_| school.add_teacher("")).collect::<Vec<_>>();
    let c = school.add_course("math", 0);
    school.set_students(c, &students[..4]);
    school.set_teacher(c, teachers[0]);
    let mut rng = StdRng::seed_from_u64(21);
    school.create_assignment(c, AssignmentKind::Homework, 1, &mut RandomGrades(&mut rng));
    school.set_students(c, &students[2..]);
    school.set_teacher(c, teachers[1]);
    school.create_assignment(c, AssignmentKind::Test, 2, &mut RandomGrades(&mut rng));
    check_consistency(&school).unwrap();
    warn_empty_terms(&school);
}
