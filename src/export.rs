use crate::model::{Grade, School};
use eyre::{Result, WrapErr};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct GradeRow<'a> {
    course: &'a str,
    course_name: &'a str,
    student: &'a str,
    student_name: &'a str,
    grade: Grade,
}

/// Write one CSV line per computed cumulative grade, course by course
/// in roster order.
pub fn export_grades<W: Write>(school: &School, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for course in school.courses() {
        for &s in course.students() {
            let student = school.student(s);
            if let Some(&grade) = student.grades().get(&course.id) {
                wtr.serialize(GradeRow {
                    course: &course.code,
                    course_name: &course.name,
                    student: &student.code,
                    student_name: &student.name,
                    grade,
                })
                .wrap_err("cannot write grade")?;
            }
        }
    }
    wtr.flush().wrap_err("cannot flush grades")?;
    Ok(())
}

#[test]
fn test_export_grades() {
    use crate::model::{AssignmentKind, FixedGrades, Rubric};

    let mut school = School::seeded(41);
    let (s1, s2) = (school.add_student("Ada"), school.add_student("Bob"));
    let rubric = Rubric::with_weights([(AssignmentKind::Homework, 1.0)]);
    let c = school.add_course_with_rubric("math", 0, rubric);
    school.set_students(c, &[s1, s2]);
    school.create_assignment(c, AssignmentKind::Homework, 0, &mut FixedGrades(0.5));
    school.cumulative_grade(s1, c).unwrap();
    let mut out = Vec::new();
    export_grades(&school, &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();
    let lines = out.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "course,course_name,student,student_name,grade");
    assert_eq!(
        lines[1],
        format!(
            "{},math,{},Ada,0.5",
            school.course(c).code,
            school.student(s1).code
        )
    );
    assert_eq!(lines.len(), 2);
}
