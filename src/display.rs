use crate::model::{CourseId, School, StudentId, TeacherId};
use crate::stats::CourseSummary;

pub fn display_student(school: &School, student: StudentId) {
    let s = school.student(student);
    println!("--- {} ---", s.code);
    println!("name: {}", s.name);
    let courses = s
        .courses()
        .iter()
        .map(|&c| school.course(c).code.as_str())
        .collect::<Vec<_>>();
    println!("courses: [{}]", courses.join(", "));
    let grades = s
        .grades()
        .iter()
        .map(|(&c, g)| format!("{}: {g:.3}", school.course(c).code))
        .collect::<Vec<_>>();
    println!("grades: [{}]", grades.join(", "));
    println!();
}

pub fn display_course(school: &School, course: CourseId) {
    let c = school.course(course);
    println!("--- {} ---", c.code);
    println!("name: {} (slot {})", c.name, c.slot);
    println!(
        "teacher: {}",
        c.teacher()
            .map_or("none", |t| school.teacher(t).code.as_str())
    );
    let students = c
        .students()
        .iter()
        .map(|&s| school.student(s).code.as_str())
        .collect::<Vec<_>>();
    println!("students: [{}]", students.join(", "));
    let assignments = c
        .assignments()
        .iter()
        .map(|&a| school.assignment(a).code.as_str())
        .collect::<Vec<_>>();
    println!("assignments: [{}]", assignments.join(", "));
    println!("rubric: {} (total {:.3})", c.rubric, c.rubric.total());
    println!();
}

pub fn display_teacher(school: &School, teacher: TeacherId) {
    let t = school.teacher(teacher);
    println!("--- {} ---", t.code);
    println!("name: {}", t.name);
    let courses = t
        .courses()
        .iter()
        .map(|&c| school.course(c).to_string())
        .collect::<Vec<_>>();
    println!("courses: [{}]", courses.join(", "));
    println!(
        "total number of students: {}",
        school.student_count_for(teacher)
    );
    println!();
}

pub fn display_stats(school: &School, summaries: &[(CourseId, Option<CourseSummary>)]) {
    let mut summaries = summaries.to_vec();
    summaries.sort_by_key(|&(c, _)| school.course(c).name.clone());
    println!("Cumulative grades per course:");
    for (c, summary) in summaries {
        match summary {
            Some(summary) => println!(
                "  - {}: {} graded, mean {:.3}, min {:.3}, max {:.3}",
                school.course(c),
                summary.graded,
                summary.mean,
                summary.min,
                summary.max
            ),
            None => println!("  - {}: no grade", school.course(c)),
        }
    }
}
