use crate::config::SimulationConfig;
use crate::model::{
    AssignmentKind, CourseId, GradeSource, RandomGrades, Rubric, School, StudentId, TeacherId,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand::seq::IndexedRandom;
use std::iter;
use tracing::{debug, info, instrument};

const SUBJECTS: [&str; 8] = [
    "Algebra",
    "Biology",
    "Chemistry",
    "Drawing",
    "English",
    "French",
    "Geography",
    "History",
];

const NAMES: [&str; 12] = [
    "Alice", "Bruno", "Chloé", "David", "Emma", "Farid", "Gabriel", "Hugo", "Inès", "Jade",
    "Karim", "Léa",
];

/// Number of distinct scheduling slots courses are spread over.
const SLOTS: u32 = 10;

fn name_for(names: &[&str], index: usize) -> String {
    let round = index / names.len();
    if round == 0 {
        names[index].to_owned()
    } else {
        format!("{} {}", names[index % names.len()], round + 1)
    }
}

/// Fill the school with teachers, students and courses, enroll students,
/// staff courses and run a whole term of assignments. Courses share
/// `rubric` if given, or get a random one each.
#[instrument(skip_all)]
pub fn populate(school: &mut School, config: &SimulationConfig, rubric: Option<Rubric>) {
    let teachers = (0..config.teachers)
        .map(|i| school.add_teacher(&name_for(&NAMES, i)))
        .collect::<Vec<_>>();
    let students = (0..config.students)
        .map(|i| school.add_student(&name_for(&NAMES, i)))
        .collect::<Vec<_>>();
    let courses = (0..config.courses)
        .map(|i| {
            let slot = school.rng_mut().random_range(0..SLOTS);
            let name = name_for(&SUBJECTS, i);
            match rubric {
                Some(rubric) => school.add_course_with_rubric(&name, slot, rubric),
                None => school.add_course(&name, slot),
            }
        })
        .collect::<Vec<_>>();
    info!(
        teachers = teachers.len(),
        students = students.len(),
        courses = courses.len(),
        "school created"
    );
    enroll(school, &courses, &students, config.students_per_course);
    staff(school, &courses, &teachers);
    let mut grades = StdRng::seed_from_u64(school.rng_mut().random());
    for &course in &courses {
        run_term(school, course, config, &mut RandomGrades(&mut grades));
    }
}

/// Give every course a random roster.
#[instrument(skip_all)]
fn enroll(school: &mut School, courses: &[CourseId], students: &[StudentId], per_course: usize) {
    for &course in courses {
        let roster = students
            .choose_multiple(school.rng_mut(), per_course)
            .copied()
            .collect::<Vec<_>>();
        debug!(course = %school.course(course), students = roster.len(), "enrolling");
        school.set_students(course, &roster);
    }
}

/// Give every course a random teacher.
#[instrument(skip_all)]
fn staff(school: &mut School, courses: &[CourseId], teachers: &[TeacherId]) {
    for &course in courses {
        if let Some(&teacher) = teachers.choose(school.rng_mut()) {
            school.set_teacher(course, teacher);
            debug!(course = %school.course(course), teacher = %school.teacher(teacher), "staffing");
        }
    }
}

/// Schedule the homeworks and tests of a course at random times, and
/// create them in chronological order.
fn run_term<G: GradeSource>(
    school: &mut School,
    course: CourseId,
    config: &SimulationConfig,
    grades: &mut G,
) {
    let mut schedule = iter::repeat_n(AssignmentKind::Homework, config.homeworks)
        .chain(iter::repeat_n(AssignmentKind::Test, config.tests))
        .map(|kind| (school.rng_mut().random_range(0..config.term_length), kind))
        .collect::<Vec<_>>();
    schedule.sort_unstable();
    for (time, kind) in schedule {
        school.create_assignment(course, kind, time, grades);
    }
    debug!(
        course = %school.course(course),
        assignments = school.course(course).assignments().len(),
        "term over"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::check_consistency;

    fn config() -> SimulationConfig {
        SimulationConfig {
            teachers: 2,
            students: 10,
            courses: 3,
            students_per_course: 4,
            homeworks: 3,
            tests: 1,
            term_length: 50,
        }
    }

    #[test]
    fn test_populate() {
        let mut school = School::seeded(11);
        populate(&mut school, &config(), None);
        assert_eq!(school.teachers().len(), 2);
        assert_eq!(school.students().len(), 10);
        assert_eq!(school.courses().len(), 3);
        for course in school.courses() {
            assert_eq!(course.students().len(), 4);
            assert_eq!(course.assignments().len(), 4);
            assert!(course.teacher().is_some());
            assert!(course.slot < SLOTS);
            let times = course
                .assignments()
                .iter()
                .map(|&a| school.assignment(a).time)
                .collect::<Vec<_>>();
            assert!(times.is_sorted());
            assert!(times.iter().all(|&t| t < 50));
            for &s in course.students() {
                assert_eq!(school.student(s).record(course.id).len(), 4);
            }
        }
        check_consistency(&school).unwrap();
    }

    #[test]
    fn test_deterministic() {
        let run = || {
            let mut school = School::seeded(12);
            populate(&mut school, &config(), None);
            school
                .all_students()
                .into_iter()
                .map(|s| school.course_grades(s).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_shared_rubric() {
        let rubric =
            Rubric::with_weights([(AssignmentKind::Homework, 0.4), (AssignmentKind::Test, 0.6)]);
        let mut school = School::seeded(13);
        populate(&mut school, &config(), Some(rubric));
        assert!(school.courses().iter().all(|c| c.rubric == rubric));
    }

    #[test]
    fn test_names() {
        assert_eq!(name_for(&SUBJECTS, 1), "Biology");
        assert_eq!(name_for(&SUBJECTS, 9), "Biology 2");
    }
}
