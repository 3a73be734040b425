use super::*;
#[cfg(test)]
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// What to do with a rubric term when a student has no graded assignment
/// of this kind in the course.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum EmptyTermPolicy {
    /// The term contributes nothing to the cumulative grade.
    #[default]
    Zero,
    /// The cumulative grade cannot be computed.
    Reject,
}

/// Outcome of a cumulative grade computation: the grade just computed,
/// and every grade cached for the student afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct GradeUpdate {
    pub course: CourseId,
    pub grade: Grade,
    pub all_grades: BTreeMap<CourseId, Grade>,
}

/// Owner of every student, teacher, course and assignment, and keeper of
/// the links between them.
#[derive(Debug)]
pub struct School {
    students: Vec<Student>,
    teachers: Vec<Teacher>,
    courses: Vec<Course>,
    assignments: Vec<Assignment>,
    codes: Codes,
    rng: StdRng,
    empty_term: EmptyTermPolicy,
}

impl School {
    pub fn new(rng: StdRng, empty_term: EmptyTermPolicy) -> School {
        School {
            students: Vec::new(),
            teachers: Vec::new(),
            courses: Vec::new(),
            assignments: Vec::new(),
            codes: Codes::new(),
            rng,
            empty_term,
        }
    }

    #[cfg(test)]
    pub fn seeded(seed: u64) -> School {
        School::new(StdRng::seed_from_u64(seed), EmptyTermPolicy::default())
    }

    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn student(&self, StudentId(student): StudentId) -> &Student {
        &self.students[student]
    }

    pub fn teacher(&self, TeacherId(teacher): TeacherId) -> &Teacher {
        &self.teachers[teacher]
    }

    pub fn course(&self, CourseId(course): CourseId) -> &Course {
        &self.courses[course]
    }

    pub fn assignment(&self, AssignmentId(assignment): AssignmentId) -> &Assignment {
        &self.assignments[assignment]
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn all_students(&self) -> Vec<StudentId> {
        (0..self.students.len()).map(StudentId).collect()
    }

    pub fn all_teachers(&self) -> Vec<TeacherId> {
        (0..self.teachers.len()).map(TeacherId).collect()
    }

    pub fn all_courses(&self) -> Vec<CourseId> {
        (0..self.courses.len()).map(CourseId).collect()
    }

    pub fn add_student(&mut self, name: &str) -> StudentId {
        let id = StudentId(self.students.len());
        let code = self.codes.generate(&mut self.rng, "s", 6);
        self.students.push(Student::new(id, code, name.to_owned()));
        id
    }

    pub fn add_teacher(&mut self, name: &str) -> TeacherId {
        let id = TeacherId(self.teachers.len());
        let code = self.codes.generate(&mut self.rng, "t", 5);
        self.teachers.push(Teacher::new(id, code, name.to_owned()));
        id
    }

    /// Add a course with a random rubric.
    pub fn add_course(&mut self, name: &str, slot: u32) -> CourseId {
        let rubric = Rubric::random(&mut self.rng);
        self.add_course_with_rubric(name, slot, rubric)
    }

    pub fn add_course_with_rubric(&mut self, name: &str, slot: u32, rubric: Rubric) -> CourseId {
        let id = CourseId(self.courses.len());
        let code = self.codes.generate(&mut self.rng, "c", 5);
        self.courses.push(Course {
            id,
            code,
            name: name.to_owned(),
            slot,
            rubric,
            teacher: None,
            students: Vec::new(),
            assignments: Vec::new(),
        });
        id
    }

    /// Replace the roster of a course. Students leaving the roster are
    /// unenrolled from the course, newcomers are enrolled.
    pub fn set_students(&mut self, course: CourseId, students: &[StudentId]) {
        let mut roster = Vec::with_capacity(students.len());
        for &student in students {
            assert!(student.0 < self.students.len(), "unknown student {student:?}");
            if !roster.contains(&student) {
                roster.push(student);
            }
        }
        let previous = std::mem::replace(&mut self.courses[course.0].students, roster.clone());
        for student in previous {
            if !roster.contains(&student) {
                debug!(student = %self.student(student), course = %self.course(course), "unenrolling student");
                self.students[student.0].remove_course(course);
            }
        }
        for student in roster {
            self.students[student.0].add_course(course);
        }
    }

    /// Replace the teacher of a course.
    pub fn set_teacher(&mut self, course: CourseId, teacher: TeacherId) {
        assert!(teacher.0 < self.teachers.len(), "unknown teacher {teacher:?}");
        if let Some(previous) = self.courses[course.0].teacher.replace(teacher) {
            if previous != teacher {
                debug!(teacher = %self.teacher(previous), course = %self.course(course), "replacing teacher");
                self.teachers[previous.0].remove_course(course);
            }
        }
        self.teachers[teacher.0].add_course(course);
    }

    /// Create an assignment and give every enrolled student the grade
    /// chosen by `source`.
    pub fn create_assignment<G: GradeSource + ?Sized>(
        &mut self,
        course: CourseId,
        kind: AssignmentKind,
        time: u32,
        source: &mut G,
    ) -> AssignmentId {
        let assignment = self.new_assignment(course, kind, time);
        let grades = self.courses[course.0]
            .students
            .iter()
            .map(|&s| source.grade(&self.students[s.0], &assignment))
            .collect();
        self.record_assignment(assignment, grades)
    }

    fn new_assignment(&mut self, course: CourseId, kind: AssignmentKind, time: u32) -> Assignment {
        assert!(course.0 < self.courses.len(), "unknown course {course:?}");
        Assignment {
            id: AssignmentId(self.assignments.len()),
            code: self.codes.generate(&mut self.rng, "a", 5),
            course,
            kind,
            time,
        }
    }

    /// Store an assignment along with one grade per student of the course
    /// roster, in roster order.
    fn record_assignment(&mut self, assignment: Assignment, grades: Vec<Grade>) -> AssignmentId {
        let id = assignment.id;
        let course = assignment.course;
        let roster = &self.courses[course.0].students;
        assert_eq!(roster.len(), grades.len(), "one grade per student is needed");
        assert!(
            grades.iter().all(|g| (0.0..=1.0).contains(g)),
            "grades must lie in [0, 1]"
        );
        trace!(
            assignment = %assignment.code,
            kind = %assignment.kind,
            time = assignment.time,
            course = %self.courses[course.0],
            students = roster.len(),
            "creating assignment",
        );
        for (&student, grade) in roster.iter().zip(grades) {
            self.students[student.0].add_assignment(course, id, grade);
        }
        self.courses[course.0].assignments.push(id);
        self.assignments.push(assignment);
        id
    }

    fn not_enrolled(&self, student: StudentId, course: CourseId) -> SchoolError {
        SchoolError::NotEnrolled {
            student: self.student(student).code.clone(),
            course: self.course(course).code.clone(),
        }
    }

    /// Weighted grade of a student in a course, from the mean grade
    /// obtained for every assignment kind. Nothing gets cached.
    pub fn compute_grade(&self, student: StudentId, course: CourseId) -> Result<Grade, SchoolError> {
        let s = self.student(student);
        if !s.is_enrolled_in(course) {
            return Err(self.not_enrolled(student, course));
        }
        let rubric = self.course(course).rubric;
        let mut total = 0.0;
        for kind in AssignmentKind::ALL {
            let grades = s
                .record(course)
                .iter()
                .filter(|e| self.assignment(e.assignment).kind == kind)
                .map(|e| e.grade)
                .collect::<Vec<_>>();
            if grades.is_empty() {
                match self.empty_term {
                    EmptyTermPolicy::Zero => continue,
                    EmptyTermPolicy::Reject => {
                        return Err(SchoolError::EmptyRubricTerm {
                            student: s.code.clone(),
                            course: self.course(course).code.clone(),
                            kind,
                        });
                    }
                }
            }
            let mean = grades.iter().sum::<f64>() / grades.len() as f64;
            total += mean * rubric.weight(kind);
        }
        Ok(total)
    }

    /// Compute the cumulative grade of a student in a course and cache it.
    pub fn cumulative_grade(
        &mut self,
        student: StudentId,
        course: CourseId,
    ) -> Result<GradeUpdate, SchoolError> {
        let grade = self.compute_grade(student, course)?;
        let s = &mut self.students[student.0];
        s.cache_grade(course, grade);
        Ok(GradeUpdate {
            course,
            grade,
            all_grades: s.grades().clone(),
        })
    }

    /// Recompute the cumulative grade of every course a student is
    /// enrolled in. The cache is only updated if all of them succeed.
    pub fn course_grades(
        &mut self,
        student: StudentId,
    ) -> Result<BTreeMap<CourseId, Grade>, SchoolError> {
        let grades = self
            .student(student)
            .courses()
            .iter()
            .map(|&course| self.compute_grade(student, course).map(|g| (course, g)))
            .collect::<Result<Vec<_>, SchoolError>>()?;
        let s = &mut self.students[student.0];
        for (course, grade) in grades {
            s.cache_grade(course, grade);
        }
        Ok(s.grades().clone())
    }

    /// Cumulative grade of every student of a course, in roster order.
    /// The cache is only updated if all of them succeed.
    pub fn student_grades(
        &mut self,
        course: CourseId,
    ) -> Result<Vec<(StudentId, Grade)>, SchoolError> {
        let grades = self
            .course(course)
            .students()
            .iter()
            .map(|&student| self.compute_grade(student, course).map(|g| (student, g)))
            .collect::<Result<Vec<_>, SchoolError>>()?;
        for &(student, grade) in &grades {
            self.students[student.0].cache_grade(course, grade);
        }
        Ok(grades)
    }

    /// Number of students enrolled in all the courses of a teacher.
    pub fn student_count_for(&self, teacher: TeacherId) -> usize {
        self.teacher(teacher)
            .courses()
            .iter()
            .map(|&c| self.course(c).students().len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AssignmentKind::{Homework, Test};

    fn rubric(homework: f64, test: f64) -> Rubric {
        Rubric::with_weights([(Homework, homework), (Test, test)])
    }

    fn grades_of(school: &School, student: StudentId, course: CourseId) -> Vec<Grade> {
        school
            .student(student)
            .record(course)
            .iter()
            .map(|e| e.grade)
            .collect()
    }

    #[test]
    fn test_enrollment_round_trip() {
        let mut school = School::seeded(0);
        let (s1, s2) = (school.add_student("s1"), school.add_student("s2"));
        let c = school.add_course("math", 1);
        school.set_students(c, &[s1, s2]);
        assert_eq!(school.course(c).students(), &[s1, s2]);
        assert!(school.student(s1).is_enrolled_in(c));
        assert!(school.student(s2).is_enrolled_in(c));
    }

    #[test]
    fn test_roster_replacement_removes_stale_links() {
        let mut school = School::seeded(0);
        let (s1, s2, s3) = (
            school.add_student("s1"),
            school.add_student("s2"),
            school.add_student("s3"),
        );
        let c = school.add_course("math", 1);
        school.set_students(c, &[s1, s2]);
        school.create_assignment(c, Homework, 1, &mut FixedGrades(0.5));
        school.cumulative_grade(s1, c).unwrap();
        school.set_students(c, &[s2, s3, s3]);
        assert_eq!(school.course(c).students(), &[s2, s3]);
        assert!(!school.student(s1).is_enrolled_in(c));
        assert!(school.student(s1).grades().is_empty());
        assert_eq!(school.student(s1).record(c).len(), 1);
        assert!(matches!(
            school.cumulative_grade(s1, c),
            Err(SchoolError::NotEnrolled { .. })
        ));
        assert!(school.student(s3).is_enrolled_in(c));
    }

    #[test]
    fn test_teacher_replacement() {
        let mut school = School::seeded(0);
        let (t1, t2) = (school.add_teacher("t1"), school.add_teacher("t2"));
        let c = school.add_course("math", 1);
        school.set_teacher(c, t1);
        assert_eq!(school.course(c).teacher(), Some(t1));
        assert_eq!(school.teacher(t1).courses(), &[c]);
        school.set_teacher(c, t1);
        assert_eq!(school.teacher(t1).courses(), &[c]);
        school.set_teacher(c, t2);
        assert_eq!(school.course(c).teacher(), Some(t2));
        assert!(school.teacher(t1).courses().is_empty());
        assert_eq!(school.teacher(t2).courses(), &[c]);
    }

    #[test]
    fn test_assignment_fan_out() {
        let mut school = School::seeded(5);
        let students = (0..4).map(|_| school.add_student("")).collect::<Vec<_>>();
        let c = school.add_course("math", 1);
        school.set_students(c, &students);
        let mut rng = StdRng::seed_from_u64(5);
        let a = school.create_assignment(c, Test, 10, &mut RandomGrades(&mut rng));
        assert_eq!(school.course(c).assignments(), &[a]);
        for &s in &students {
            let record = school.student(s).record(c);
            assert_eq!(record.len(), 1);
            assert_eq!(record[0].assignment, a);
            assert!((0.0..1.0).contains(&record[0].grade));
        }
        let assignment = school.assignment(a);
        assert_eq!((assignment.kind, assignment.time, assignment.course), (Test, 10, c));
    }

    #[test]
    fn test_weighted_scenario() {
        let mut school = School::seeded(1);
        let s = school.add_student("s");
        let c = school.add_course_with_rubric("math", 1, rubric(0.4, 0.6));
        school.set_students(c, &[s]);
        school.create_assignment(c, Homework, 1, &mut FixedGrades(0.3));
        school.create_assignment(c, Test, 2, &mut FixedGrades(0.9));
        let update = school.cumulative_grade(s, c).unwrap();
        assert_eq!(update.course, c);
        assert!((update.grade - (0.4 * 0.3 + 0.6 * 0.9)).abs() < 1e-12);
        assert_eq!(update.all_grades.get(&c), Some(&update.grade));
    }

    #[test]
    fn test_weighted_scenario_random_grades() {
        let mut school = School::seeded(2);
        let s = school.add_student("s");
        let c = school.add_course_with_rubric("math", 1, rubric(0.4, 0.6));
        school.set_students(c, &[s]);
        let mut rng = StdRng::seed_from_u64(2);
        school.create_assignment(c, Homework, 1, &mut RandomGrades(&mut rng));
        school.create_assignment(c, Test, 2, &mut RandomGrades(&mut rng));
        let g = grades_of(&school, s, c);
        let grade = school.cumulative_grade(s, c).unwrap().grade;
        assert!((grade - (0.4 * g[0] + 0.6 * g[1])).abs() < 1e-12);
    }

    #[test]
    fn test_mean_per_kind() {
        let mut school = School::seeded(3);
        let s = school.add_student("s");
        let c = school.add_course_with_rubric("math", 1, rubric(0.5, 0.5));
        school.set_students(c, &[s]);
        for g in [0.2, 0.4, 0.9] {
            school.create_assignment(c, Homework, 1, &mut FixedGrades(g));
        }
        school.create_assignment(c, Test, 2, &mut FixedGrades(1.0));
        let grade = school.cumulative_grade(s, c).unwrap().grade;
        assert!((grade - (0.5 * 0.5 + 0.5 * 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_grade_is_bounded_and_idempotent() {
        let mut school = School::seeded(4);
        let students = (0..5).map(|_| school.add_student("")).collect::<Vec<_>>();
        let c = school.add_course("math", 1);
        school.set_students(c, &students);
        let mut rng = StdRng::seed_from_u64(4);
        for t in 0..6 {
            let kind = AssignmentKind::ALL[t % 2];
            school.create_assignment(c, kind, t as u32, &mut RandomGrades(&mut rng));
        }
        for &s in &students {
            let first = school.cumulative_grade(s, c).unwrap().grade;
            let second = school.cumulative_grade(s, c).unwrap().grade;
            assert_eq!(first, second);
            assert!((0.0..=1.0).contains(&first));
        }
    }

    #[test]
    fn test_empty_terms_count_as_zero() {
        let mut school = School::seeded(6);
        let s = school.add_student("s");
        let c = school.add_course_with_rubric("math", 1, rubric(0.4, 0.6));
        school.set_students(c, &[s]);
        assert_eq!(school.cumulative_grade(s, c).unwrap().grade, 0.0);
        school.create_assignment(c, Test, 2, &mut FixedGrades(0.5));
        let grade = school.cumulative_grade(s, c).unwrap().grade;
        assert!((grade - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_empty_terms_rejected() {
        let mut school = School::new(StdRng::seed_from_u64(6), EmptyTermPolicy::Reject);
        let s = school.add_student("s");
        let c = school.add_course_with_rubric("math", 1, rubric(0.4, 0.6));
        school.set_students(c, &[s]);
        school.create_assignment(c, Homework, 1, &mut FixedGrades(0.5));
        assert!(matches!(
            school.cumulative_grade(s, c),
            Err(SchoolError::EmptyRubricTerm { kind: Test, .. })
        ));
        assert!(school.student(s).grades().is_empty());
        school.create_assignment(c, Test, 2, &mut FixedGrades(0.5));
        assert!((school.cumulative_grade(s, c).unwrap().grade - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_course_grades_rejected_leaves_cache_alone() {
        let mut school = School::new(StdRng::seed_from_u64(9), EmptyTermPolicy::Reject);
        let s = school.add_student("s");
        let c1 = school.add_course_with_rubric("math", 1, rubric(0.5, 0.5));
        let c2 = school.add_course_with_rubric("art", 2, rubric(0.5, 0.5));
        school.set_students(c1, &[s]);
        school.set_students(c2, &[s]);
        school.create_assignment(c1, Homework, 1, &mut FixedGrades(0.2));
        school.create_assignment(c1, Test, 2, &mut FixedGrades(0.2));
        school.cumulative_grade(s, c1).unwrap();
        let before = school.student(s).grades().clone();
        school.create_assignment(c1, Test, 3, &mut FixedGrades(1.0));
        school.create_assignment(c2, Homework, 3, &mut FixedGrades(0.7));
        assert!(matches!(
            school.course_grades(s),
            Err(SchoolError::EmptyRubricTerm { kind: Test, .. })
        ));
        assert_eq!(school.student(s).grades(), &before);
        school.create_assignment(c2, Test, 4, &mut FixedGrades(0.7));
        let grades = school.course_grades(s).unwrap();
        assert!((grades[&c1] - 0.4).abs() < 1e-12);
        assert!((grades[&c2] - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_student_grades_rejected_leaves_cache_alone() {
        let mut school = School::new(StdRng::seed_from_u64(10), EmptyTermPolicy::Reject);
        let (s1, s2) = (school.add_student("s1"), school.add_student("s2"));
        let c = school.add_course_with_rubric("math", 1, rubric(0.5, 0.5));
        school.set_students(c, &[s1]);
        school.create_assignment(c, Homework, 1, &mut FixedGrades(0.2));
        school.create_assignment(c, Test, 2, &mut FixedGrades(0.2));
        school.cumulative_grade(s1, c).unwrap();
        school.set_students(c, &[s1, s2]);
        school.create_assignment(c, Test, 3, &mut FixedGrades(1.0));
        assert!(matches!(
            school.student_grades(c),
            Err(SchoolError::EmptyRubricTerm { kind: Homework, .. })
        ));
        assert_eq!(school.student(s1).grades(), &BTreeMap::from([(c, 0.2)]));
        assert!(school.student(s2).grades().is_empty());
        school.create_assignment(c, Homework, 4, &mut FixedGrades(0.6));
        let grades = school.student_grades(c).unwrap();
        assert_eq!(grades.len(), 2);
        assert!((school.student(s1).grades()[&c] - grades[0].1).abs() < 1e-12);
        assert!((grades[1].1 - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_not_enrolled() {
        let mut school = School::seeded(7);
        let s = school.add_student("s");
        let c = school.add_course("math", 1);
        let err = school.cumulative_grade(s, c).unwrap_err();
        assert_eq!(
            err,
            SchoolError::NotEnrolled {
                student: school.student(s).code.clone(),
                course: school.course(c).code.clone(),
            }
        );
    }

    #[test]
    fn test_course_and_student_grades() {
        let mut school = School::seeded(8);
        let (s1, s2) = (school.add_student("s1"), school.add_student("s2"));
        let c1 = school.add_course_with_rubric("math", 1, rubric(1.0, 0.0));
        let c2 = school.add_course_with_rubric("art", 2, rubric(0.0, 1.0));
        school.set_students(c1, &[s1, s2]);
        school.set_students(c2, &[s2]);
        school.create_assignment(c1, Homework, 1, &mut FixedGrades(0.25));
        school.create_assignment(c2, Test, 1, &mut FixedGrades(0.75));
        let grades = school.course_grades(s2).unwrap();
        assert_eq!(grades, BTreeMap::from([(c1, 0.25), (c2, 0.75)]));
        assert_eq!(
            school.student_grades(c1).unwrap(),
            vec![(s1, 0.25), (s2, 0.25)]
        );
        let t = school.add_teacher("t");
        school.set_teacher(c1, t);
        school.set_teacher(c2, t);
        assert_eq!(school.student_count_for(t), 3);
    }
}
