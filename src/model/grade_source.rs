use super::{Assignment, Grade, Student};
use rand::Rng;

/// Where the grades of a newly created assignment come from.
pub trait GradeSource {
    fn grade(&mut self, student: &Student, assignment: &Assignment) -> Grade;
}

/// Independent uniform grades in `[0, 1)`.
pub struct RandomGrades<'a, R: Rng + ?Sized>(pub &'a mut R);

impl<R: Rng + ?Sized> GradeSource for RandomGrades<'_, R> {
    fn grade(&mut self, _student: &Student, _assignment: &Assignment) -> Grade {
        self.0.random::<f64>()
    }
}

/// The same grade for everyone.
#[cfg(test)]
#[derive(Clone, Copy, Debug)]
pub struct FixedGrades(pub Grade);

#[cfg(test)]
impl GradeSource for FixedGrades {
    fn grade(&mut self, _student: &Student, _assignment: &Assignment) -> Grade {
        self.0
    }
}
