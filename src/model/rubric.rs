use super::AssignmentKind;
use rand::Rng;
use rand_distr::{Distribution, Exp1};
use std::fmt;

/// Weight of every assignment kind in a course cumulative grade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rubric {
    weights: [f64; AssignmentKind::ALL.len()],
}

impl Rubric {
    /// Draw a point uniformly on the probability simplex, i.e. from a
    /// Dirichlet distribution whose concentration parameters are all 1.
    /// Such a draw is a set of independent `Exp(1)` values divided by
    /// their sum.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Rubric {
        loop {
            let mut weights = [0.0; AssignmentKind::ALL.len()];
            for w in &mut weights {
                *w = Exp1.sample(rng);
            }
            let total: f64 = weights.iter().sum();
            if total > 0.0 {
                for w in &mut weights {
                    *w /= total;
                }
                return Rubric { weights };
            }
        }
    }

    /// Build a rubric from explicit weights. Kinds which are not mentioned
    /// weigh nothing. Weights are used as is, without normalization.
    pub fn with_weights<I>(weights: I) -> Rubric
    where
        I: IntoIterator<Item = (AssignmentKind, f64)>,
    {
        let mut rubric = Rubric {
            weights: [0.0; AssignmentKind::ALL.len()],
        };
        for (kind, weight) in weights {
            assert!(weight >= 0.0, "negative weight for {kind}");
            rubric.weights[kind.index()] = weight;
        }
        rubric
    }

    pub fn weight(&self, kind: AssignmentKind) -> f64 {
        self.weights[kind.index()]
    }

    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AssignmentKind, f64)> + '_ {
        AssignmentKind::ALL.into_iter().map(|k| (k, self.weight(k)))
    }
}

impl fmt::Display for Rubric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let parts = self
            .iter()
            .map(|(k, w)| format!("{k}: {w:.3}"))
            .collect::<Vec<_>>();
        write!(f, "{{{}}}", parts.join(", "))
    }
}
