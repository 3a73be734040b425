use crate::model::{AssignmentKind, EmptyTermPolicy, Rubric};
use eyre::{Result, WrapErr, ensure};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub seed: Option<u64>,
    pub simulation: SimulationConfig,
    pub grading: GradingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub teachers: usize,
    pub students: usize,
    pub courses: usize,
    pub students_per_course: usize,
    pub homeworks: usize,
    pub tests: usize,
    pub term_length: u32,
}

impl Default for SimulationConfig {
    fn default() -> SimulationConfig {
        SimulationConfig {
            teachers: 3,
            students: 30,
            courses: 5,
            students_per_course: 12,
            homeworks: 6,
            tests: 2,
            term_length: 100,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GradingConfig {
    pub empty_term: EmptyTermPolicy,
    /// Weight of every assignment kind, shared by all courses. Courses get
    /// a random rubric when absent.
    pub rubric: Option<BTreeMap<String, f64>>,
}

impl GradingConfig {
    pub fn rubric(&self) -> Result<Option<Rubric>> {
        let Some(weights) = &self.rubric else {
            return Ok(None);
        };
        let mut parsed = Vec::with_capacity(weights.len());
        for (kind, &weight) in weights {
            let kind = kind
                .parse::<AssignmentKind>()
                .wrap_err("invalid grading.rubric entry")?;
            ensure!(weight >= 0.0, "negative weight {weight} for {kind} in grading.rubric");
            parsed.push((kind, weight));
        }
        Ok(Some(Rubric::with_weights(parsed)))
    }
}

impl Config {
    pub fn load(file_name: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(file_name)
            .wrap_err_with(|| format!("cannot load configuration file {}", file_name.display()))?;
        Config::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content).wrap_err("cannot parse configuration")?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        let s = &self.simulation;
        ensure!(
            s.students_per_course <= s.students,
            "cannot enroll {} students per course out of {} students",
            s.students_per_course,
            s.students
        );
        ensure!(
            s.courses == 0 || s.teachers > 0,
            "{} courses need at least one teacher",
            s.courses
        );
        ensure!(
            s.term_length > 0,
            "simulation.term_length must be positive"
        );
        self.grading.rubric()?;
        Ok(())
    }
}
