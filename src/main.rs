use crate::checks::{check_consistency, warn_empty_terms};
use crate::config::Config;
use crate::display::{display_course, display_stats, display_student, display_teacher};
use crate::model::School;
use crate::stats::course_summary;
use clap::Parser;
use eyre::WrapErr;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::filter::LevelFilter;

mod checks;
mod config;
mod display;
mod export;
mod model;
mod simulation;
mod stats;

#[derive(Parser)]
#[command(version, author, about)]
struct Options {
    /// Use FILE as configuration instead of the default settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Seed the random generator, overriding the configuration
    #[arg(long)]
    seed: Option<u64>,
    /// Export the cumulative grades as CSV to FILE
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,
    /// Set verbosity level
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let options = Options::parse();
    let level = match options.verbose {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        3 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let config = match &options.config {
        Some(file_name) => Config::load(file_name)?,
        None => Config::default(),
    };
    let seed = options.seed.or(config.seed).unwrap_or_else(rand::random);
    info!(seed, "generating school");
    let rubric = config.grading.rubric()?;
    if let Some(rubric) = rubric.filter(|r| (r.total() - 1.0).abs() > 1e-9) {
        warn!(%rubric, total = rubric.total(), "configured rubric weights do not sum to 1");
    }
    let mut school = School::new(StdRng::seed_from_u64(seed), config.grading.empty_term);
    simulation::populate(&mut school, &config.simulation, rubric);
    check_consistency(&school).wrap_err("generated school is inconsistent")?;
    warn_empty_terms(&school);
    for course in school.all_courses() {
        for student in school.course(course).students().to_vec() {
            match school.cumulative_grade(student, course) {
                Ok(update) => debug!(
                    student = %school.student(student),
                    course = %school.course(update.course),
                    grade = update.grade,
                    graded_courses = update.all_grades.len(),
                    "cumulative grade computed"
                ),
                Err(e) => warn!("{e}"),
            }
        }
    }
    let mut summaries = Vec::new();
    for course in school.all_courses() {
        let summary = match school.student_grades(course) {
            Ok(grades) => course_summary(&grades),
            Err(e) => {
                warn!("cannot grade every student of {}: {e}", school.course(course));
                None
            }
        };
        summaries.push((course, summary));
    }
    for student in school.all_students() {
        if let Err(e) = school.course_grades(student) {
            warn!("cannot compute all grades of {}: {e}", school.student(student));
        }
    }
    for teacher in school.all_teachers() {
        display_teacher(&school, teacher);
    }
    for course in school.all_courses() {
        display_course(&school, course);
    }
    for student in school.all_students() {
        display_student(&school, student);
    }
    display_stats(&school, &summaries);
    if let Some(file_name) = &options.csv {
        let file = File::create(file_name)
            .wrap_err_with(|| format!("cannot create {}", file_name.display()))?;
        export::export_grades(&school, file)?;
        info!(file = %file_name.display(), "grades exported");
    }
    Ok(())
}
