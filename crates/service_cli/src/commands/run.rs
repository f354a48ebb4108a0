//! Run command implementation
//!
//! Drives a fresh session for the requested number of trials and prints
//! the statistics snapshot with evenly spaced convergence checkpoints.

use serde::Serialize;
use sim_core::stats::{CategoryCount, ConvergencePoint};
use sim_core::{GeneratorKind, RandomSource, Session, Statistics};
use tracing::info;

use super::{resolve_process_id, RunArgs, Settings};
use crate::config::{CliConfig, OutputFormat};
use crate::{CliError, Result};

/// Width of the longest histogram bar, in characters
const BAR_WIDTH: f64 = 40.0;

/// Band half-width in standard errors
const BAND_SIGMAS: f64 = 2.0;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunReport<'a> {
    process_id: &'a str,
    generator: GeneratorKind,
    seed: Option<u64>,
    checkpoints: Vec<ConvergencePoint>,
    statistics: &'a Statistics,
}

/// Run the run command
pub fn run(config: &CliConfig, args: &RunArgs) -> Result<()> {
    let settings = Settings::resolve(config, &args.simulation)?;
    let checkpoints = args.checkpoints.unwrap_or(config.checkpoints);
    if checkpoints == 0 {
        return Err(CliError::InvalidArgument(
            "checkpoints must be greater than 0".to_string(),
        ));
    }

    let mut session =
        Session::with_builtin_processes(RandomSource::new(settings.generator, settings.seed));
    let process_id = resolve_process_id(session.registry(), &settings.process)?;
    session.select_process(&process_id);
    session.set_coin_probability(settings.probability)?;
    session.set_number_of_dice(settings.number_of_dice);

    info!(
        process = %process_id,
        count = settings.count,
        generator = %settings.generator,
        "Running trials"
    );
    session.run_trials(settings.count)?;

    let statistics = session.statistics().ok_or_else(|| {
        CliError::InvalidArgument(format!("Process '{}' is not active", process_id))
    })?;
    let seed = session.source().seed();

    match settings.format {
        OutputFormat::Json => {
            let report = RunReport {
                process_id: &process_id,
                generator: settings.generator,
                seed,
                checkpoints: statistics.convergence().checkpoints(checkpoints),
                statistics: &statistics,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            let name = session
                .active_process()
                .map(|p| p.config().name().to_string())
                .unwrap_or_else(|| process_id.clone());
            println!("Process:   {} ({})", name, process_id);
            match seed {
                Some(seed) => println!("Generator: {} (seed {})", settings.generator, seed),
                None => println!("Generator: {}", settings.generator),
            }
            println!("Trials:    {}", statistics.total());
            println!();
            print_histogram(&statistics.histogram());
            println!();
            for line in summary_lines(&statistics) {
                println!("{}", line);
            }
            println!();
            print_convergence(&statistics, checkpoints);
        }
    }
    Ok(())
}

fn print_histogram(buckets: &[CategoryCount]) {
    let peak = buckets.iter().map(|b| b.percentage).fold(0.0, f64::max);
    println!("{:<10} {:>8} {:>9}", "Outcome", "Count", "Percent");
    for bucket in buckets {
        let width = if peak > 0.0 {
            (bucket.percentage / peak * BAR_WIDTH).round() as usize
        } else {
            0
        };
        println!(
            "{:<10} {:>8} {:>8.2}% {}",
            bucket.label,
            bucket.count,
            bucket.percentage,
            "#".repeat(width)
        );
    }
}

fn print_convergence(statistics: &Statistics, checkpoints: usize) {
    let series = statistics.convergence();
    println!(
        "Convergence (expected {:.6}, band ±{} SE)",
        series.expected(),
        BAND_SIGMAS
    );
    println!(
        "{:>8} {:>12} {:>12} {:>12} {:>12}",
        "Trial", "Value", "SE", "Lower", "Upper"
    );
    for point in series.checkpoints(checkpoints) {
        let half = BAND_SIGMAS * point.standard_error;
        println!(
            "{:>8} {:>12.6} {:>12.6} {:>12.6} {:>12.6}",
            point.trial,
            point.value,
            point.standard_error,
            series.expected() - half,
            series.expected() + half
        );
    }
}

/// Headline figures of a snapshot, one per line.
fn summary_lines(statistics: &Statistics) -> Vec<String> {
    match statistics {
        Statistics::CoinFlip(s) => vec![
            format!("Heads:       {} ({:.2}%)", s.heads, s.heads_percentage),
            format!("Tails:       {} ({:.2}%)", s.tails, s.tails_percentage),
            format!(
                "Proportion:  {:.6} (expected {:.6}, SE {:.6})",
                s.proportion, s.expected_proportion, s.standard_error
            ),
        ],
        Statistics::DiceRoll(s) => vec![
            format!(
                "Mean:        {:.6} (expected {:.1}, SE {:.6})",
                s.mean, s.expected_value, s.standard_error
            ),
            format!("Std dev:     {:.6}", s.std_dev),
        ],
        Statistics::SumDice(s) => vec![
            format!(
                "Dice:        {} (sums {}..={})",
                s.number_of_dice, s.min_sum, s.max_sum
            ),
            format!(
                "Average:     {:.6} (expected {:.1}, SE {:.6})",
                s.average, s.expected_value, s.standard_error
            ),
            format!(
                "Std dev:     {:.6} (expected {:.6})",
                s.std_dev, s.expected_std_dev
            ),
        ],
        Statistics::PiSimulation(s) => vec![
            format!(
                "Inside:      {} of {} ({:.2}%)",
                s.inside, s.total, s.inside_percentage
            ),
            format!(
                "Estimate:    {:.6} (error {:.6}, SE {:.6})",
                s.estimate, s.error, s.standard_error
            ),
        ],
    }
}
