//! Batch command implementation
//!
//! Stateless request: raw outcome list plus aggregate counts.

use sim_core::batch::{run_batch, BatchReport, BatchRequest};
use sim_core::{ProcessRegistry, RandomSource};
use tracing::info;

use super::{resolve_process_id, Settings, SimulationArgs};
use crate::config::{CliConfig, OutputFormat};
use crate::{CliError, Result};

/// Outcomes printed per row in table output
const PER_ROW: usize = 10;

/// Run the batch command
pub fn run(config: &CliConfig, args: &SimulationArgs) -> Result<()> {
    let settings = Settings::resolve(config, args)?;
    let registry = ProcessRegistry::with_builtin_processes();
    let process_id = resolve_process_id(&registry, &settings.process)?;

    let request = BatchRequest::new(process_id, settings.count)
        .with_probability(settings.probability)
        .with_number_of_dice(settings.number_of_dice);
    let mut source = RandomSource::new(settings.generator, settings.seed);

    info!(process = %request.process_id, count = request.count, "Running batch");
    let report = run_batch(&registry, &mut source, &request)?.ok_or_else(|| {
        CliError::InvalidArgument(format!("Unknown process '{}'", request.process_id))
    })?;

    match settings.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print_table(&registry, &report),
    }
    Ok(())
}

fn print_table(registry: &ProcessRegistry, report: &BatchReport) {
    let labels: Vec<String> = match registry.get(&report.process_id) {
        Some(process) => report
            .results
            .iter()
            .map(|outcome| process.format_result(outcome))
            .collect(),
        None => report.results.iter().map(ToString::to_string).collect(),
    };

    println!("Process: {}  Total: {}", report.process_id, report.total);
    println!();
    for row in labels.chunks(PER_ROW) {
        println!("  {}", row.join("  "));
    }
    println!();
    println!("{:<10} {:>8} {:>9}", "Outcome", "Count", "Percent");
    for bucket in &report.counts {
        println!(
            "{:<10} {:>8} {:>8.2}%",
            bucket.label, bucket.count, bucket.percentage
        );
    }
}
