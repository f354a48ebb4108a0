//! List command implementation

use serde::Serialize;
use sim_core::ProcessRegistry;

use super::ListArgs;
use crate::config::{CliConfig, OutputFormat};
use crate::Result;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProcessEntry<'a> {
    id: &'a str,
    name: &'a str,
    description: Option<&'a str>,
    icon: Option<&'a str>,
    expected_value: f64,
}

/// Run the list command
pub fn run(config: &CliConfig, args: &ListArgs) -> Result<()> {
    let registry = ProcessRegistry::with_builtin_processes();
    let entries: Vec<ProcessEntry<'_>> = registry
        .iter()
        .map(|process| ProcessEntry {
            id: process.id(),
            name: process.config().name(),
            description: process.config().description(),
            icon: process.config().icon(),
            expected_value: process.expected_value(),
        })
        .collect();

    match args.format.unwrap_or(config.format) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Table => {
            println!("{:<16} {:<36} {:>10}", "ID", "Name", "Expected");
            println!("{}", "-".repeat(64));
            for entry in &entries {
                println!(
                    "{:<16} {:<36} {:>10.4}",
                    entry.id, entry.name, entry.expected_value
                );
                if let Some(description) = entry.description {
                    println!("{:<16} {}", "", description);
                }
            }
        }
    }
    Ok(())
}
