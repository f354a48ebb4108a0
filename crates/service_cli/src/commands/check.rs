//! Check command implementation
//!
//! Prints the configuration after file, environment and validation.

use std::path::Path;

use crate::config::{CliConfig, OutputFormat, DEFAULT_CONFIG_FILE};
use crate::Result;

/// Run the check command
pub fn run(config: &CliConfig, config_path: Option<&Path>) -> Result<()> {
    let source = match config_path {
        Some(path) => path.display().to_string(),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => DEFAULT_CONFIG_FILE.to_string(),
        None => "(defaults)".to_string(),
    };

    match config.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Table => {
            println!("Convergence CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("  Config source:   {}", source);
            println!("  Log level:       {}", config.log_level);
            println!("  Generator:       {}", config.generator);
            match config.seed {
                Some(seed) => println!("  Seed:            {}", seed),
                None => println!("  Seed:            (time-based)"),
            }
            println!("  Default process: {}", config.default_process);
            println!("  Dice:            {}", config.number_of_dice);
            println!("  Probability:     {}", config.probability);
            println!("  Checkpoints:     {}", config.checkpoints);
            println!("  Format:          {}", config.format);
            println!("Configuration OK");
        }
    }
    Ok(())
}
