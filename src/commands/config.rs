//! Config command - locate, show or initialize the configuration file

use crate::cli::ConfigCommands;
use crate::config::ChartsearchConfig;
use crate::{ChartsearchError, Result};
use colored::Colorize;
use std::path::Path;

/// Execute the config command
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized or written,
/// or `init` would overwrite a file without `--force`.
pub fn execute(config: &ChartsearchConfig, path: &Path, command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            println!("{}", path.display());
        }
        ConfigCommands::Show => {
            print!("{}", config.to_toml()?);
        }
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                return Err(ChartsearchError::InvalidInput(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            config.save_to(path)?;
            println!("{} {}", "Wrote".green(), path.display());
        }
    }
    Ok(())
}
