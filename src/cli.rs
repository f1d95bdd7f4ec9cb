//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for chartsearch using the `clap` crate.
//!
//! # Commands
//!
//! - **tui**: Interactive search screen (default)
//! - **query**: Run one search through the controller and print the dropdown
//! - **config**: Show, locate or initialize the configuration file
//! - **completions**: Generate shell completion scripts

use crate::search::SearchScope;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the config file location
    Path,

    /// Print the effective configuration as TOML
    Show,

    /// Write the effective configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "chartsearch")]
#[command(about = "Debounced typeahead search over clinical records", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use this config file instead of the default location
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Use this catalog file (overrides config)
    #[arg(long = "catalog", value_name = "FILE", global = true)]
    pub catalog: Option<PathBuf>,

    /// Log at debug level
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Open the interactive search screen (default)
    #[command(visible_alias = "t")]
    Tui {
        /// Initial scope (ALL, PATIENT, ENCOUNTER, ...)
        #[arg(short = 's', long = "scope", value_name = "SCOPE")]
        scope: Option<SearchScope>,
    },

    /// Search once and print the grouped results
    #[command(visible_alias = "q")]
    Query {
        /// Search text; `*` lists everything
        #[arg(value_name = "TEXT")]
        text: String,

        /// Restrict results to one type
        #[arg(short = 's', long = "scope", value_name = "SCOPE")]
        scope: Option<SearchScope>,

        /// Move the cursor down N times and select, as if by keyboard
        #[arg(short = 'p', long = "pick", value_name = "N")]
        pick: Option<usize>,

        /// Print JSON instead of the grouped listing
        #[arg(long = "json")]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to the search screen if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Tui { scope: None })
    }

    /// Whether the command takes over the terminal
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        matches!(self.get_command(), Commands::Tui { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ResultKind;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_tui() {
        let cli = Cli::try_parse_from(["chartsearch"]).unwrap();
        assert_eq!(cli.get_command(), Commands::Tui { scope: None });
        assert!(cli.is_interactive());
    }

    #[test]
    fn test_query_arguments() {
        let cli = Cli::try_parse_from([
            "chartsearch",
            "query",
            "jane",
            "--scope",
            "patient",
            "--pick",
            "1",
            "--json",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(!cli.is_interactive());
        assert_eq!(
            cli.get_command(),
            Commands::Query {
                text: "jane".to_string(),
                scope: Some(SearchScope::Only(ResultKind::Patient)),
                pick: Some(1),
                json: true,
            }
        );
    }

    #[test]
    fn test_unknown_scope_rejected() {
        assert!(Cli::try_parse_from(["chartsearch", "query", "jane", "--scope", "labs"]).is_err());
    }

    #[test]
    fn test_config_subcommands() {
        let cli = Cli::try_parse_from(["chartsearch", "--config", "/tmp/c.toml", "config", "init", "-f"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert_eq!(
            cli.get_command(),
            Commands::Config {
                command: ConfigCommands::Init { force: true }
            }
        );
    }
}
