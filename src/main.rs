//! Chartsearch CLI application entry point
//!
//! Typeahead search over clinical records: an interactive terminal screen by
//! default, plus a one-shot `query` command for scripting.
//!
//! # Usage
//!
//! ```bash
//! # Open the search screen (default command)
//! chartsearch
//! chartsearch tui --scope PATIENT
//!
//! # Search once, print the grouped dropdown
//! chartsearch query "jane doe"
//! chartsearch query '*' --scope MEDICATION --json
//!
//! # Move the cursor down once and select
//! chartsearch query doe --pick 1
//!
//! # Configuration
//! chartsearch config show
//! chartsearch config init
//! ```
//!
//! # Configuration
//!
//! Settings are read from the user's config directory
//! (`~/.config/chartsearch/config.toml` on Linux); `CHARTSEARCH_*`
//! environment variables override individual keys.

use chartsearch::{
    ChartsearchError,
    cli::{Cli, Commands},
    commands::{self, query::QueryParams},
    config::ChartsearchConfig,
    logging::{self, LogTarget},
};
use clap::CommandFactory;
use std::io;
use tracing::debug;

type Result<T> = std::result::Result<T, ChartsearchError>;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let command = cli.get_command();

    // Completions need neither config nor logging
    if let Commands::Completions { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => ChartsearchConfig::config_path()?,
    };
    let mut config = ChartsearchConfig::load_from(&config_path)?;
    if let Some(catalog) = &cli.catalog {
        config.catalog = Some(catalog.clone());
    }

    // The search screen owns the terminal, so it only logs to a file
    let target = if cli.is_interactive() {
        LogTarget::File(config.log_path()?)
    } else {
        LogTarget::Stderr
    };
    let _guard = logging::init(&target, cli.verbose)?;
    debug!(config = %config_path.display(), "Configuration loaded");

    match command {
        Commands::Tui { scope } => commands::tui(&config, scope).await,
        Commands::Query {
            text,
            scope,
            pick,
            json,
        } => {
            commands::query(
                &config,
                QueryParams {
                    text,
                    scope,
                    pick,
                    json,
                },
            )
            .await
        }
        Commands::Config { command } => commands::config(&config, &config_path, &command),
        Commands::Completions { .. } => Ok(()),
    }
}
