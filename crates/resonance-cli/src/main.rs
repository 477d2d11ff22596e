//! Resonance CLI - Main entry point

use clap::Parser;
use resonance_cli::{Cli, Commands, Config};
use resonance_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load .env first so it can feed clap's env-backed flags; a missing file is normal
    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Handle markdown help generation
    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    // Ensure a command is provided
    let Some(ref command) = cli.command else {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    };

    // Verbose mode logs debug events; otherwise only warnings and errors
    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn })
        .output(LogOutput::Console)
        .log_file_prefix("resonance")
        .filter_directives("hyper=warn,reqwest=warn")
        .build();

    // Environment variables take precedence
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI works without logging, so setup errors are ignored
    let log_guard = init_logging(&log_config).ok().flatten();

    if let Err(e) = execute_command(&cli, command).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        // process::exit skips destructors; flush file logs first
        drop(log_guard);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, command: &Commands) -> resonance_cli::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.metadata_dir {
        config.set_metadata_dir(dir.clone());
    }

    match command {
        Commands::Generate => {
            resonance_cli::commands::generate::run(&config).await?;
        },

        Commands::Upload { file } => {
            resonance_cli::commands::upload::run(&config, file.clone()).await?;
        },

        Commands::Validate { file } => {
            resonance_cli::commands::validate::run(&config, file.clone()).await?;
        },
    }

    Ok(())
}
