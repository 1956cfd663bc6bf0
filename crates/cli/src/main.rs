//! MedQA CLI
//!
//! Main entry point for the medqa command-line tool.
//! Provides two thin front-ends for medical question answering with
//! dataset-vs-API routing: a one-shot `ask` command and an interactive
//! `repl`.

mod commands;
mod runtime;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ReplCommand};
use medqa_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// MedQA CLI - medical question answering with dataset/API routing
#[derive(Parser, Debug)]
#[command(name = "medqa")]
#[command(about = "Medical question answering with dataset/API routing", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "MEDQA_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "MEDQA_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a single question
    Ask(AskCommand),

    /// Interactive question-answering loop
    Repl(ReplCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Populate the environment from a local .env dotfile, if present.
    // Must happen before configuration reads the provider credential.
    dotenvy::dotenv().ok();

    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.workspace,
        cli.config,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    // Log startup
    tracing::info!("MedQA CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Mode: {}", config.mode);
    tracing::debug!("Generator: {}", config.generator);

    config.validate()?;

    // Ensure .medqa directory exists
    config.ensure_medqa_dir()?;

    // Emit command.start span
    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Repl(_) => "repl",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Repl(cmd) => cmd.execute(&config).await,
    };

    // Log completion
    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
