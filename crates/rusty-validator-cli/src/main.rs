mod commands;
mod fixture;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rusty-validator")]
#[command(version, about = "Check form fixtures against declared validation rules", long_about = None)]
struct Cli {
    /// Log validation steps (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every field of a form fixture
    Check {
        /// Form fixture (TOML)
        form: PathBuf,

        /// Validator settings (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Run a full submission attempt instead of a plain pass
        #[arg(long)]
        submit: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human readable, coloured
    Text,
    /// JSON report
    Json,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let passed = match cli.command {
        Commands::Check {
            form,
            config,
            submit,
            format,
        } => commands::check::execute(&form, config.as_deref(), submit, format)?,
    };

    if !passed {
        std::process::exit(1);
    }

    Ok(())
}
