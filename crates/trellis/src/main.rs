//! Trellis CLI - build-configuration composer for scaffolded SvelteKit sites.

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "trellis")]
#[command(about = "Compose and validate build configuration for a generated site")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the project manifest
    #[arg(short, long, default_value = "trellis.json")]
    manifest: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default project manifest in the current directory
    Init {
        /// Overwrite an existing manifest
        #[arg(short, long)]
        yes: bool,
    },

    /// Compose the artifact set and write it out
    Compose {
        /// Directory to write artifacts into
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Compose the artifact set without writing anything
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&env::current_dir()?, yes)?;
        }
        Commands::Compose { output } => {
            commands::compose::run(&cli.manifest, &output)?;
        }
        Commands::Check => {
            commands::check::run(&cli.manifest)?;
        }
    }

    Ok(())
}
