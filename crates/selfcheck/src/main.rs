//! selfcheck CLI - self-assessment quiz widgets for static documentation sites.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "selfcheck")]
#[command(about = "Self-assessment quiz widgets for static documentation sites")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to selfcheck.toml config file
    #[arg(short, long, default_value = "selfcheck.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a content directory with a sample page and assessment
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Build the static site
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip minification
        #[arg(long)]
        no_minify: bool,
    },

    /// Render one assessment widget to stdout
    Render {
        /// Page path stem relative to the content directory, e.g. /learn/closures/index
        #[arg(short, long)]
        page: String,

        /// Assessment file name without ".assess.yaml"
        #[arg(short, long)]
        name: String,
    },

    /// Validate every assessment in the content directory
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so `render` output stays clean.
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Build { output, no_minify } => {
            let minify = if no_minify { Some(false) } else { None };
            commands::build::run(&cli.config, output, minify).await?;
        }
        Commands::Render { page, name } => {
            commands::render::run(&cli.config, &page, &name)?;
        }
        Commands::Check => {
            commands::check::run(&cli.config)?;
        }
    }

    Ok(())
}
