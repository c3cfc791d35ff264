//! Blockpage CLI - export drag-and-drop landing pages as static sites.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "blockpage")]
#[command(about = "Export drag-and-drop landing pages as static site archives")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to blockpage.toml config file
    #[arg(short, long, default_value = "blockpage.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter config and sample canvas
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Export a canvas document to a site archive
    Export {
        /// Canvas document (.json, .yaml or .yml)
        canvas: PathBuf,

        /// Directory to write the archive into
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Minify styles.css
        #[arg(long)]
        minify: bool,
    },

    /// Serve the export API for the browser editor
    Serve {
        /// Port to listen on (defaults to config or 7878)
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory holding the editor UI
        #[arg(long)]
        ui_dir: Option<PathBuf>,

        /// Open the browser once the server is up
        #[arg(long)]
        open: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
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
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Export {
            canvas,
            output,
            minify,
        } => {
            let minify = if minify { Some(true) } else { None };
            commands::export::run(&cli.config, &canvas, &output, minify).await?;
        }
        Commands::Serve { port, ui_dir, open } => {
            commands::serve::run(&cli.config, port, ui_dir, open).await?;
        }
    }

    Ok(())
}
