//! Kurv CLI
//!
//! Inspect animation curves from the command line:
//!
//! ```text
//! kurv path position.toml --width 800 --height 400
//! kurv --config kurv.toml handles position.toml
//! ```

mod commands;
mod document;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kurv_editor::EditorConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kurv", version, about = "Animation curve path data and tangent handles")]
struct Cli {
    /// Editor config file (kurv.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print SVG path data for every curve of an animation
    Path {
        /// Animation document (TOML)
        file: PathBuf,
        /// Viewport width in pixels
        #[arg(long, default_value_t = 800.0)]
        width: f32,
        /// Viewport height in pixels
        #[arg(long, default_value_t = 400.0)]
        height: f32,
    },
    /// Print keys and tangent control points for every curve
    Handles {
        /// Animation document (TOML)
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };

    let output = match cli.command {
        Commands::Path {
            file,
            width,
            height,
        } => commands::path(&file, &config, width, height)?,
        Commands::Handles { file } => commands::handles(&file, &config)?,
    };
    print!("{}", output);

    Ok(())
}
