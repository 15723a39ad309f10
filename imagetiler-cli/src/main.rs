//! ImageTiler CLI - Command-line interface
//!
//! Cuts geo-pinned images into slippy-map tiles, mirrors tiles from a tile
//! server, and answers tile lookups for a coordinate.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use imagetiler::config::ConfigFile;
use imagetiler::logging::init_logging;

use commands::{download, generate, init, tile};
use error::CliError;

#[derive(Parser)]
#[command(name = "imagetiler")]
#[command(version, about = "Turn a geo-pinned image into slippy-map tiles", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.imagetiler/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, overrides the config file (RUST_LOG overrides both)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Cut an image into a tile pyramid
    Generate(generate::GenerateArgs),
    /// Mirror the tiles of a bounding box from a tile server
    Download(download::DownloadArgs),
    /// Print the tile containing a coordinate
    Tile(tile::TileArgs),
    /// Write a default configuration file
    Init(init::InitArgs),
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    // init only writes the file, it must work even when the current one is broken
    if let Command::Init(args) = &cli.command {
        return init::run(args, cli.config.as_deref());
    }

    let config = match &cli.config {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };

    let mut logging = config.logging.clone();
    if let Some(level) = cli.log_level {
        logging.level = level;
    }
    let _guard = init_logging(&logging).map_err(|e| CliError::LoggingInit(e.to_string()))?;

    match cli.command {
        Command::Generate(args) => generate::run(args, &config),
        Command::Download(args) => download::run(args, &config),
        Command::Tile(args) => tile::run(args),
        Command::Init(_) => Ok(()),
    }
}
