//! Init command - initialize configuration file.

use std::path::Path;

use clap::Args;
use imagetiler::config::{config_file_path, ConfigFile};

use crate::error::CliError;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing configuration file with defaults
    #[arg(long)]
    pub force: bool,
}

/// Run the init command.
pub fn run(args: &InitArgs, path: Option<&Path>) -> Result<(), CliError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(config_file_path);

    if path.exists() && !args.force {
        println!("Configuration file already exists: {}", path.display());
        println!("Use --force to reset it to defaults.");
        return Ok(());
    }

    ConfigFile::default().save_to(&path)?;

    println!("Configuration file: {}", path.display());
    println!();
    println!("Edit this file to customize ImageTiler settings.");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");

        run(&InitArgs { force: false }, Some(&path)).unwrap();
        assert_eq!(ConfigFile::load_from(&path).unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_init_keeps_existing_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[tiles]\nsize = 512\n").unwrap();

        run(&InitArgs { force: false }, Some(&path)).unwrap();
        assert_eq!(ConfigFile::load_from(&path).unwrap().tiles.size, 512);

        run(&InitArgs { force: true }, Some(&path)).unwrap();
        assert_eq!(ConfigFile::load_from(&path).unwrap().tiles.size, 256);
    }
}
