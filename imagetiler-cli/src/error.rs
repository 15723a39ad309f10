//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use imagetiler::config::ConfigFileError;
use imagetiler::download::HttpError;
use imagetiler::metadata::MetadataError;
use imagetiler::pyramid::PyramidError;
use imagetiler::raster::RasterError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file error
    Config(ConfigFileError),
    /// Invalid or inconsistent arguments
    InvalidArgument(String),
    /// Failed to open the source image
    Image(RasterError),
    /// Failed to create the output directory
    OutputDir { path: PathBuf, error: std::io::Error },
    /// Failed to write metadata.json
    Metadata(MetadataError),
    /// The requested zoom range cannot be generated
    Pyramid(PyramidError),
    /// Failed to set up the HTTP client
    Http(HttpError),
    /// Some tiles could not be produced
    Incomplete { failed: usize },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Config(ConfigFileError::InvalidValue { .. }) => {
                eprintln!();
                eprintln!(
                    "Fix the value in {} or run 'imagetiler init --force' to reset it.",
                    imagetiler::config::config_file_path().display()
                );
            }
            CliError::Pyramid(PyramidError::ZoomTooDeep { deepest_zoom, .. }) => {
                eprintln!();
                eprintln!("Use --max-zoom {} or lower, or a larger --native-zoom.", deepest_zoom);
            }
            CliError::Incomplete { .. } => {
                eprintln!();
                eprintln!("The tiles that succeeded were kept. Re-run to retry the failed ones.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Image(e) => write!(f, "{}", e),
            CliError::OutputDir { path, error } => {
                write!(f, "Failed to create directory '{}': {}", path.display(), error)
            }
            CliError::Metadata(e) => write!(f, "{}", e),
            CliError::Pyramid(e) => write!(f, "{}", e),
            CliError::Http(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Incomplete { failed } => write!(f, "{} tiles failed", failed),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Image(e) => Some(e),
            CliError::OutputDir { error, .. } => Some(error),
            CliError::Metadata(e) => Some(e),
            CliError::Pyramid(e) => Some(e),
            CliError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<RasterError> for CliError {
    fn from(e: RasterError) -> Self {
        CliError::Image(e)
    }
}

impl From<MetadataError> for CliError {
    fn from(e: MetadataError) -> Self {
        CliError::Metadata(e)
    }
}

impl From<HttpError> for CliError {
    fn from(e: HttpError) -> Self {
        CliError::Http(e)
    }
}

impl From<PyramidError> for CliError {
    fn from(e: PyramidError) -> Self {
        CliError::Pyramid(e)
    }
}
