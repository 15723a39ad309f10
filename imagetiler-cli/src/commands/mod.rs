//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`generate`] - Image to tile pyramid
//! - [`download`] - Tile server mirroring
//! - [`tile`] - Tile lookup for a coordinate
//! - [`init`] - Configuration initialization

pub mod common;
pub mod download;
pub mod generate;
pub mod init;
pub mod tile;
