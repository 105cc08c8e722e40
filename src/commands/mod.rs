//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod cli;
pub mod command_traits;
pub mod tile_command;
pub mod extent_command;
pub mod rename_command;
mod options;

pub use cli::build_cli;
pub use command_traits::{Command, CommandFactory};
pub use tile_command::TileCommand;
pub use extent_command::ExtentCommand;
pub use rename_command::RenameCommand;

use clap::ArgMatches;
use crate::utils::logger::Logger;
use crate::errors::TileResult;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct RastertileCommandFactory;

impl RastertileCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        RastertileCommandFactory
    }
}

impl Default for RastertileCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Which command a set of arguments selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Rename tiles from an existing manifest
    Rename,
    /// Print the expanded extent only
    Extent,
    /// Run the full pipeline
    Tile,
}

impl CommandKind {
    /// `--manifest` wins over `--extent`, which wins over the default tile run
    pub fn from_args(args: &ArgMatches) -> Self {
        if args.get_one::<String>("manifest").is_some() {
            CommandKind::Rename
        } else if args.get_flag("extent") {
            CommandKind::Extent
        } else {
            CommandKind::Tile
        }
    }
}

impl<'a> CommandFactory<'a> for RastertileCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> TileResult<Box<dyn Command + 'a>> {
        match CommandKind::from_args(args) {
            CommandKind::Rename => Ok(Box::new(RenameCommand::new(args, logger)?)),
            CommandKind::Extent => Ok(Box::new(ExtentCommand::new(args, logger)?)),
            CommandKind::Tile => Ok(Box::new(TileCommand::new(args, logger)?)),
        }
    }
}
