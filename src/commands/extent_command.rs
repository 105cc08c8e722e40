//! Extent command
//!
//! Stacks the inputs and prints the tile-aligned extent that the warp
//! step would be constrained to.

use std::path::PathBuf;

use clap::ArgMatches;

use crate::commands::command_traits::Command;
use crate::commands::options::{basename, input_files};
use crate::errors::TileResult;
use crate::gdal::ProcessExecutor;
use crate::pipeline::TilePipeline;
use crate::utils::logger::Logger;

/// Command for printing the expanded extent of the inputs
pub struct ExtentCommand<'a> {
    input_files: Vec<PathBuf>,
    basename: String,
    logger: &'a Logger,
}

impl<'a> ExtentCommand<'a> {
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> TileResult<Self> {
        let input_files = input_files(args)?;
        let basename = basename(args)?;
        Ok(ExtentCommand { input_files, basename, logger })
    }
}

impl<'a> Command for ExtentCommand<'a> {
    fn execute(&self) -> TileResult<()> {
        let executor = ProcessExecutor::new();
        let extent = TilePipeline::new(&executor).expanded_extent(&self.input_files, &self.basename)?;

        self.logger.log(&format!("Expanded extent of {}: {}", self.basename, extent))?;
        println!("{}", extent);
        Ok(())
    }
}
