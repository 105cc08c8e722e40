//! Tiling command
//!
//! Runs the full stack/reproject/retile pipeline and optionally renames
//! the resulting tiles.

use std::path::PathBuf;

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::options::{basename, config_from_args, input_files};
use crate::errors::TileResult;
use crate::gdal::ProcessExecutor;
use crate::naming::{apply_renames, map_filenames_with};
use crate::pipeline::{PipelineConfig, TilePipeline};
use crate::utils::logger::Logger;

/// Command for turning input rasters into tiles
pub struct TileCommand<'a> {
    /// Co-registered input rasters
    input_files: Vec<PathBuf>,
    /// Base name of the intermediate references
    basename: String,
    /// Pipeline settings
    config: PipelineConfig,
    /// Move tiles to their templated names
    rename: bool,
    /// Show stage progress
    progress: bool,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> TileCommand<'a> {
    /// Create a new tile command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new TileCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> TileResult<Self> {
        let input_files = input_files(args)?;
        let basename = basename(args)?;
        let config = config_from_args(args)?;

        Ok(TileCommand {
            input_files,
            basename,
            config,
            rename: args.get_flag("rename"),
            progress: !args.get_flag("verbose"),
            logger,
        })
    }
}

impl<'a> Command for TileCommand<'a> {
    fn execute(&self) -> TileResult<()> {
        info!("Tiling {} input files as {}", self.input_files.len(), self.basename);

        let executor = ProcessExecutor::new();
        let pipeline = TilePipeline::new(&executor)
            .with_reproject_options(self.config.reproject.clone())
            .with_progress(self.progress);

        let tiles = pipeline.create_tiles(&self.input_files, &self.basename, Some(&self.config.tile))?;
        self.logger.log_tile_files(&tiles)?;
        for tile in &tiles {
            println!("{}", tile.filename);
        }

        let Some(template) = &self.config.template else {
            return Ok(());
        };

        info!("Mapping tile names with template {}", template.as_str());
        let renames = map_filenames_with(&tiles, template, &self.config.dataset)?;
        self.logger.log_renames(&renames)?;
        if self.rename {
            apply_renames(&self.config.tile.output_dir, &renames)?;
        } else {
            for (old, new) in &renames {
                println!("{} -> {}", old, new);
            }
        }

        Ok(())
    }
}
