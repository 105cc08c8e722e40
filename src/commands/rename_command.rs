//! Rename command
//!
//! Maps the tiles listed in an existing retile manifest to templated
//! names, without re-running the pipeline.

use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::options::config_from_args;
use crate::errors::{TileError, TileResult};
use crate::gdal::read_manifest;
use crate::naming::{apply_renames, map_filenames_with, DatasetAttributes, FilenameTemplate};
use crate::utils::logger::Logger;

/// Command for renaming tiles from a manifest
pub struct RenameCommand<'a> {
    /// Manifest written by the retiling tool
    manifest: PathBuf,
    /// Directory the manifest's filenames are relative to
    tile_dir: PathBuf,
    template: FilenameTemplate,
    dataset: DatasetAttributes,
    /// Move files instead of only printing the mapping
    apply: bool,
    logger: &'a Logger,
}

impl<'a> RenameCommand<'a> {
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> TileResult<Self> {
        let manifest = args.get_one::<String>("manifest")
            .map(PathBuf::from)
            .ok_or_else(|| TileError::GenericError("Missing manifest path".to_string()))?;
        let config = config_from_args(args)?;
        let template = config.template
            .ok_or_else(|| TileError::ConfigError("Renaming needs a filename template (--template or [naming] template)".to_string()))?;

        // Tiles sit next to their manifest unless told otherwise
        let tile_dir = match args.get_one::<String>("output-dir") {
            Some(dir) => PathBuf::from(dir),
            None => manifest.parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        };

        Ok(RenameCommand {
            manifest,
            tile_dir,
            template,
            dataset: config.dataset,
            apply: args.get_flag("rename"),
            logger,
        })
    }
}

impl<'a> Command for RenameCommand<'a> {
    fn execute(&self) -> TileResult<()> {
        info!("Renaming tiles from {} with template {}", self.manifest.display(), self.template.as_str());
        let tiles = read_manifest(&self.manifest)?;
        let renames = map_filenames_with(&tiles, &self.template, &self.dataset)?;
        self.logger.log_renames(&renames)?;

        if self.apply {
            let moved = apply_renames(&self.tile_dir, &renames)?;
            for path in moved {
                println!("{}", path.display());
            }
        } else {
            for (old, new) in &renames {
                println!("{} -> {}", old, new);
            }
        }
        Ok(())
    }
}
