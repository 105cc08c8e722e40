//! Shared argument handling for the commands

use std::path::PathBuf;

use clap::ArgMatches;

use crate::coordinate::SpatialReference;
use crate::errors::{TileError, TileResult};
use crate::gdal::retiler::validate_create_option;
use crate::naming::FilenameTemplate;
use crate::pipeline::PipelineConfig;

/// Build the pipeline configuration: config file first, then CLI overrides
pub fn config_from_args(args: &ArgMatches) -> TileResult<PipelineConfig> {
    let mut config = match args.get_one::<String>("config") {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(dir) = args.get_one::<String>("output-dir") {
        config.tile.output_dir = PathBuf::from(dir);
    }
    if let Some(size) = args.get_one::<u32>("pixel-size") {
        config.tile.pixel_size = *size;
    }
    if let Some(format) = args.get_one::<String>("format") {
        config.tile.output_format = format.clone();
    }
    if let Some(options) = args.get_many::<String>("co") {
        let options: Vec<String> = options.cloned().collect();
        for option in &options {
            validate_create_option(option)?;
        }
        config.tile.create_options = options;
    }
    if let Some(srs) = args.get_one::<String>("srs") {
        config.reproject.srs = SpatialReference::from_string(srs)?;
    }
    if let Some(template) = args.get_one::<String>("template") {
        config.template = Some(FilenameTemplate::parse(template)?);
    }
    if let Some(attrs) = args.get_many::<String>("attr") {
        for attr in attrs {
            config.dataset.insert_assignment(attr)?;
        }
    }

    config.validate()?;
    Ok(config)
}

/// Input rasters named on the command line
pub fn input_files(args: &ArgMatches) -> TileResult<Vec<PathBuf>> {
    let inputs: Vec<PathBuf> = args.get_many::<String>("input")
        .map(|values| values.map(PathBuf::from).collect())
        .unwrap_or_default();
    if inputs.is_empty() {
        return Err(TileError::InputError("Missing input files".to_string()));
    }
    Ok(inputs)
}

/// Base name for the intermediate references (`--basename`)
pub fn basename(args: &ArgMatches) -> TileResult<String> {
    args.get_one::<String>("basename")
        .filter(|name| !name.trim().is_empty())
        .cloned()
        .ok_or_else(|| TileError::InputError("Missing --basename".to_string()))
}
