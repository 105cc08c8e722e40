//! Tile filename mapping

use log::debug;

use super::context::{keys, TemplateContext};
use super::dataset::DatasetAttributes;
use super::template::FilenameTemplate;
use crate::errors::{TileError, TileResult};
use crate::gdal::TileFile;

/// An (existing filename, new filename) pair
pub type Rename = (String, String);

/// Split a tile filename into its base, middle and extension parts
pub fn split_tile_filename(filename: &str) -> TileResult<(&str, &str, &str)> {
    let parts: Vec<&str> = filename.split('.').collect();
    match parts.as_slice() {
        [base, middle, extension] => Ok((*base, *middle, *extension)),
        _ => Err(TileError::FilenameFormatError(filename.to_string())),
    }
}

/// Compute the target filename of every tile
///
/// Besides the dataset attributes, templates can use `x` (tile minlon),
/// `y` (tile minlat) and `extension`. Example template:
/// `{product_name}/{x}_{y}/{year}/{product_name}_{x}_{y}.{extension}`
///
/// # Arguments
/// * `tile_files` - Tiles as reported by the retiler
/// * `format_template` - Template for the new filename
/// * `dataset` - Attributes of the dataset the tiles came from
///
/// # Returns
/// One rename per tile, in input order. Nothing is moved on disk.
pub fn map_filenames(tile_files: &[TileFile], format_template: &str, dataset: &DatasetAttributes) -> TileResult<Vec<Rename>> {
    let template = FilenameTemplate::parse(format_template)?;
    map_filenames_with(tile_files, &template, dataset)
}

/// [`map_filenames`] for an already parsed template
pub fn map_filenames_with(tile_files: &[TileFile], template: &FilenameTemplate, dataset: &DatasetAttributes) -> TileResult<Vec<Rename>> {
    let dataset_context = TemplateContext::for_dataset(dataset);

    // Every tile adds the same keys, so one check up front covers them all.
    let mut available = dataset_context.clone();
    for key in keys::TILE_KEYS {
        available.insert(key, "");
    }
    template.validate(&available)?;

    tile_files.iter()
        .map(|tile_file| {
            let (_, _, extension) = split_tile_filename(&tile_file.filename)?;
            let context = dataset_context.with_tile(tile_file, extension);
            let new_filename = template.render(&context)?;
            debug!("{} -> {}", tile_file.filename, new_filename);
            Ok((tile_file.filename.clone(), new_filename))
        })
        .collect()
}
