//! Band stacking
//!
//! Co-registered rasters are combined into one multi-band virtual raster
//! with `gdalbuildvrt -separate`. Only a small XML reference is written;
//! pixel data stays in the source files.

use std::path::{Path, PathBuf};

use log::info;

use super::constants::{tools, VRT_EXTENSION};
use super::executor::CommandExecutor;
use crate::errors::{TileError, TileResult};

/// Stack source rasters into a single virtual raster
///
/// Bands appear in input order. The sources must share footprint,
/// resolution and projection; the tool rejects mismatched inputs.
///
/// # Arguments
/// * `executor` - Runs the external stacking tool
/// * `source_files` - Ordered source rasters
/// * `output_basename` - Base name of the reference; `.vrt` is appended
///
/// # Returns
/// Path of the written virtual raster
pub fn stack_bands<E, P>(executor: &E, source_files: &[P], output_basename: &str) -> TileResult<PathBuf>
where
    E: CommandExecutor + ?Sized,
    P: AsRef<Path>,
{
    if source_files.is_empty() {
        return Err(TileError::InputError("No source files to stack".to_string()));
    }

    let scene_vrt = PathBuf::from(format!("{}.{}", output_basename, VRT_EXTENSION));
    info!("Stacking {} source files into {}", source_files.len(), scene_vrt.display());

    let mut args = vec!["-separate".to_string(), scene_vrt.display().to_string()];
    args.extend(source_files.iter().map(|p| p.as_ref().display().to_string()));

    executor.execute(tools::BUILD_VRT, &args)?;
    Ok(scene_vrt)
}
