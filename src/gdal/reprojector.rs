//! Reprojection onto the shared pixel grid
//!
//! The warp forces `-tap` so output pixel edges fall on exact multiples
//! of the resolution. Tiles cut from independently processed datasets then
//! share pixel boundaries and can be mosaicked.

use std::path::{Path, PathBuf};

use log::info;

use super::constants::{reproject, tools, VRT_EXTENSION};
use super::executor::CommandExecutor;
use crate::coordinate::{ExpandedExtent, SpatialReference, DEFAULT_SRS};
use crate::errors::{TileError, TileResult};

/// Settings for the warp step
#[derive(Debug, Clone, PartialEq)]
pub struct ReprojectOptions {
    /// Target spatial reference
    pub srs: SpatialReference,
    /// Output pixel size in target SRS units, used for both axes
    pub resolution: f64,
    /// Nodata sentinel for source and destination
    pub nodata: f64,
}

impl Default for ReprojectOptions {
    fn default() -> Self {
        ReprojectOptions {
            srs: SpatialReference::default(),
            resolution: reproject::PIXEL_RESOLUTION,
            nodata: reproject::NODATA,
        }
    }
}

impl ReprojectOptions {
    /// Check values that the warp tool would otherwise reject late
    pub fn validate(&self) -> TileResult<()> {
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(TileError::ConfigError(format!(
                "Reprojection resolution must be a positive number, got {}",
                self.resolution
            )));
        }
        if !self.nodata.is_finite() {
            return Err(TileError::ConfigError(format!("Nodata value must be finite, got {}", self.nodata)));
        }
        Ok(())
    }
}

/// Name of the reprojected reference for a basename and SRS
pub fn reprojected_name(output_basename: &str, srs: &SpatialReference) -> PathBuf {
    PathBuf::from(format!("{}.{}.{}", output_basename, srs.file_suffix(), VRT_EXTENSION))
}

/// Build the warp argument list
///
/// The extent is always geographic, so it is tagged with `-te_srs` and the
/// warp converts it into the target SRS.
pub fn warp_args(input: &Path, output: &Path, extent: Option<&ExpandedExtent>, options: &ReprojectOptions) -> Vec<String> {
    let resolution = options.resolution.to_string();
    let nodata = options.nodata.to_string();

    let mut args = vec![
        "-t_srs".to_string(), options.srs.as_str().to_string(),
        "-of".to_string(), "VRT".to_string(),
        "-tr".to_string(), resolution.clone(), resolution,
        "-tap".to_string(),
        "-srcnodata".to_string(), nodata.clone(),
        "-dstnodata".to_string(), nodata,
    ];
    if let Some(extent) = extent {
        args.push("-te".to_string());
        args.extend(extent.to_args());
        args.push("-te_srs".to_string());
        args.push(DEFAULT_SRS.to_string());
    }
    args.push(input.display().to_string());
    args.push(output.display().to_string());
    args
}

/// Reproject a raster reference onto the aligned grid
///
/// # Arguments
/// * `executor` - Runs the external warp tool
/// * `input` - Raster reference to reproject
/// * `output_basename` - Base name for the derived reference
/// * `extent` - Output bounds in lon/lat degrees; unconstrained when `None`
/// * `options` - Target SRS, resolution and nodata
///
/// # Returns
/// Path of the reprojected virtual raster, `{basename}.{srs}.vrt`
pub fn reproject_and_align<E: CommandExecutor + ?Sized>(
    executor: &E,
    input: &Path,
    output_basename: &str,
    extent: Option<&ExpandedExtent>,
    options: &ReprojectOptions,
) -> TileResult<PathBuf> {
    options.validate()?;

    let reprojected_vrt = reprojected_name(output_basename, &options.srs);
    match extent {
        Some(extent) => info!("Reprojecting {} to {} within [{}]", input.display(), options.srs, extent),
        None => info!("Reprojecting {} to {}", input.display(), options.srs),
    }

    let args = warp_args(input, &reprojected_vrt, extent, options);
    executor.execute(tools::WARP, &args)?;
    Ok(reprojected_vrt)
}
