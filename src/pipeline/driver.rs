//! End-to-end tiling pipeline
//!
//! stack -> expanded extent -> reproject and align -> retile. Each stage
//! consumes only the previous stage's output. A failing stage aborts the
//! run; intermediate `.vrt` references are left on disk.

use std::path::Path;

use log::info;

use crate::coordinate::ExpandedExtent;
use crate::errors::TileResult;
use crate::gdal::{
    calculate_expanded_extent, reproject_and_align, retile, stack_bands,
    CommandExecutor, ExtentProvider, GdalInfoExtents, ReprojectOptions, RetileOptions, TileFile,
};
use crate::utils::ProgressTracker;

const STAGES: u64 = 4;

/// Runs the tiling stages against one executor
///
/// Runs sharing a working directory must use distinct basenames, or their
/// reference files collide.
pub struct TilePipeline<'a, E: ?Sized> {
    executor: &'a E,
    extents: Box<dyn ExtentProvider + 'a>,
    reproject: ReprojectOptions,
    show_progress: bool,
}

impl<'a, E: CommandExecutor + ?Sized + 'a> TilePipeline<'a, E> {
    /// Pipeline using `gdalinfo` through the same executor for footprints
    pub fn new(executor: &'a E) -> Self {
        TilePipeline {
            executor,
            extents: Box::new(GdalInfoExtents::new(executor)),
            reproject: ReprojectOptions::default(),
            show_progress: false,
        }
    }

    pub fn with_reproject_options(mut self, options: ReprojectOptions) -> Self {
        self.reproject = options;
        self
    }

    /// Show a progress bar over the four stages
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Stack the inputs and compute their tile-aligned extent
    pub fn expanded_extent<P: AsRef<Path>>(&self, input_files: &[P], basename: &str) -> TileResult<ExpandedExtent> {
        let combined_vrt = stack_bands(self.executor, input_files, basename)?;
        calculate_expanded_extent(&*self.extents, &combined_vrt)
    }

    /// Turn co-registered input rasters into a grid of tiles
    ///
    /// # Arguments
    /// * `input_files` - Source rasters, stacked in this order
    /// * `basename` - Base name for the intermediate references
    /// * `tile_options` - Retile settings; defaults when `None`
    ///
    /// # Returns
    /// The tiles listed in the retile manifest
    pub fn create_tiles<P: AsRef<Path>>(
        &self,
        input_files: &[P],
        basename: &str,
        tile_options: Option<&RetileOptions>,
    ) -> TileResult<Vec<TileFile>> {
        let defaults = RetileOptions::default();
        let tile_options = tile_options.unwrap_or(&defaults);
        // Fail on bad options before any tool runs.
        tile_options.validate()?;
        self.reproject.validate()?;

        let progress = self.show_progress.then(|| ProgressTracker::new(STAGES, "Stacking bands"));
        let result = self.run_stages(input_files, basename, tile_options, progress.as_ref());

        if let Some(progress) = &progress {
            match &result {
                Ok(_) => progress.finish(),
                Err(_) => progress.abandon("Failed"),
            }
        }
        result
    }

    fn run_stages<P: AsRef<Path>>(
        &self,
        input_files: &[P],
        basename: &str,
        tile_options: &RetileOptions,
        progress: Option<&ProgressTracker>,
    ) -> TileResult<Vec<TileFile>> {
        let step = |next: &str| {
            if let Some(progress) = progress {
                progress.increment(1);
                progress.set_message(next);
            }
        };

        let combined_vrt = stack_bands(self.executor, input_files, basename)?;
        step("Computing extent");

        let tile_aligned_extent = calculate_expanded_extent(&*self.extents, &combined_vrt)?;
        step("Reprojecting");

        let reprojected_vrt = reproject_and_align(
            self.executor, &combined_vrt, basename, Some(&tile_aligned_extent), &self.reproject,
        )?;
        step("Retiling");

        let created_tiles = retile(self.executor, &reprojected_vrt, tile_options)?;
        step("Done");

        info!("Created {} tiles from {} input files", created_tiles.len(), input_files.len());
        Ok(created_tiles)
    }
}

/// Run the whole pipeline with default reprojection settings
pub fn create_tiles<E, P>(
    executor: &E,
    input_files: &[P],
    basename: &str,
    tile_options: Option<&RetileOptions>,
) -> TileResult<Vec<TileFile>>
where
    E: CommandExecutor + ?Sized,
    P: AsRef<Path>,
{
    TilePipeline::new(executor).create_tiles(input_files, basename, tile_options)
}
