//! Wrappers around the external GDAL toolchain
//!
//! Each stage builds an argument list and runs it through a
//! [`CommandExecutor`]. Raster I/O, reprojection and resampling all happen
//! inside the external tools.

pub(crate) mod constants;
pub mod executor;
pub mod extents;
pub mod stacker;
pub mod reprojector;
pub mod retiler;
#[cfg(test)]
pub(crate) mod tests;

pub use executor::{command_line, CommandExecutor, ProcessExecutor};
pub use extents::{calculate_expanded_extent, ExtentProvider, GdalInfoExtents};
pub use stacker::stack_bands;
pub use reprojector::{reproject_and_align, ReprojectOptions};
pub use retiler::{parse_manifest, read_manifest, retile, RetileOptions, TileFile};
