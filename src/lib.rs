pub mod errors;
pub mod coordinate;
pub mod gdal;
pub mod naming;
pub mod pipeline;
pub mod commands;
pub mod utils;

pub use errors::{TileError, TileResult};
pub use coordinate::{compute_expanded_extent, BoundingBox, ExpandedExtent, Point, SpatialReference};
pub use gdal::{CommandExecutor, ProcessExecutor, ReprojectOptions, RetileOptions, TileFile};
pub use naming::{map_filenames, DatasetAttributes, FilenameTemplate};
pub use pipeline::{create_tiles, PipelineConfig, TilePipeline};
