//! Output filename derivation
//!
//! Maps each tile to a path built from a template, the tile's position
//! and the attributes of its dataset.

pub mod template;
pub mod context;
pub mod dataset;
pub mod mapper;
pub mod relocate;

pub use template::FilenameTemplate;
pub use context::TemplateContext;
pub use dataset::DatasetAttributes;
pub use mapper::{map_filenames, map_filenames_with, split_tile_filename, Rename};
pub use relocate::apply_renames;
