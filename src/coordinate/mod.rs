//! Coordinate handling for geospatial data
//!
//! This module provides points, bounding boxes, the tile-aligned extent
//! calculation and spatial reference identifiers.

mod bbox;
mod point;
mod crs;
mod extent;

// Re-export key types
pub use self::bbox::BoundingBox;
pub use self::point::Point;
pub use self::crs::{SpatialReference, DEFAULT_SRS};
pub use self::extent::{compute_expanded_extent, ExpandedExtent};
