//! Tile-aligned extents
//!
//! The reprojection step snaps its output grid to integer degrees, so the
//! extent handed to it is rounded outward: floor on the minimums, ceil on
//! the maximums.

use std::fmt;

use log::debug;

use super::bbox::BoundingBox;
use super::point::Point;
use crate::errors::TileResult;

/// Integer-aligned bounding box covering a raster footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandedExtent {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

impl ExpandedExtent {
    /// Round a bounding box outward to whole units
    pub fn from_bbox(bbox: &BoundingBox) -> Self {
        ExpandedExtent {
            xmin: bbox.min_x.floor() as i64,
            ymin: bbox.min_y.floor() as i64,
            xmax: bbox.max_x.ceil() as i64,
            ymax: bbox.max_y.ceil() as i64,
        }
    }

    /// The extent as `[xmin, ymin, xmax, ymax]` command-line arguments
    pub fn to_args(&self) -> Vec<String> {
        vec![
            self.xmin.to_string(),
            self.ymin.to_string(),
            self.xmax.to_string(),
            self.ymax.to_string(),
        ]
    }

}

impl fmt::Display for ExpandedExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.xmin, self.ymin, self.xmax, self.ymax)
    }
}

/// Compute the grid-safe extent of a footprint
///
/// # Arguments
/// * `points` - Boundary points (longitude, latitude) of the raster
///
/// # Returns
/// The outward-rounded extent, or `InputError` with fewer than two points
pub fn compute_expanded_extent(points: &[Point]) -> TileResult<ExpandedExtent> {
    debug!("Input extents: {:?}", points);
    let bbox = BoundingBox::from_points(points)?;
    let expanded = ExpandedExtent::from_bbox(&bbox);
    debug!("Expanded extents are: {}", expanded);
    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TileError;

    #[test]
    fn test_rounds_outward() {
        let corners = [
            Point::new(148.2, -35.7),
            Point::new(149.9, -35.7),
            Point::new(148.2, -34.1),
            Point::new(149.9, -34.1),
        ];
        let extent = compute_expanded_extent(&corners).unwrap();
        assert_eq!(extent, ExpandedExtent { xmin: 148, ymin: -36, xmax: 150, ymax: -34 });
        assert_eq!(extent.to_args(), vec!["148", "-36", "150", "-34"]);
    }

    #[test]
    fn test_integer_edges_are_unchanged() {
        let extent = compute_expanded_extent(&[Point::new(-10.0, 5.0), Point::new(-8.0, 7.0)]).unwrap();
        assert_eq!(extent, ExpandedExtent { xmin: -10, ymin: 5, xmax: -8, ymax: 7 });
    }

    #[test]
    fn test_contains_every_point() {
        let sets: Vec<Vec<Point>> = vec![
            vec![Point::new(0.0001, 0.9999), Point::new(-0.0001, -0.9999)],
            vec![Point::new(179.5, -89.5), Point::new(-179.5, 89.5), Point::new(12.3, 45.6)],
            vec![Point::new(-0.5, -0.5), Point::new(-0.25, -0.75)],
        ];
        for points in sets {
            let extent = compute_expanded_extent(&points).unwrap();
            let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
            let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
            assert_eq!(extent.xmin, min_x.floor() as i64);
            assert_eq!(extent.ymax, max_y.ceil() as i64);
            assert!(extent.xmin <= extent.xmax && extent.ymin <= extent.ymax);
            assert!(points.iter().all(|p| {
                extent.xmin as f64 <= p.x && p.x <= extent.xmax as f64 &&
                    extent.ymin as f64 <= p.y && p.y <= extent.ymax as f64
            }));
        }
    }

    #[test]
    fn test_empty_is_input_error() {
        assert!(matches!(compute_expanded_extent(&[]), Err(TileError::InputError(_))));
    }
}
