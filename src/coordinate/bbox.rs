//! Bounding box structure for defining regions

use super::point::Point;
use crate::errors::{TileError, TileResult};

/// A bounding box in a coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum X coordinate
    pub min_x: f64,
    /// Minimum Y coordinate
    pub min_y: f64,
    /// Maximum X coordinate
    pub max_x: f64,
    /// Maximum Y coordinate
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BoundingBox { min_x, min_y, max_x, max_y }
    }

    /// Smallest box enclosing every point
    ///
    /// # Arguments
    /// * `points` - Footprint points; at least two are required
    ///
    /// # Returns
    /// The enclosing box, or `InputError` for too few or non-finite points
    pub fn from_points(points: &[Point]) -> TileResult<Self> {
        if points.len() < 2 {
            return Err(TileError::InputError(format!(
                "At least 2 points are needed to compute an extent, got {}",
                points.len()
            )));
        }
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(TileError::InputError(format!("Non-finite coordinate in footprint: {:?}", bad)));
        }

        let first = points[0];
        let bbox = points[1..].iter().fold(
            BoundingBox::new(first.x, first.y, first.x, first.y),
            |acc, p| BoundingBox::new(
                acc.min_x.min(p.x),
                acc.min_y.min(p.y),
                acc.max_x.max(p.x),
                acc.max_y.max(p.y),
            ),
        );
        Ok(bbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_encloses_all() {
        let points = [Point::new(1.5, -2.0), Point::new(-3.0, 4.25), Point::new(0.0, 0.0)];
        let bbox = BoundingBox::from_points(&points).unwrap();
        assert_eq!(bbox, BoundingBox::new(-3.0, -2.0, 1.5, 4.25));
    }

    #[test]
    fn test_from_points_rejects_single_point() {
        let result = BoundingBox::from_points(&[Point::new(1.0, 1.0)]);
        assert!(matches!(result, Err(TileError::InputError(_))));
    }

    #[test]
    fn test_from_points_rejects_nan() {
        let result = BoundingBox::from_points(&[Point::new(1.0, 1.0), Point::new(f64::NAN, 0.0)]);
        assert!(matches!(result, Err(TileError::InputError(_))));
    }
}
