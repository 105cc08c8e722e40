//! Raster footprint lookup
//!
//! The footprint of a raster reference is read from `gdalinfo -json`. The
//! geographic `wgs84Extent` polygon is preferred. Rasters without one fall
//! back to their four corner coordinates, which are in the raster's own
//! SRS and so are only accepted when that SRS is geographic.

use std::path::Path;

use log::debug;
use serde_json::Value;

use super::executor::CommandExecutor;
use super::constants::tools;
use crate::coordinate::{compute_expanded_extent, ExpandedExtent, Point};
use crate::errors::{TileError, TileResult};

const CORNER_KEYS: [&str; 4] = ["upperLeft", "lowerLeft", "lowerRight", "upperRight"];

/// Supplies the boundary points of a raster file
pub trait ExtentProvider {
    /// Footprint of `path` as (longitude, latitude) points
    fn file_extents(&self, path: &Path) -> TileResult<Vec<Point>>;
}

/// Extent provider backed by `gdalinfo -json`
pub struct GdalInfoExtents<E> {
    executor: E,
}

impl<E: CommandExecutor> GdalInfoExtents<E> {
    pub fn new(executor: E) -> Self {
        GdalInfoExtents { executor }
    }
}

impl<E: CommandExecutor> ExtentProvider for GdalInfoExtents<E> {
    fn file_extents(&self, path: &Path) -> TileResult<Vec<Point>> {
        let args = vec!["-json".to_string(), path.display().to_string()];
        let json = self.executor.execute(tools::INFO, &args)?;
        parse_gdalinfo_json(&json)
            .map_err(|e| TileError::InputError(format!("{}: {}", path.display(), e)))
    }
}

/// Extract footprint points from `gdalinfo -json` output
pub fn parse_gdalinfo_json(json: &str) -> Result<Vec<Point>, String> {
    let info: Value = serde_json::from_str(json)
        .map_err(|e| format!("unreadable gdalinfo output: {}", e))?;

    if let Some(ring) = info.pointer("/wgs84Extent/coordinates/0").and_then(Value::as_array) {
        let points = ring.iter().map(json_point).collect::<Option<Vec<_>>>()
            .ok_or_else(|| "malformed wgs84Extent polygon".to_string())?;
        if !points.is_empty() {
            return Ok(points);
        }
    }

    let corners = info.get("cornerCoordinates")
        .ok_or_else(|| "no wgs84Extent or cornerCoordinates in raster info".to_string())?;
    if !is_geographic(&info) {
        return Err("no wgs84Extent and the corner coordinates are not in a geographic SRS".to_string());
    }
    CORNER_KEYS.iter()
        .map(|key| corners.get(*key)
            .and_then(json_point)
            .ok_or_else(|| format!("missing or malformed corner {}", key)))
        .collect()
}

fn is_geographic(info: &Value) -> bool {
    info.pointer("/coordinateSystem/wkt")
        .and_then(Value::as_str)
        .map(|wkt| {
            let wkt = wkt.trim_start();
            wkt.starts_with("GEOGCS") || wkt.starts_with("GEOGCRS") || wkt.starts_with("GEODCRS")
        })
        .unwrap_or(false)
}

fn json_point(value: &Value) -> Option<Point> {
    let pair = value.as_array()?;
    match pair.as_slice() {
        [x, y, ..] => Some(Point::new(x.as_f64()?, y.as_f64()?)),
        _ => None,
    }
}

/// Look up a raster's footprint and round it out to a tile-aligned extent
pub fn calculate_expanded_extent<P: ExtentProvider + ?Sized>(provider: &P, path: &Path) -> TileResult<ExpandedExtent> {
    debug!("Calculating expanded extents for {}", path.display());
    let points = provider.file_extents(path)?;
    compute_expanded_extent(&points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_wgs84_extent() {
        let json = r#"{
            "cornerCoordinates": {
                "upperLeft": [500000.0, 6100000.0], "lowerLeft": [500000.0, 6000000.0],
                "lowerRight": [600000.0, 6000000.0], "upperRight": [600000.0, 6100000.0],
                "center": [550000.0, 6050000.0]
            },
            "wgs84Extent": {"type": "Polygon", "coordinates": [[
                [146.9, -35.2], [146.9, -36.1], [148.0, -36.1], [148.0, -35.2], [146.9, -35.2]
            ]]}
        }"#;
        let points = parse_gdalinfo_json(json).unwrap();
        assert_eq!(points.len(), 5);
        assert_eq!(points[1], Point::new(146.9, -36.1));
    }

    #[test]
    fn test_falls_back_to_corners_without_center() {
        let json = r#"{"coordinateSystem": {"wkt": "GEOGCRS[\"WGS 84\", DATUM[\"World Geodetic System 1984\"]]"},
        "cornerCoordinates": {
            "upperLeft": [10.0, 2.0], "lowerLeft": [10.0, 1.0],
            "lowerRight": [11.0, 1.0], "upperRight": [11.0, 2.0], "center": [10.5, 1.5]
        }}"#;
        let points = parse_gdalinfo_json(json).unwrap();
        assert_eq!(points, vec![
            Point::new(10.0, 2.0), Point::new(10.0, 1.0),
            Point::new(11.0, 1.0), Point::new(11.0, 2.0),
        ]);
    }

    #[test]
    fn test_projected_corners_rejected() {
        let json = r#"{"coordinateSystem": {"wkt": "PROJCRS[\"GDA94 / Australian Albers\"]"},
        "cornerCoordinates": {
            "upperLeft": [1500000.0, -3900000.0], "lowerLeft": [1500000.0, -4000000.0],
            "lowerRight": [1600000.0, -4000000.0], "upperRight": [1600000.0, -3900000.0]
        }}"#;
        assert!(parse_gdalinfo_json(json).is_err());

        let no_srs = r#"{"cornerCoordinates": {
            "upperLeft": [0.0, 10.0], "lowerLeft": [0.0, 0.0],
            "lowerRight": [10.0, 0.0], "upperRight": [10.0, 10.0]
        }}"#;
        assert!(parse_gdalinfo_json(no_srs).is_err());
    }

    #[test]
    fn test_no_geometry_is_error() {
        assert!(parse_gdalinfo_json(r#"{"size": [10, 10]}"#).is_err());
        assert!(parse_gdalinfo_json("not json").is_err());
    }
}
