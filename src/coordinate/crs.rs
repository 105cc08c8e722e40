//! Spatial reference system identifiers

use std::fmt;

use crate::errors::{TileError, TileResult};

/// Default target SRS for reprojection (WGS 84)
pub const DEFAULT_SRS: &str = "EPSG:4326";

/// A target spatial reference as understood by the warp tool
///
/// Any identifier the tool accepts is allowed (`EPSG:4326`, `ESRI:54009`,
/// a PROJ string); only emptiness is rejected here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpatialReference(String);

impl SpatialReference {
    /// Parse an SRS identifier (e.g. "EPSG:4326")
    pub fn from_string(srs: &str) -> TileResult<Self> {
        let srs = srs.trim();
        if srs.is_empty() {
            return Err(TileError::ConfigError("Spatial reference must not be empty".to_string()));
        }
        Ok(SpatialReference(srs.to_string()))
    }

    /// The identifier as passed to external tools
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name fragment used for derived reference files: lowercased, colons removed
    pub fn file_suffix(&self) -> String {
        self.0.to_lowercase().replace(':', "")
    }
}

impl Default for SpatialReference {
    fn default() -> Self {
        SpatialReference(DEFAULT_SRS.to_string())
    }
}

impl fmt::Display for SpatialReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_suffix() {
        assert_eq!(SpatialReference::default().file_suffix(), "epsg4326");
        assert_eq!(SpatialReference::from_string("EPSG:3577").unwrap().file_suffix(), "epsg3577");
    }

    #[test]
    fn test_empty_rejected() {
        assert!(SpatialReference::from_string("  ").is_err());
    }
}
