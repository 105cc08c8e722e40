//! Names and defaults shared by the GDAL command builders

/// External tool executables
pub mod tools {
    /// Virtual raster builder used to stack bands
    pub const BUILD_VRT: &str = "gdalbuildvrt";
    /// Reprojection / warp tool
    pub const WARP: &str = "gdalwarp";
    /// Retiling script
    pub const RETILE: &str = "gdal_retile.py";
    /// Raster metadata dump
    pub const INFO: &str = "gdalinfo";
}

/// Reprojection defaults
pub mod reproject {
    /// Output pixel size in degrees (about 25 m at the equator)
    pub const PIXEL_RESOLUTION: f64 = 0.00025;
    /// Nodata sentinel written on both read and write
    pub const NODATA: f64 = -999.0;
}

/// Retiling defaults
pub mod retile {
    pub const TARGET_DIR: &str = ".";
    /// Square tile edge in pixels
    pub const PIXEL_SIZE: u32 = 4000;
    pub const OUTPUT_FORMAT: &str = "NetCDF";
    pub const CREATE_OPTIONS: [&str; 3] = ["FORMAT=NC4", "COMPRESS=DEFLATE", "ZLEVEL=1"];
    /// Manifest written by the retiling tool into the target directory
    pub const MANIFEST_NAME: &str = "tiles.csv";
    pub const MANIFEST_DELIMITER: char = ';';
}

/// Extension of virtual raster reference files
pub const VRT_EXTENSION: &str = "vrt";
