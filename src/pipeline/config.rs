//! Pipeline configuration file
//!
//! ```toml
//! [tile]
//! output_dir = "/data/tiles"
//! pixel_size = 4000
//! output_format = "NetCDF"
//! create_options = ["FORMAT=NC4", "COMPRESS=DEFLATE", "ZLEVEL=1"]
//!
//! [reproject]
//! srs = "EPSG:4326"
//! resolution = 0.00025
//! nodata = -999
//!
//! [naming]
//! template = "{product_name}/{x}_{y}/{year}/{product_name}_{x}_{y}.{extension}"
//! manifest = "tiles.csv"
//!
//! [dataset]
//! product_name = "NBAR"
//! year = 2015
//! ```
//!
//! Every table and key is optional, but unknown ones are rejected.

use std::fs;
use std::path::{Path, PathBuf};

use crate::coordinate::SpatialReference;
use crate::errors::{TileError, TileResult};
use crate::gdal::{ReprojectOptions, RetileOptions};
use crate::naming::{DatasetAttributes, FilenameTemplate};

const TABLES: [&str; 4] = ["tile", "reproject", "naming", "dataset"];
const TILE_KEYS: [&str; 4] = ["output_dir", "pixel_size", "output_format", "create_options"];
const REPROJECT_KEYS: [&str; 3] = ["srs", "resolution", "nodata"];
const NAMING_KEYS: [&str; 2] = ["template", "manifest"];

/// Settings for a full pipeline run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineConfig {
    /// Options forwarded to the retiler
    pub tile: RetileOptions,
    /// Options for the warp step
    pub reproject: ReprojectOptions,
    /// Template for final tile names, if tiles are to be renamed
    pub template: Option<FilenameTemplate>,
    /// Attributes available to the template
    pub dataset: DatasetAttributes,
}

impl PipelineConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> TileResult<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_str(&contents)
            .map_err(|e| match e {
                TileError::ConfigError(msg) => TileError::ConfigError(format!("{}: {}", path.as_ref().display(), msg)),
                other => other,
            })
    }

    /// Parse configuration from a TOML string
    pub fn from_str(content: &str) -> TileResult<Self> {
        let toml_value: toml::Value = content.parse()
            .map_err(|e| TileError::ConfigError(format!("Failed to parse TOML: {}", e)))?;
        let root = toml_value.as_table()
            .ok_or_else(|| TileError::ConfigError("Configuration must be a table".to_string()))?;
        reject_unknown(root, &TABLES, "configuration")?;

        let mut config = PipelineConfig::default();

        if let Some(tile) = table(root, "tile")? {
            reject_unknown(tile, &TILE_KEYS, "[tile]")?;
            if let Some(dir) = string(tile, "tile", "output_dir")? {
                config.tile.output_dir = PathBuf::from(dir);
            }
            if let Some(size) = integer(tile, "tile", "pixel_size")? {
                config.tile.pixel_size = u32::try_from(size)
                    .ok()
                    .filter(|s| *s > 0)
                    .ok_or_else(|| TileError::ConfigError(format!("tile.pixel_size must be a positive integer, got {}", size)))?;
            }
            if let Some(format) = string(tile, "tile", "output_format")? {
                config.tile.output_format = format;
            }
            if let Some(options) = tile.get("create_options") {
                config.tile.create_options = string_list(options, "tile.create_options")?;
            }
        }

        if let Some(reproject) = table(root, "reproject")? {
            reject_unknown(reproject, &REPROJECT_KEYS, "[reproject]")?;
            if let Some(srs) = string(reproject, "reproject", "srs")? {
                config.reproject.srs = SpatialReference::from_string(&srs)?;
            }
            if let Some(resolution) = number(reproject, "reproject", "resolution")? {
                config.reproject.resolution = resolution;
            }
            if let Some(nodata) = number(reproject, "reproject", "nodata")? {
                config.reproject.nodata = nodata;
            }
        }

        if let Some(naming) = table(root, "naming")? {
            reject_unknown(naming, &NAMING_KEYS, "[naming]")?;
            if let Some(template) = string(naming, "naming", "template")? {
                config.template = Some(FilenameTemplate::parse(&template)?);
            }
            if let Some(manifest) = string(naming, "naming", "manifest")? {
                config.tile.manifest_name = manifest;
            }
        }

        if let Some(dataset) = table(root, "dataset")? {
            config.dataset = DatasetAttributes::from_toml_table(dataset)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check option values without running anything
    pub fn validate(&self) -> TileResult<()> {
        self.tile.validate()?;
        self.reproject.validate()
    }
}

fn reject_unknown(table: &toml::value::Table, known: &[&str], context: &str) -> TileResult<()> {
    match table.keys().find(|k| !known.contains(&k.as_str())) {
        Some(key) => Err(TileError::ConfigError(format!(
            "Unknown key {:?} in {} (expected one of: {})", key, context, known.join(", ")
        ))),
        None => Ok(()),
    }
}

fn table<'t>(root: &'t toml::value::Table, name: &str) -> TileResult<Option<&'t toml::value::Table>> {
    match root.get(name) {
        None => Ok(None),
        Some(value) => value.as_table()
            .map(Some)
            .ok_or_else(|| TileError::ConfigError(format!("[{}] must be a table", name))),
    }
}

fn string(table: &toml::value::Table, section: &str, key: &str) -> TileResult<Option<String>> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => value.as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| TileError::ConfigError(format!("{}.{} must be a string", section, key))),
    }
}

fn integer(table: &toml::value::Table, section: &str, key: &str) -> TileResult<Option<i64>> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => value.as_integer()
            .map(Some)
            .ok_or_else(|| TileError::ConfigError(format!("{}.{} must be an integer", section, key))),
    }
}

fn number(table: &toml::value::Table, section: &str, key: &str) -> TileResult<Option<f64>> {
    match table.get(key) {
        None => Ok(None),
        Some(toml::Value::Float(f)) => Ok(Some(*f)),
        Some(toml::Value::Integer(i)) => Ok(Some(*i as f64)),
        Some(_) => Err(TileError::ConfigError(format!("{}.{} must be a number", section, key))),
    }
}

fn string_list(value: &toml::Value, name: &str) -> TileResult<Vec<String>> {
    let items = value.as_array()
        .ok_or_else(|| TileError::ConfigError(format!("{} must be an array of strings", name)))?;
    items.iter()
        .map(|item| item.as_str()
            .map(str::to_string)
            .ok_or_else(|| TileError::ConfigError(format!("{} must be an array of strings", name))))
        .collect()
}
