//! Retiling and manifest parsing
//!
//! `gdal_retile.py` cuts the reprojected raster into square tiles and
//! writes a `;`-delimited manifest into the target directory, one line per
//! tile: `filename;minlon;maxlon;minlat;maxlat`.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::constants::{retile, tools};
use super::executor::CommandExecutor;
use crate::errors::{TileError, TileResult};

const MANIFEST_FIELDS: usize = 5;

/// One tile written by the retiling tool
///
/// `minlon` and `minlat` are truncated toward zero; `maxlon` and `maxlat`
/// keep the value from the manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct TileFile {
    /// Tile file name as written in the manifest
    pub filename: String,
    pub minlon: i64,
    pub maxlon: f64,
    pub minlat: i64,
    pub maxlat: f64,
}

/// Settings for the retile step
#[derive(Debug, Clone, PartialEq)]
pub struct RetileOptions {
    /// Directory receiving tiles and the manifest
    pub output_dir: PathBuf,
    /// Square tile edge in pixels
    pub pixel_size: u32,
    /// GDAL output format driver
    pub output_format: String,
    /// Format creation options, each `KEY=VALUE`
    pub create_options: Vec<String>,
    /// Manifest file name inside `output_dir`
    pub manifest_name: String,
}

impl Default for RetileOptions {
    fn default() -> Self {
        RetileOptions {
            output_dir: PathBuf::from(retile::TARGET_DIR),
            pixel_size: retile::PIXEL_SIZE,
            output_format: retile::OUTPUT_FORMAT.to_string(),
            create_options: retile::CREATE_OPTIONS.iter().map(|s| s.to_string()).collect(),
            manifest_name: retile::MANIFEST_NAME.to_string(),
        }
    }
}

impl RetileOptions {
    /// Path the manifest is read back from
    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(&self.manifest_name)
    }

    pub fn validate(&self) -> TileResult<()> {
        if self.pixel_size == 0 {
            return Err(TileError::ConfigError("pixel_size must be a positive integer".to_string()));
        }
        if self.output_format.trim().is_empty() {
            return Err(TileError::ConfigError("output_format must not be empty".to_string()));
        }
        if self.manifest_name.trim().is_empty() || self.manifest_name.contains(['/', '\\']) {
            return Err(TileError::ConfigError(format!(
                "manifest must be a plain file name, got {:?}",
                self.manifest_name
            )));
        }
        for option in &self.create_options {
            validate_create_option(option)?;
        }
        Ok(())
    }
}

/// A creation option must look like `KEY=VALUE` with a non-empty key
pub fn validate_create_option(option: &str) -> TileResult<()> {
    match option.split_once('=') {
        Some((key, _)) if !key.trim().is_empty() => Ok(()),
        _ => Err(TileError::ConfigError(format!("Creation option {:?} is not KEY=VALUE", option))),
    }
}

/// Build the retile argument list
pub fn retile_args(input: &Path, options: &RetileOptions) -> Vec<String> {
    let pixel_size = options.pixel_size.to_string();

    let mut args = vec![
        "-v".to_string(),
        "-targetDir".to_string(), options.output_dir.display().to_string(),
        "-ps".to_string(), pixel_size.clone(), pixel_size,
        "-of".to_string(), options.output_format.clone(),
        "-csv".to_string(), options.manifest_name.clone(),
    ];
    // ['-co', 'FORMAT=NC4', '-co', 'COMPRESS=DEFLATE', ...]
    for option in &options.create_options {
        args.push("-co".to_string());
        args.push(option.clone());
    }
    args.push(input.display().to_string());
    args
}

/// Split a raster into tiles and return the tiles the tool reports
///
/// # Arguments
/// * `executor` - Runs the external retiling tool
/// * `input` - Raster reference to cut
/// * `options` - Target directory, tile size, format and creation options
///
/// # Returns
/// One `TileFile` per manifest line, in manifest order
pub fn retile<E: CommandExecutor + ?Sized>(executor: &E, input: &Path, options: &RetileOptions) -> TileResult<Vec<TileFile>> {
    options.validate()?;

    let manifest = options.manifest_path();
    // A manifest left by an earlier run must not be read back as ours.
    if manifest.exists() {
        debug!("Removing stale manifest {}", manifest.display());
        fs::remove_file(&manifest)?;
    }

    info!("Retiling {} into {}x{} pixel tiles in {}",
          input.display(), options.pixel_size, options.pixel_size, options.output_dir.display());
    executor.execute(tools::RETILE, &retile_args(input, options))?;

    let tiles = read_manifest(&manifest)?;
    info!("Retiling produced {} tiles", tiles.len());
    Ok(tiles)
}

/// Read and parse a manifest file
pub fn read_manifest(path: &Path) -> TileResult<Vec<TileFile>> {
    let contents = fs::read_to_string(path)?;
    parse_manifest(&contents)
}

/// Parse manifest text into tile records
///
/// Blank lines are skipped. Any other line must have exactly five fields.
pub fn parse_manifest(contents: &str) -> TileResult<Vec<TileFile>> {
    contents.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| parse_manifest_line(line.trim(), index + 1))
        .collect()
}

fn parse_manifest_line(line: &str, line_number: usize) -> TileResult<TileFile> {
    let parse_error = |reason: String| TileError::ManifestParseError {
        line_number,
        line: line.to_string(),
        reason,
    };

    let fields: Vec<&str> = line.split(retile::MANIFEST_DELIMITER).collect();
    if fields.len() != MANIFEST_FIELDS {
        return Err(parse_error(format!("expected {} fields, found {}", MANIFEST_FIELDS, fields.len())));
    }

    let number = |name: &str, value: &str| -> TileResult<f64> {
        let parsed = value.trim().parse::<f64>()
            .map_err(|_| parse_error(format!("{} is not a number: {:?}", name, value)))?;
        if parsed.is_finite() {
            Ok(parsed)
        } else {
            Err(parse_error(format!("{} is not finite: {:?}", name, value)))
        }
    };

    let filename = fields[0].trim();
    if filename.is_empty() {
        return Err(parse_error("empty filename".to_string()));
    }

    Ok(TileFile {
        filename: filename.to_string(),
        // trunc, not floor: -5.1 becomes -5
        minlon: number("minlon", fields[1])?.trunc() as i64,
        maxlon: number("maxlon", fields[2])?,
        minlat: number("minlat", fields[3])?.trunc() as i64,
        maxlat: number("maxlat", fields[4])?,
    })
}
