//! Integration tests for the tiling pipeline

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use rastertile::gdal::command_line;
use rastertile::naming::apply_renames;
use rastertile::{
    create_tiles, map_filenames, CommandExecutor, DatasetAttributes, PipelineConfig,
    RetileOptions, TileError, TilePipeline, TileResult,
};

const FOOTPRINT: &str = r#"{"wgs84Extent": {"type": "Polygon", "coordinates": [[
    [148.4, -35.6], [148.4, -34.2], [149.7, -34.2], [149.7, -35.6], [148.4, -35.6]
]]}}"#;

/// Stands in for the GDAL tools: records calls, answers gdalinfo and
/// writes a manifest where gdal_retile.py would.
struct FakeGdal {
    calls: RefCell<Vec<(String, Vec<String>)>>,
    manifest: String,
    fail: Option<&'static str>,
}

impl FakeGdal {
    fn new(manifest: &str) -> Self {
        FakeGdal { calls: RefCell::new(Vec::new()), manifest: manifest.to_string(), fail: None }
    }

    fn programs(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(p, _)| p.clone()).collect()
    }

    fn args(&self, program: &str) -> Vec<String> {
        self.calls.borrow().iter().find(|(p, _)| p == program).map(|(_, a)| a.clone()).unwrap_or_default()
    }
}

impl CommandExecutor for FakeGdal {
    fn execute(&self, program: &str, args: &[String]) -> TileResult<String> {
        self.calls.borrow_mut().push((program.to_string(), args.to_vec()));
        if self.fail == Some(program) {
            return Err(TileError::ExternalToolError {
                command: command_line(program, args),
                exit_code: Some(2),
                stderr: String::new(),
            });
        }
        match program {
            "gdalinfo" => Ok(FOOTPRINT.to_string()),
            "gdal_retile.py" => {
                let value = |flag: &str| args.iter().position(|a| a == flag).map(|i| args[i + 1].clone());
                let dir = PathBuf::from(value("-targetDir").unwrap_or_default());
                let name = value("-csv").unwrap_or_default();
                // Tiles named the way gdal_retile does: <input stem>_<row>_<col>.<ext>
                for line in self.manifest.lines() {
                    if let Some(tile) = line.split(';').next() {
                        fs::write(dir.join(tile), b"tile")?;
                    }
                }
                fs::write(dir.join(name), &self.manifest)?;
                Ok(String::new())
            }
            _ => Ok(String::new()),
        }
    }
}

const MANIFEST: &str = "\
scene.epsg4326_1_1.nc;148.0;149.0;-35.0;-34.0
scene.epsg4326_1_2.nc;149.0;150.0;-35.0;-34.0
scene.epsg4326_2_1.nc;148.0;149.0;-36.0;-35.0
";

fn options(dir: &Path) -> RetileOptions {
    RetileOptions { output_dir: dir.to_path_buf(), ..RetileOptions::default() }
}

#[test]
fn test_create_tiles_runs_stages_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let gdal = FakeGdal::new(MANIFEST);
    let inputs = ["band_10.tif", "band_20.tif"];

    let tiles = create_tiles(&gdal, &inputs, "scene", Some(&options(dir.path()))).unwrap();

    assert_eq!(gdal.programs(), vec!["gdalbuildvrt", "gdalinfo", "gdalwarp", "gdal_retile.py"]);
    assert_eq!(tiles.len(), MANIFEST.lines().count());
    assert_eq!(tiles[2].minlat, -36);

    assert_eq!(gdal.args("gdalbuildvrt"), vec!["-separate", "scene.vrt", "band_10.tif", "band_20.tif"]);
    assert_eq!(gdal.args("gdalinfo"), vec!["-json", "scene.vrt"]);
    let warp = gdal.args("gdalwarp");
    let te = warp.iter().position(|a| a == "-te").unwrap();
    assert_eq!(&warp[te + 1..te + 7], &["148", "-36", "150", "-34", "-te_srs", "EPSG:4326"]);
    assert_eq!(&warp[warp.len() - 2..], &["scene.vrt", "scene.epsg4326.vrt"]);
    assert_eq!(gdal.args("gdal_retile.py").last().map(String::as_str), Some("scene.epsg4326.vrt"));
}

#[test]
fn test_failed_stage_aborts_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let mut gdal = FakeGdal::new(MANIFEST);
    gdal.fail = Some("gdalwarp");

    let err = create_tiles(&gdal, &["a.tif"], "scene", Some(&options(dir.path()))).unwrap_err();

    assert!(matches!(err, TileError::ExternalToolError { exit_code: Some(2), .. }));
    assert_eq!(gdal.programs(), vec!["gdalbuildvrt", "gdalinfo", "gdalwarp"]);
}

#[test]
fn test_bad_tile_options_fail_before_any_tool_runs() {
    let gdal = FakeGdal::new(MANIFEST);
    let bad = RetileOptions { pixel_size: 0, ..RetileOptions::default() };

    let result = TilePipeline::new(&gdal).create_tiles(&["a.tif"], "scene", Some(&bad));

    assert!(matches!(result, Err(TileError::ConfigError(_))));
    assert!(gdal.programs().is_empty());
}

#[test]
fn test_tiles_to_named_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::from_str(&format!(r#"
        [tile]
        output_dir = {:?}
        pixel_size = 4000

        [naming]
        template = "{{ga_label}}/{{x}}_{{y}}/{{ga_label}}_{{x}}_{{y}}.{{extension}}"

        [dataset]
        ga_label = "LS8_OLI_NBAR"
    "#, dir.path().display().to_string())).unwrap();
    let gdal = FakeGdal::new(MANIFEST);

    let tiles = TilePipeline::new(&gdal)
        .with_reproject_options(config.reproject.clone())
        .create_tiles(&["b1.tif", "b2.tif"], "scene", Some(&config.tile))
        .unwrap();
    let template = config.template.as_ref().unwrap().as_str();
    let renames = map_filenames(&tiles, template, &config.dataset).unwrap();
    let moved = apply_renames(dir.path(), &renames).unwrap();

    assert_eq!(renames[0].1, "LS8_OLI_NBAR/148_-35/LS8_OLI_NBAR_148_-35.nc");
    assert_eq!(moved.len(), 3);
    assert!(dir.path().join("LS8_OLI_NBAR/148_-36/LS8_OLI_NBAR_148_-36.nc").is_file());
    assert!(!dir.path().join("scene.epsg4326_1_1.nc").exists());
}

#[test]
fn test_unknown_dataset_attribute() {
    let tiles = rastertile::gdal::parse_manifest("tile.abc.nc;5.5;6;1.2;2").unwrap();
    let err = map_filenames(&tiles, "{product_name}_{x}_{y}.{extension}", &DatasetAttributes::new()).unwrap_err();
    assert!(matches!(err, TileError::MissingAttributeError(ref key) if key == "product_name"));

    let renames = map_filenames(&tiles, "{x}_{y}.{extension}", &DatasetAttributes::new()).unwrap();
    assert_eq!(renames, vec![("tile.abc.nc".to_string(), "5_1.nc".to_string())]);
}
