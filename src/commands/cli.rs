//! Command-line definition

use clap::{value_parser, Arg, ArgAction, Command as ClapCommand};

/// Build the `rastertile` argument parser
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("rastertile")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Stack co-registered raster bands, reproject them onto an aligned grid and cut them into named tiles")
        .arg(
            Arg::new("input")
                .help("Input raster files, stacked in the given order")
                .num_args(1..)
                .action(ArgAction::Append)
                .required_unless_present("manifest")
                .index(1),
        )
        .arg(
            Arg::new("basename")
                .short('b')
                .long("basename")
                .help("Base name for intermediate VRT files")
                .value_name("NAME")
                .required_unless_present("manifest"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML configuration file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .help("Directory receiving the tiles")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("pixel-size")
                .long("pixel-size")
                .help("Tile edge in pixels")
                .value_name("PIXELS")
                .value_parser(value_parser!(u32).range(1..))
                .required(false),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output raster format (GDAL driver name)")
                .value_name("FORMAT")
                .required(false),
        )
        .arg(
            Arg::new("co")
                .long("co")
                .help("Creation option KEY=VALUE; repeat for several (replaces the defaults)")
                .value_name("KEY=VALUE")
                .action(ArgAction::Append)
                .required(false),
        )
        .arg(
            Arg::new("srs")
                .long("srs")
                .help("Target spatial reference (e.g., EPSG:4326)")
                .value_name("SRS")
                .required(false),
        )
        .arg(
            Arg::new("template")
                .short('t')
                .long("template")
                .help("Filename template, e.g. '{ga_label}/{x}_{y}.{extension}'")
                .value_name("TEMPLATE")
                .required(false),
        )
        .arg(
            Arg::new("attr")
                .long("attr")
                .help("Dataset attribute KEY=VALUE available to the template; repeatable")
                .value_name("KEY=VALUE")
                .action(ArgAction::Append)
                .required(false),
        )
        .arg(
            Arg::new("rename")
                .long("rename")
                .help("Move tiles to their templated names instead of printing the mapping")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("extent")
                .long("extent")
                .help("Only stack the inputs and print their tile-aligned extent")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("manifest")
                .long("manifest")
                .help("Rename tiles from an existing retile manifest instead of running the pipeline")
                .value_name("FILE")
                .conflicts_with("extent")
                .required(false),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
}
