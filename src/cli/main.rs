//! Command-line front end.
//!
//! Reads a places CSV, builds a geospatial frame and prints the frame, its
//! convex hull, or the places inside a named neighborhood as GeoJSON.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use mobility_index::config::Config;
use mobility_index::io::{read_geojson, read_table, write_geojson};
use mobility_index::{
    BoundaryPolicy, CoordinateFrameBuilder, Crs, GeoFrame, HullComputer, NeighborhoodFilter,
};

#[derive(Parser, Debug)]
#[command(name = "mobility")]
#[command(about = "Geospatial helpers for place records")]
struct Args {
    /// Optional TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// CRS of input coordinates (overrides config)
    #[arg(long, global = true)]
    crs: Option<Crs>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a places CSV into GeoJSON points
    Frame {
        /// Places CSV (optionally .gz) with lat/lng columns
        #[arg(short, long)]
        places: PathBuf,
    },

    /// Convex hull of all places
    Hull {
        #[arg(short, long)]
        places: PathBuf,
    },

    /// Places inside a named neighborhood
    Within {
        #[arg(short, long)]
        places: PathBuf,

        /// Neighborhood polygons as GeoJSON
        #[arg(short, long)]
        neighborhoods: PathBuf,

        /// Neighborhood name to select
        #[arg(long)]
        name: String,

        /// Count places on the boundary as inside
        #[arg(long)]
        inclusive: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (stderr, stdout carries GeoJSON)
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let output = run(&args)?;

    info!("Writing {} features", output.len());
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_geojson(&output, &mut handle).context("Failed to write GeoJSON")?;
    writeln!(handle)?;

    Ok(())
}

/// Execute the selected subcommand and return the frame to print
fn run(args: &Args) -> Result<GeoFrame> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    if let Some(crs) = args.crs {
        config.frame.crs = crs;
    }

    let output = match &args.command {
        Command::Frame { places } => load_places(&config, places)?,
        Command::Hull { places } => {
            let frame = load_places(&config, places)?;
            HullComputer::new(config.hull())
                .convex_hull(&frame)
                .context("Failed to compute convex hull")?
        }
        Command::Within {
            places,
            neighborhoods,
            name,
            inclusive,
        } => {
            if *inclusive {
                config.join.boundary = BoundaryPolicy::Inclusive;
            }
            let frame = load_places(&config, places)?;
            let hoods = read_geojson(neighborhoods, config.frame.crs)
                .context("Failed to load neighborhoods")?;
            NeighborhoodFilter::new(config.join.clone())
                .places_in_neighborhood(&hoods, &frame, name)
                .context("Failed to filter places")?
        }
    };

    Ok(output)
}

fn load_places(config: &Config, path: &Path) -> Result<GeoFrame> {
    let table = read_table(path).context("Failed to read places file")?;
    CoordinateFrameBuilder::new(config.frame.clone())
        .build(&table)
        .context("Failed to build place frame")
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Geometry;
    use serde_json::json;

    const PLACES: &str = "place_id,lat,lng\n\
                          1,47.615866,-122.309913\n\
                          2,47.618850,-122.325005\n\
                          3,47.596843,-122.326929\n";

    const NEIGHBORHOODS: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": { "nhood": "Capitol Hill" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [-122.330, 47.610], [-122.300, 47.610],
                    [-122.300, 47.630], [-122.330, 47.630],
                    [-122.330, 47.610]
                ]]
            }
        }]
    }"#;

    fn parse(dir: &Path, extra: &[&str]) -> Args {
        let places = dir.join("places.csv");
        std::fs::write(&places, PLACES).unwrap();
        let mut argv = vec!["mobility".to_string()];
        argv.extend(extra.iter().map(|a| a.to_string()));
        argv.push("--places".to_string());
        argv.push(places.display().to_string());
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_load_places_uses_config_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("renamed.csv");
        std::fs::write(&path, "id,y,x\n1,10.0,20.0\n").unwrap();

        let config =
            Config::from_toml("[frame]\nlat_column = \"y\"\nlng_column = \"x\"\n").unwrap();
        let frame = load_places(&config, &path).unwrap();
        assert_eq!(
            frame.records()[0].geometry,
            Geometry::Point(geo::Point::new(20.0, 10.0))
        );

        assert!(load_places(&Config::default(), &path).is_err());
    }

    #[test]
    fn test_frame_command() {
        let dir = tempfile::tempdir().unwrap();
        let output = run(&parse(dir.path(), &["frame"])).unwrap();
        assert_eq!(output.len(), 3);
        assert_eq!(output.crs(), Crs::wgs84());
    }

    #[test]
    fn test_hull_command_with_crs_flag() {
        let dir = tempfile::tempdir().unwrap();
        let output = run(&parse(dir.path(), &["--crs", "EPSG:3857", "hull"])).unwrap();
        assert_eq!(output.len(), 1);
        assert_eq!(output.crs(), Crs::from_epsg(3857));
        assert!(matches!(output.records()[0].geometry, Geometry::Polygon(_)));
    }

    #[test]
    fn test_hull_command_on_empty_csv_fails() {
        let dir = tempfile::tempdir().unwrap();
        let args = parse(dir.path(), &["hull"]);
        std::fs::write(dir.path().join("places.csv"), "place_id,lat,lng\n").unwrap();
        assert!(run(&args).is_err());
    }

    #[test]
    fn test_within_command() {
        let dir = tempfile::tempdir().unwrap();
        let hoods = dir.path().join("hoods.geojson");
        std::fs::write(&hoods, NEIGHBORHOODS).unwrap();
        let hoods = hoods.display().to_string();

        let args = parse(
            dir.path(),
            &["within", "--neighborhoods", &hoods, "--name", "Capitol Hill"],
        );
        let output = run(&args).unwrap();
        let ids: Vec<_> = output.column("place_id").map(|v| v.cloned()).collect();
        assert_eq!(ids, vec![Some(json!(1)), Some(json!(2))]);

        let args = parse(
            dir.path(),
            &["within", "--neighborhoods", &hoods, "--name", "Atlantis", "--inclusive"],
        );
        assert!(run(&args).unwrap().is_empty());
    }

    #[test]
    fn test_config_file_flag() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("mobility.toml");
        std::fs::write(&config, "[frame]\ncrs = \"EPSG:3857\"\n").unwrap();
        let config = config.display().to_string();

        let output = run(&parse(dir.path(), &["--config", &config, "frame"])).unwrap();
        assert_eq!(output.crs(), Crs::from_epsg(3857));
    }
}
