//! gravefinder cli - Walking guidance to memorial park plots

use std::fs::{self, File};
use std::io::BufWriter;

use argopt::{cmd_group, subcmd};
use csv::Reader;
use time::format_description::well_known;
use tracing_subscriber::EnvFilter;

use gravefinder::sources::directions::parse_directions;
use gravefinder::sources::plots::{nearest, parse_plots};
use gravefinder::sources::CsvSource;
use gravefinder::{haversine, Configs, Coordinate, GpxGenerator, PositionsSource, ProximityTracker};

/// CLI of gravefinder - Find your way to a plot.
/// Coordinates are given as `--opt=LAT,LON`
#[cmd_group(commands = [distance, replay, plots])]
fn main() -> Result<(), String> {}

/// Straight line distance between two coordinates, in meters
#[subcmd]
fn distance(
    /// Origin, LAT,LON
    #[opt(long)]
    from: String,
    /// Destination, LAT,LON
    #[opt(long)]
    to: String,
) -> Result<(), String> {
    let from: Coordinate = from.parse()?;
    let to: Coordinate = to.parse()?;
    from.validate().map_err(|e| e.to_string())?;
    to.validate().map_err(|e| e.to_string())?;

    println!("{:.1}", haversine(&from, &to));

    Ok(())
}

/// Replay recorded positions against a walking route
#[subcmd]
fn replay(
    /// Directions provider response, JSON
    directions: String,
    /// Recorded positions, CSV
    positions: String,
    /// Plot location, LAT,LON
    #[opt(long)]
    target: String,
    /// Fields and tracker configuration. Default: .gravefinder.yaml, ~/.gravefinder.yaml
    #[opt(long)]
    config: Option<String>,
    /// Write the target, route and walked trail to this GPX file
    #[opt(long)]
    gpx: Option<String>,
    /// Debug logging
    #[opt(long)]
    verbose: bool,
) -> Result<(), String> {
    init_logging(verbose);

    let target: Coordinate = target.parse()?;
    let conf = load_configs(config)?;

    let json = fs::read_to_string(directions)
        .map_err(|e| format!("Failed on read the directions: {}", e))?;
    let steps = parse_directions(&json)?;

    let csv = File::open(positions)
        .map_err(|e| format!("Failed on open the CSV file: {}", e))?;
    let mut source = CsvSource::new(Reader::from_reader(csv), Some(conf.fields.clone()));
    let fixes = source.fetch()?;

    let mut tracker = ProximityTracker::new();
    tracker.step_radius(conf.tracker.step_radius_meters);
    tracker
        .start(target, steps.clone())
        .map_err(|e| e.to_string())?;

    for fix in &fixes {
        if let Some(progress) = tracker.on_position_update(fix.coordinate) {
            let time = fix
                .time
                .format(&well_known::Rfc3339)
                .map_err(|e| e.to_string())?;
            println!(
                "{} {} - step {}: {}",
                time,
                progress,
                progress.current_step_index + 1,
                progress.instruction_text
            );
        }
    }

    if let Some(instruction) = tracker.current_instruction() {
        println!("Current instruction: {}", instruction);
    }
    tracker.reset();

    if let Some(path) = gpx {
        let destination = File::create(path)
            .map_err(|e| format!("Failed on create the destination file: {}", e))?;

        let mut generator = GpxGenerator::new(format!("Walk to {}", target));
        generator
            .target(target, Some("Destination".to_string()))
            .steps(&steps)
            .trail(&fixes);
        let doc = generator.generate()?;

        let mut writer = BufWriter::new(destination);
        gpx::write(&doc, &mut writer).map_err(|e| e.to_string())?;
    }

    Ok(())
}

/// List plots by distance from a position
#[subcmd]
fn plots(
    /// Backend plots response, JSON
    plots_file: String,
    /// Current position, LAT,LON
    #[opt(long)]
    from: String,
) -> Result<(), String> {
    let from: Coordinate = from.parse()?;
    from.validate().map_err(|e| e.to_string())?;

    let json = fs::read_to_string(plots_file)
        .map_err(|e| format!("Failed on read the plots: {}", e))?;
    let plots = parse_plots(&json)?;

    for (plot, meters) in nearest(&plots, &from) {
        match plot.section_label() {
            Some(section) => println!("{} ({}): {:.0} m", plot.label(), section, meters),
            None => println!("{}: {:.0} m", plot.label(), meters),
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "gravefinder=debug"
    } else {
        "gravefinder=info"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load the current config, an explicitly provided file must be valid
fn load_configs(provided: Option<String>) -> Result<Configs, String> {
    if let Some(sprovided) = provided {
        return Configs::from_file(sprovided);
    }

    let mut options = vec![".gravefinder.yaml".to_string()];

    if let Some(home) = dirs::home_dir() {
        if let Some(shome) = home.to_str() {
            options.push(format!("{}/.gravefinder.yaml", shome));
        }
    }

    Ok(Configs::load(options))
}
