//! gravefinder - Walking guidance to memorial park plots

mod config;
mod error;
mod navigation;
pub mod sources;

pub use config::{Configs, TrackerOptions};
pub use error::{CoordinateError, PlotError, TrackerError};
pub use navigation::coordinate::{haversine, Coordinate, EARTH_RADIUS_METERS};
pub use navigation::gpx::GpxGenerator;
pub use navigation::position::Fix;
pub use navigation::route::{strip_markup, RouteStep};
pub use navigation::tracker::{Progress, ProximityTracker, TrackingSession, STEP_RADIUS_METERS};
pub use sources::{FieldsConfiguration, PositionsSource};
