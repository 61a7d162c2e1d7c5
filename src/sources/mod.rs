//! Tracker input sources: recorded positions, directions and plot records

use serde::Deserialize;

use crate::Fix;

pub mod directions;
pub mod plots;

#[cfg(feature = "csv")]
mod csv_file;

#[cfg(feature = "csv")]
pub use csv_file::CsvSource;

/// Position source
pub trait PositionsSource {
    /// Fetch the recorded positions, oldest first
    fn fetch(&mut self) -> Result<Vec<Fix>, String>;
}

/// Column names of a position source
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldsConfiguration {
    pub coordinates: String,
    pub time: String,
    pub accuracy: String,
    pub altitude: String,
    /// Coordinates stored as `lon,lat` instead of `lat,lon`
    pub flip_coordinates: bool,
}

impl Default for FieldsConfiguration {
    fn default() -> Self {
        Self {
            coordinates: "coordinates".to_string(),
            time: "time".to_string(),
            accuracy: "accuracy".to_string(),
            altitude: "altitude".to_string(),
            flip_coordinates: false,
        }
    }
}
