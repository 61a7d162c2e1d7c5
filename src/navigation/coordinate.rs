//! Coordinate definition and great-circle distance

use std::fmt;
use std::str::FromStr;

use geo::geometry::Point;
use serde::{Deserialize, Serialize};

use crate::error::CoordinateError;

/// Mean earth radius used by the haversine formula, in meters
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Latitude/longitude pair in degrees
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check the latitude and longitude ranges. NaN is never valid.
    pub fn validate(&self) -> Result<(), CoordinateError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(self.longitude));
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Great-circle distance in meters
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine(self, other)
    }
}

/// Haversine distance between two coordinates, in meters
pub fn haversine(from: &Coordinate, to: &Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // rounding can push `a` past 1 for antipodal points
    let a = a.min(1.0);

    2.0 * EARTH_RADIUS_METERS * a.sqrt().atan2((1.0 - a).sqrt())
}

impl From<Point> for Coordinate {
    fn from(point: Point) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl From<Coordinate> for Point {
    fn from(coordinate: Coordinate) -> Self {
        Point::new(coordinate.longitude, coordinate.latitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Parse `lat,lon`, `lat;lon` or `lat lon`
impl FromStr for Coordinate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let separator = match s {
            s if s.contains(',') => ",",
            s if s.contains(';') => ";",
            _ => " ",
        };
        let parts: Vec<&str> = s
            .trim()
            .split(separator)
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != 2 {
            return Err(format!("Expected `lat,lon`, got `{}`", s));
        }

        let latitude = parts[0]
            .parse::<f64>()
            .map_err(|e| format!("Invalid latitude format: {}", e))?;
        let longitude = parts[1]
            .parse::<f64>()
            .map_err(|e| format!("Invalid longitude format: {}", e))?;

        Ok(Self::new(latitude, longitude))
    }
}
