//! Position definition

use time::OffsetDateTime;

use super::coordinate::Coordinate;

/// Recorded device position
#[derive(Clone, Debug, PartialEq)]
pub struct Fix {
    pub coordinate: Coordinate,
    pub time: OffsetDateTime,
    /// Horizontal accuracy in meters
    pub accuracy: Option<f32>,
    pub altitude: Option<f64>,
}

impl Fix {
    pub fn basic(coordinate: Coordinate, time: OffsetDateTime) -> Self {
        Self {
            coordinate,
            time,
            accuracy: None,
            altitude: None,
        }
    }
}
