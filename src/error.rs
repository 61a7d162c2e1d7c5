//! Error types

use thiserror::Error;

/// Why a coordinate was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CoordinateError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// Failures of the proximity tracker
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackerError {
    /// Target out of the valid latitude/longitude range. Fatal to the session.
    #[error("invalid target: {0}")]
    InvalidTarget(#[source] CoordinateError),
}

/// Plot records that can't be used as a navigation target
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlotError {
    #[error("plot {plot_number} has no location data")]
    MissingLocation { plot_number: String },
    #[error("plot {plot_number} has an invalid location: {source}")]
    InvalidLocation {
        plot_number: String,
        #[source]
        source: CoordinateError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = TrackerError::InvalidTarget(CoordinateError::LatitudeOutOfRange(95.0));
        assert_eq!("invalid target: latitude 95 is outside [-90, 90]", err.to_string());

        let err = PlotError::MissingLocation {
            plot_number: "A-12".to_string(),
        };
        assert_eq!("plot A-12 has no location data", err.to_string());

        let err = PlotError::InvalidLocation {
            plot_number: "B-3".to_string(),
            source: CoordinateError::LongitudeOutOfRange(200.5),
        };
        assert!(err.to_string().contains("longitude 200.5"));
    }
}
