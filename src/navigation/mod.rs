//! Guidance towards a plot

pub mod coordinate;
pub mod gpx;
pub mod position;
pub mod route;
pub mod tracker;
