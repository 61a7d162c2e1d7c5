//! GPX generator API

use gpx::{Gpx, GpxVersion, Route, Track, TrackSegment, Waypoint};

use super::coordinate::Coordinate;
use super::position::Fix;
use super::route::RouteStep;

/// Collects a guidance run: the plot, the planned route and the walked trail
pub struct GpxGenerator {
    pub name: String,
    pub waypoints: Vec<Waypoint>,
    pub routes: Vec<Route>,
    pub tracks: Vec<Track>,
}

impl GpxGenerator {
    pub fn new(name: String) -> Self {
        Self {
            name,
            waypoints: vec![],
            routes: vec![],
            tracks: vec![],
        }
    }

    /// Mark the destination
    pub fn target(&mut self, target: Coordinate, label: Option<String>) -> &mut Self {
        let mut wp = Waypoint::new(target.into());
        wp.name = label;
        self.waypoints.push(wp);

        self
    }

    /// Planned route, one point per step end
    pub fn steps(&mut self, steps: &[RouteStep]) -> &mut Self {
        if steps.is_empty() {
            return self;
        }

        let mut route = Route::default();
        route.name = Some(self.name.clone());

        if let Some(first) = steps.first() {
            route.points.push(Waypoint::new(first.start_location.into()));
        }
        for step in steps {
            let mut wp = Waypoint::new(step.end_location.into());
            wp.name = Some(step.plain_instruction());
            route.points.push(wp);
        }

        self.routes.push(route);

        self
    }

    /// Walked trail, sorted by time into a single segment
    pub fn trail(&mut self, fixes: &[Fix]) -> &mut Self {
        if fixes.is_empty() {
            return self;
        }

        let mut fixes: Vec<&Fix> = fixes.iter().collect();
        fixes.sort_by_key(|f| f.time);

        let mut segment = TrackSegment::new();
        for fix in fixes {
            let mut wp = Waypoint::new(fix.coordinate.into());
            wp.time = Some(fix.time.into());
            wp.elevation = fix.altitude;
            wp.description = fix.accuracy.map(|a| format!("accuracy {} m", a));
            segment.points.push(wp);
        }

        let mut track = Track::new();
        track.name = Some(self.name.clone());
        track.segments.push(segment);
        self.tracks.push(track);

        self
    }

    pub fn generate(self) -> Result<Gpx, String> {
        let mut gpx: Gpx = Default::default();
        gpx.version = GpxVersion::Gpx11;
        gpx.creator = Some("gravefinder".to_string());
        gpx.waypoints = self.waypoints;
        gpx.routes = self.routes;
        gpx.tracks = self.tracks;

        Ok(gpx)
    }
}
