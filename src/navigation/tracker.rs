//! Proximity tracker API

use std::fmt;

use tracing::{debug, info, warn};

use super::coordinate::{haversine, Coordinate};
use super::route::RouteStep;
use crate::error::TrackerError;

/// Distance to the end of the current step under which the step counts as done
pub const STEP_RADIUS_METERS: f64 = 10.0;

/// State of one guidance run towards a target
#[derive(Clone, Debug, PartialEq)]
pub struct TrackingSession {
    pub target: Coordinate,
    pub steps: Vec<RouteStep>,
    pub current_step_index: usize,
    pub last_known_position: Option<Coordinate>,
    pub last_computed_distance_meters: Option<f64>,
}

/// Outcome of a position update
#[derive(Clone, Debug, PartialEq)]
pub struct Progress {
    pub distance_meters: f64,
    pub current_step_index: usize,
    /// Plain text instruction of the current step, empty without steps
    pub instruction_text: String,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "You are {:.0} meters away", self.distance_meters)
    }
}

#[derive(Clone, Debug, PartialEq)]
enum State {
    Idle,
    Tracking(TrackingSession),
}

/// Follows the device towards a target and walks through the route steps.
///
/// Position updates on an idle tracker are ignored and return `None`.
#[derive(Clone, Debug)]
pub struct ProximityTracker {
    state: State,
    /// Step completion radius in meters
    step_radius_meters: f64,
}

impl Default for ProximityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProximityTracker {
    /// Start an idle tracker
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            step_radius_meters: STEP_RADIUS_METERS,
        }
    }

    /// Override the step radius. Anything but a finite positive distance
    /// restores the default.
    pub fn step_radius(&mut self, meters: f64) -> &mut Self {
        self.step_radius_meters = if meters.is_finite() && meters > 0.0 {
            meters
        } else {
            STEP_RADIUS_METERS
        };

        self
    }

    pub fn step_radius_meters(&self) -> f64 {
        self.step_radius_meters
    }

    /// Begin tracking a new target, replacing any active session
    pub fn start(&mut self, target: Coordinate, steps: Vec<RouteStep>) -> Result<(), TrackerError> {
        if let Err(e) = target.validate() {
            self.state = State::Idle;
            return Err(TrackerError::InvalidTarget(e));
        }

        info!(%target, steps = steps.len(), "tracking started");

        self.state = State::Tracking(TrackingSession {
            target,
            steps,
            current_step_index: 0,
            last_known_position: None,
            last_computed_distance_meters: None,
        });

        Ok(())
    }

    /// Feed a new device position
    pub fn on_position_update(&mut self, position: Coordinate) -> Option<Progress> {
        let radius = self.step_radius_meters;
        let session = match &mut self.state {
            State::Tracking(session) => session,
            State::Idle => {
                debug!(%position, "no active session, update ignored");
                return None;
            }
        };

        if let Err(e) = position.validate() {
            warn!(%position, "dropping position update: {}", e);
            return None;
        }

        let distance = haversine(&position, &session.target);
        session.last_computed_distance_meters = Some(distance);
        session.last_known_position = Some(position);

        // at most one step per update
        if session.current_step_index + 1 < session.steps.len() {
            let step = &session.steps[session.current_step_index];
            let to_step_end = haversine(&position, &step.end_location);
            if to_step_end < radius {
                session.current_step_index += 1;
                debug!(
                    step = session.current_step_index,
                    to_step_end, "advanced to next step"
                );
            }
        }

        debug!(%position, distance, step = session.current_step_index, "position updated");

        Some(Progress {
            distance_meters: distance,
            current_step_index: session.current_step_index,
            instruction_text: current_instruction(session).unwrap_or_default(),
        })
    }

    /// Plain text instruction of the active step
    pub fn current_instruction(&self) -> Option<String> {
        self.session().and_then(current_instruction)
    }

    pub fn current_step(&self) -> Option<&RouteStep> {
        self.session().and_then(|s| s.steps.get(s.current_step_index))
    }

    /// Last computed distance to the target
    pub fn distance_meters(&self) -> Option<f64> {
        self.session().and_then(|s| s.last_computed_distance_meters)
    }

    pub fn session(&self) -> Option<&TrackingSession> {
        match &self.state {
            State::Tracking(session) => Some(session),
            State::Idle => None,
        }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.state, State::Tracking(_))
    }

    /// Drop the active session, if any
    pub fn reset(&mut self) {
        if self.is_tracking() {
            info!("tracking reset");
        }
        self.state = State::Idle;
    }
}

fn current_instruction(session: &TrackingSession) -> Option<String> {
    session
        .steps
        .get(session.current_step_index)
        .map(RouteStep::plain_instruction)
}
