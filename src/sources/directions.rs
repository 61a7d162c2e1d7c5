//! Walking directions provider integration
//!
//! The provider answers with nested `routes/legs/steps`, each step carrying an
//! HTML formatted instruction. Only the first route is used.

use serde::Deserialize;

use crate::{Coordinate, RouteStep};

const DIRECTIONS_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/directions/json";

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    #[serde(default)]
    legs: Vec<DirectionsLeg>,
}

#[derive(Debug, Deserialize)]
struct DirectionsLeg {
    #[serde(default)]
    steps: Vec<DirectionsStep>,
}

#[derive(Debug, Deserialize)]
struct DirectionsStep {
    #[serde(default)]
    html_instructions: String,
    start_location: LatLng,
    end_location: LatLng,
    distance: Option<TextValue>,
    duration: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    value: f64,
}

impl From<LatLng> for Coordinate {
    fn from(ll: LatLng) -> Self {
        Coordinate::new(ll.lat, ll.lng)
    }
}

impl From<DirectionsStep> for RouteStep {
    fn from(step: DirectionsStep) -> Self {
        Self {
            instruction_text: step.html_instructions,
            start_location: step.start_location.into(),
            end_location: step.end_location.into(),
            step_distance_meters: step.distance.map(|d| d.value).unwrap_or_default(),
            step_duration_seconds: step.duration.map(|d| d.value).unwrap_or_default(),
        }
    }
}

/// Route steps of the first route, legs concatenated in order
pub fn parse_directions(json: &str) -> Result<Vec<RouteStep>, String> {
    let response: DirectionsResponse = serde_json::from_str(json)
        .map_err(|e| format!("Failed on parse the directions: {}", e))?;

    if response.status != "OK" {
        return Err(match response.error_message {
            Some(msg) => format!("Directions request failed with {}: {}", response.status, msg),
            None => format!("Directions request failed with {}", response.status),
        });
    }

    let steps: Vec<RouteStep> = response
        .routes
        .into_iter()
        .next()
        .map(|route| {
            route
                .legs
                .into_iter()
                .flat_map(|leg| leg.steps)
                .map(RouteStep::from)
                .collect()
        })
        .unwrap_or_default();

    Ok(steps)
}

/// Walking directions request from the last known position to the target
pub fn request_url(origin: &Coordinate, destination: &Coordinate, key: &str) -> String {
    format!(
        "{}?origin={}&destination={}&mode=walking&key={}",
        DIRECTIONS_ENDPOINT, origin, destination, key
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "status": "OK",
        "routes": [{
            "legs": [{
                "steps": [{
                    "html_instructions": "Head <b>north</b> toward <b>Section C</b>",
                    "start_location": {"lat": 14.6758, "lng": 121.0436},
                    "end_location": {"lat": 14.6761, "lng": 121.0438},
                    "distance": {"text": "40 m", "value": 40},
                    "duration": {"text": "1 min", "value": 31}
                }]
            }, {
                "steps": [{
                    "html_instructions": "Turn <b>left</b><div style=\"font-size:0.9em\">Destination will be on the right</div>",
                    "start_location": {"lat": 14.6761, "lng": 121.0438},
                    "end_location": {"lat": 14.676, "lng": 121.0437},
                    "distance": {"text": "15 m", "value": 15},
                    "duration": {"text": "1 min", "value": 12}
                }]
            }]
        }, {
            "legs": []
        }]
    }"#;

    #[test]
    fn steps_from_all_legs() -> Result<(), String> {
        let steps = parse_directions(RESPONSE)?;
        assert_eq!(2, steps.len());

        assert_eq!("Head <b>north</b> toward <b>Section C</b>", steps[0].instruction_text);
        assert_eq!("Head north toward Section C", steps[0].plain_instruction());
        assert_eq!(Coordinate::new(14.6758, 121.0436), steps[0].start_location);
        assert_eq!(Coordinate::new(14.6761, 121.0438), steps[0].end_location);
        assert_eq!(40.0, steps[0].step_distance_meters);
        assert_eq!(31.0, steps[0].step_duration_seconds);

        assert_eq!(
            "Turn leftDestination will be on the right",
            steps[1].plain_instruction()
        );
        assert_eq!(Coordinate::new(14.676, 121.0437), steps[1].end_location);

        Ok(())
    }

    #[test]
    fn no_routes() -> Result<(), String> {
        let steps = parse_directions(r#"{"status": "OK", "routes": []}"#)?;
        assert!(steps.is_empty());

        let steps = parse_directions(r#"{"status": "OK"}"#)?;
        assert!(steps.is_empty());

        Ok(())
    }

    #[test]
    fn failed_status() {
        assert_eq!(
            Err("Directions request failed with ZERO_RESULTS".to_string()),
            parse_directions(r#"{"status": "ZERO_RESULTS", "routes": []}"#)
        );
        assert_eq!(
            Err("Directions request failed with REQUEST_DENIED: The provided API key is invalid.".to_string()),
            parse_directions(
                r#"{"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid.", "routes": []}"#
            )
        );
        assert!(parse_directions("not json")
            .unwrap_err()
            .starts_with("Failed on parse the directions"));
    }

    #[test]
    fn walking_request() {
        let url = request_url(
            &Coordinate::new(14.6758, 121.0436),
            &Coordinate::new(14.676, 121.0437),
            "secret",
        );
        assert_eq!(
            "https://maps.googleapis.com/maps/api/directions/json?origin=14.6758,121.0436&destination=14.676,121.0437&mode=walking&key=secret",
            url
        );
    }
}
