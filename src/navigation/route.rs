//! Route step definition

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;

/// One segment of a walking route, as handed over by the directions provider
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    /// Instruction, possibly with HTML markup
    pub instruction_text: String,
    pub start_location: Coordinate,
    pub end_location: Coordinate,
    pub step_distance_meters: f64,
    pub step_duration_seconds: f64,
}

impl RouteStep {
    pub fn new(instruction_text: String, start_location: Coordinate, end_location: Coordinate) -> Self {
        Self {
            instruction_text,
            start_location,
            end_location,
            step_distance_meters: 0.0,
            step_duration_seconds: 0.0,
        }
    }

    /// Instruction with the markup removed
    pub fn plain_instruction(&self) -> String {
        strip_markup(&self.instruction_text)
    }
}

/// Remove every `<...>` tag from the text
pub fn strip_markup(text: &str) -> String {
    static TAGS: OnceLock<Regex> = OnceLock::new();

    TAGS.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid markup pattern"))
        .replace_all(text, "")
        .into_owned()
}
