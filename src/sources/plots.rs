//! Plot records from the memorial park backend

use serde::{Deserialize, Serialize};

use crate::error::PlotError;
use crate::Coordinate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotStatus {
    Available,
    Occupied,
    Reserved,
    Maintenance,
}

/// Coordinate component, sent either as a number or as a numeric string
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn value(&self) -> Option<f64> {
        let v = match self {
            Degrees::Number(n) => *n,
            Degrees::Text(s) => s.trim().parse::<f64>().ok()?,
        };

        // zero and NaN mean "not surveyed"
        if v == 0.0 || v.is_nan() {
            None
        } else {
            Some(v)
        }
    }
}

/// Burial plot
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    pub id: u64,
    pub plot_number: String,
    pub section: Option<String>,
    pub row_number: Option<u32>,
    pub column_number: Option<u32>,
    pub latitude: Option<Degrees>,
    pub longitude: Option<Degrees>,
    pub status: Option<PlotStatus>,
    pub notes: Option<String>,
}

impl Plot {
    /// Navigation target of the plot
    pub fn location(&self) -> Result<Coordinate, PlotError> {
        let component = |d: &Option<Degrees>| d.as_ref().and_then(Degrees::value);

        let (latitude, longitude) = match (component(&self.latitude), component(&self.longitude)) {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => {
                return Err(PlotError::MissingLocation {
                    plot_number: self.plot_number.clone(),
                })
            }
        };

        let coordinate = Coordinate::new(latitude, longitude);
        coordinate
            .validate()
            .map_err(|source| PlotError::InvalidLocation {
                plot_number: self.plot_number.clone(),
                source,
            })?;

        Ok(coordinate)
    }

    pub fn label(&self) -> String {
        format!("Plot {}", self.plot_number)
    }

    pub fn section_label(&self) -> Option<String> {
        self.section.as_ref().map(|s| format!("Section {}", s))
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: Option<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    data: Vec<Plot>,
}

/// Plots of a paginated `{data: {data: [...]}}` response
pub fn parse_plots(json: &str) -> Result<Vec<Plot>, String> {
    let envelope: Envelope =
        serde_json::from_str(json).map_err(|e| format!("Failed on parse the plots: {}", e))?;

    Ok(envelope.data.map(|page| page.data).unwrap_or_default())
}

/// Plots with a usable location and their distance from `origin`, closest first
pub fn nearest<'a>(plots: &'a [Plot], origin: &Coordinate) -> Vec<(&'a Plot, f64)> {
    let mut near: Vec<(&Plot, f64)> = plots
        .iter()
        .filter_map(|p| p.location().ok().map(|c| (p, origin.distance_to(&c))))
        .collect();

    near.sort_by(|a, b| a.1.total_cmp(&b.1));

    near
}
