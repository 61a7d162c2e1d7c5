//! CSV file source integration

use std::io::Read;

use csv::{Reader, StringRecord};
use time::format_description::well_known;
use time::OffsetDateTime;
use tracing::warn;

use super::{FieldsConfiguration, PositionsSource};
use crate::{Coordinate, Fix};

/// Recorded positions from a CSV file
pub struct CsvSource<T>
where
    T: Read,
{
    rdr: Reader<T>,
    fields: FieldsConfiguration,
}

impl<T> CsvSource<T>
where
    T: Read,
{
    pub fn new(rdr: Reader<T>, fields: Option<FieldsConfiguration>) -> Self {
        Self {
            rdr,
            fields: fields.unwrap_or_default(),
        }
    }
}

impl<T> PositionsSource for CsvSource<T>
where
    T: Read,
{
    fn fetch(&mut self) -> Result<Vec<Fix>, String> {
        let mut fixes = vec![];

        let mut header = self
            .rdr
            .headers()
            .map_err(|e| format!("Failed on read the header: {}", e))?
            .clone();
        let header_idx = parse_header(&self.fields, &mut header)?;

        for row in self.rdr.records() {
            let mut rec = row.map_err(|e| format!("Failed on read some row: {}", e))?;

            if rec.len() < 2 {
                continue;
            }

            let fix = parse_row(&header_idx, &self.fields, &mut rec)
                .map_err(|e| format!("Error with row {:?}: {}", rec, e))?;

            match fix {
                Some(fix) => fixes.push(fix),
                None => warn!(row = ?rec, "skipping row without usable coordinates"),
            }
        }

        fixes.sort_by_key(|f| f.time);

        Ok(fixes)
    }
}

/// Field to index map
#[derive(Debug)]
struct FieldsIndex {
    coordinates: usize,
    time: usize,
    accuracy: Option<usize>,
    altitude: Option<usize>,
}

fn parse_header(
    fields: &FieldsConfiguration,
    header: &mut StringRecord,
) -> Result<FieldsIndex, String> {
    header.trim();

    let position = |name: &str| header.iter().position(|h| h.to_lowercase() == name);

    let coordinates = position(fields.coordinates.as_str()).ok_or("Coordinates header not found")?;
    let time = position(fields.time.as_str()).ok_or("Time header not found")?;
    let accuracy = position(fields.accuracy.as_str());
    let altitude = position(fields.altitude.as_str());

    Ok(FieldsIndex {
        coordinates,
        time,
        accuracy,
        altitude,
    })
}

fn parse_row(
    header: &FieldsIndex,
    fields: &FieldsConfiguration,
    row: &mut StringRecord,
) -> Result<Option<Fix>, String> {
    row.trim();

    let raw_coordinates = row
        .get(header.coordinates)
        .ok_or("Coordinates field not found")?;
    let separator = match raw_coordinates {
        s if s.contains(',') => ",",
        s if s.contains(';') => ";",
        _ => " ",
    };
    let scoordinates: Vec<&str> = raw_coordinates
        .split(separator)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if scoordinates.len() != 2 {
        return Ok(None);
    }

    let (ilat, ilng) = if fields.flip_coordinates { (1, 0) } else { (0, 1) };

    let lat = scoordinates[ilat]
        .parse::<f64>()
        .map_err(|e| format!("Invalid latitude format: {}", e))?;
    let lng = scoordinates[ilng]
        .parse::<f64>()
        .map_err(|e| format!("Invalid longitude format: {}", e))?;

    let time = match row.get(header.time) {
        Some(d) => OffsetDateTime::parse(d, &well_known::Rfc3339)
            .map_err(|e| format!("Failed on parse the time: {}", e)),
        None => Err("Time field not found".to_string()),
    }?;

    let mut fix = Fix::basic(Coordinate::new(lat, lng), time);

    if let Some(iaccuracy) = header.accuracy {
        fix.accuracy = row.get(iaccuracy).and_then(|d| d.parse::<f32>().ok());
    }

    if let Some(ialtitude) = header.altitude {
        fix.altitude = row.get(ialtitude).and_then(|d| d.parse::<f64>().ok());
    }

    Ok(Some(fix))
}
