//! Typed views of the place and neighborhood record shapes.

use geo::MultiPolygon;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::{Attributes, Crs, GeoFrame, GeoRecord, Table};

/// Identifier of a place, numeric or textual depending on the source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlaceId {
    Int(i64),
    Text(String),
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceId::Int(id) => write!(f, "{}", id),
            PlaceId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for PlaceId {
    fn from(id: i64) -> Self {
        PlaceId::Int(id)
    }
}

impl From<i32> for PlaceId {
    fn from(id: i32) -> Self {
        PlaceId::Int(i64::from(id))
    }
}

impl From<&str> for PlaceId {
    fn from(id: &str) -> Self {
        PlaceId::Text(id.to_string())
    }
}

/// A place read from a tabular source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub place_id: PlaceId,

    /// Latitude in degrees
    pub lat: f64,

    /// Longitude in degrees
    pub lng: f64,

    /// Any further columns, carried through untouched
    #[serde(flatten)]
    pub extra: Attributes,
}

impl PlaceRecord {
    pub fn new(place_id: impl Into<PlaceId>, lat: f64, lng: f64) -> Self {
        Self {
            place_id: place_id.into(),
            lat,
            lng,
            extra: Attributes::new(),
        }
    }

    pub fn to_attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert(
            "place_id".to_string(),
            serde_json::to_value(&self.place_id).unwrap_or(Value::Null),
        );
        attributes.insert("lat".to_string(), Value::from(self.lat));
        attributes.insert("lng".to_string(), Value::from(self.lng));
        for (key, value) in &self.extra {
            attributes.insert(key.clone(), value.clone());
        }
        attributes
    }
}

impl Table {
    /// Build a table from typed places, columns `place_id`, `lat`, `lng` first
    pub fn from_places(places: &[PlaceRecord]) -> Self {
        let mut table = Table::new(["place_id", "lat", "lng"]);
        for place in places {
            table.push_row(place.to_attributes());
        }
        table
    }
}

/// A named neighborhood polygon
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborhoodRecord {
    /// Neighborhood name
    pub nhood: String,
    pub geometry: MultiPolygon<f64>,
}

impl NeighborhoodRecord {
    pub fn new(nhood: impl Into<String>, geometry: impl Into<MultiPolygon<f64>>) -> Self {
        Self {
            nhood: nhood.into(),
            geometry: geometry.into(),
        }
    }
}

impl GeoFrame {
    /// Build a neighborhood frame with a single `nhood` column
    pub fn from_neighborhoods(crs: Crs, neighborhoods: Vec<NeighborhoodRecord>) -> Self {
        let mut frame = GeoFrame::new(crs, vec!["nhood".to_string()]);
        for n in neighborhoods {
            let mut attributes = Attributes::new();
            attributes.insert("nhood".to_string(), Value::String(n.nhood));
            frame.push(GeoRecord::new(attributes, n.geometry));
        }
        frame
    }
}
