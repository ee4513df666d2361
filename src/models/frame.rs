//! Geospatial record set: a table with one geometry per row and a CRS tag.

use geo::Geometry;
use serde_json::Value;

use super::{Attributes, Crs};

/// Name reported for the geometry column of every frame
pub const GEOMETRY_COLUMN: &str = "geometry";

/// A single row of a geospatial record set
#[derive(Debug, Clone, PartialEq)]
pub struct GeoRecord {
    pub attributes: Attributes,
    pub geometry: Geometry<f64>,
}

impl GeoRecord {
    pub fn new(attributes: Attributes, geometry: impl Into<Geometry<f64>>) -> Self {
        Self {
            attributes,
            geometry: geometry.into(),
        }
    }

    /// Get an attribute value by column name
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.attributes.get(column)
    }
}

/// Geospatial record set.
///
/// Every record shares the frame's CRS tag. Attribute columns are kept in
/// insertion order; the geometry column always comes last.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoFrame {
    crs: Crs,
    columns: Vec<String>,
    records: Vec<GeoRecord>,
}

impl GeoFrame {
    /// Create an empty frame with the given attribute columns
    pub fn new(crs: Crs, columns: Vec<String>) -> Self {
        Self {
            crs,
            columns,
            records: Vec::new(),
        }
    }

    /// Create a frame from records, deriving attribute columns from them
    pub fn from_records(crs: Crs, records: Vec<GeoRecord>) -> Self {
        let mut frame = Self::new(crs, Vec::new());
        for record in records {
            frame.push(record);
        }
        frame
    }

    /// Append a record, registering any attribute columns not seen before
    pub fn push(&mut self, record: GeoRecord) {
        for key in record.attributes.keys() {
            if !self.columns.iter().any(|c| c == key) {
                self.columns.push(key.clone());
            }
        }
        self.records.push(record);
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    /// Re-tag the frame without touching coordinates
    pub fn with_crs(mut self, crs: Crs) -> Self {
        self.crs = crs;
        self
    }

    /// Attribute columns, excluding geometry
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All column names, geometry last
    pub fn column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(GEOMETRY_COLUMN))
            .collect()
    }

    pub fn records(&self) -> &[GeoRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Attribute values of one column, row by row
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = Option<&'a Value>> + 'a {
        self.records.iter().map(move |r| r.get(name))
    }

    pub fn geometries(&self) -> impl Iterator<Item = &Geometry<f64>> {
        self.records.iter().map(|r| &r.geometry)
    }
}
