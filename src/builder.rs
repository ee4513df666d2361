//! Conversion of latitude/longitude tables into geospatial frames.

use geo::Point;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Attributes, Crs, GeoFrame, GeoRecord, Table};

/// Options for building a geospatial frame from a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameOptions {
    /// CRS tag attached to the output
    pub crs: Crs,
    pub lat_column: String,
    pub lng_column: String,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            crs: Crs::wgs84(),
            lat_column: "lat".to_string(),
            lng_column: "lng".to_string(),
        }
    }
}

/// Builds point frames from tabular records
#[derive(Debug, Clone, Default)]
pub struct CoordinateFrameBuilder {
    options: FrameOptions,
}

impl CoordinateFrameBuilder {
    pub fn new(options: FrameOptions) -> Self {
        Self { options }
    }

    /// Convert every row into a point at `(lng, lat)`.
    ///
    /// Row order and all original columns are preserved. Coordinates are not
    /// range-checked. Fails on the first row whose latitude or longitude is
    /// missing or not a number; no partial frame is returned.
    pub fn build(&self, table: &Table) -> Result<GeoFrame> {
        let mut frame = GeoFrame::new(self.options.crs, table.columns().to_vec());

        for (idx, row) in table.rows().iter().enumerate() {
            let lat = coordinate(row, &self.options.lat_column, idx)?;
            let lng = coordinate(row, &self.options.lng_column, idx)?;
            frame.push(GeoRecord::new(row.clone(), Point::new(lng, lat)));
        }

        debug!(
            "Built frame with {} rows in {}",
            frame.len(),
            self.options.crs
        );

        Ok(frame)
    }
}

/// Build a frame with default options (lat/lng columns, WGS84)
pub fn build(table: &Table) -> Result<GeoFrame> {
    CoordinateFrameBuilder::default().build(table)
}

fn coordinate(row: &Attributes, column: &str, idx: usize) -> Result<f64> {
    let invalid = |reason: &str| Error::InvalidInput {
        row: idx,
        column: column.to_string(),
        reason: reason.to_string(),
    };

    match row.get(column) {
        None | Some(Value::Null) => Err(invalid("missing value")),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| invalid("number out of range")),
        Some(other) => Err(invalid(&format!("expected a number, got {}", other))),
    }
}
