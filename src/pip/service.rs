//! Neighborhood filter: which places fall inside a named neighborhood.

use geo::{Geometry, MultiPolygon, Point};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::NeighborhoodIndex;
use crate::error::{Error, Result};
use crate::models::{Attributes, GeoFrame, GeoRecord};

/// Column holding the matched neighborhood's row index in joined output
pub const INDEX_RIGHT: &str = "index_right";

/// How a place lying exactly on a polygon boundary is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Strict "within": boundary points are outside
    #[default]
    Exclusive,
    /// Boundary points count as inside
    Inclusive,
}

/// Options for the neighborhood join
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinOptions {
    /// Neighborhood name column
    pub name_column: String,
    pub boundary: BoundaryPolicy,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            name_column: "nhood".to_string(),
            boundary: BoundaryPolicy::default(),
        }
    }
}

/// Point-in-neighborhood filter
#[derive(Debug, Clone, Default)]
pub struct NeighborhoodFilter {
    options: JoinOptions,
}

impl NeighborhoodFilter {
    pub fn new(options: JoinOptions) -> Self {
        Self { options }
    }

    /// Places lying within the neighborhood(s) named `name`.
    ///
    /// Place order is preserved and each place appears at most once, joined
    /// with the lowest-row neighborhood that holds it. An unknown name yields
    /// an empty frame. Every place must be a point and every selected
    /// neighborhood a polygon or multipolygon.
    pub fn places_in_neighborhood(
        &self,
        neighborhoods: &GeoFrame,
        places: &GeoFrame,
        name: &str,
    ) -> Result<GeoFrame> {
        let points = place_points(places)?;

        if neighborhoods.crs() != places.crs() {
            warn!(
                "CRS mismatch between places ({}) and neighborhoods ({})",
                places.crs(),
                neighborhoods.crs()
            );
        }

        let wanted = Value::String(name.to_string());
        let mut polygons = Vec::new();
        for (row, record) in neighborhoods.records().iter().enumerate() {
            if record.get(&self.options.name_column) != Some(&wanted) {
                continue;
            }
            polygons.push((row, neighborhood_polygon(row, &record.geometry)?));
        }

        let layout = JoinLayout::new(places.columns(), neighborhoods.columns())?;
        let mut result = GeoFrame::new(places.crs(), layout.columns());

        if polygons.is_empty() {
            warn!("No neighborhood named '{}'", name);
            return Ok(result);
        }

        let index = NeighborhoodIndex::build(polygons);
        debug!(
            "Joining {} places against {} polygons for '{}'",
            places.len(),
            index.len(),
            name
        );

        for (record, point) in places.records().iter().zip(points) {
            if let Some(row) = index.first_match(point, self.options.boundary) {
                let attributes = layout.join(record, row, &neighborhoods.records()[row]);
                result.push(GeoRecord::new(attributes, record.geometry.clone()));
            }
        }

        info!(
            "{} of {} places within '{}'",
            result.len(),
            places.len(),
            name
        );

        Ok(result)
    }
}

/// Filter with default options
pub fn places_in_neighborhood(
    neighborhoods: &GeoFrame,
    places: &GeoFrame,
    name: &str,
) -> Result<GeoFrame> {
    NeighborhoodFilter::default().places_in_neighborhood(neighborhoods, places, name)
}

fn place_points(places: &GeoFrame) -> Result<Vec<Point<f64>>> {
    places
        .records()
        .iter()
        .enumerate()
        .map(|(row, record)| match record.geometry {
            Geometry::Point(p) => Ok(p),
            ref other => Err(Error::InvalidGeometry(format!(
                "place at row {} is not a point: {}",
                row,
                geometry_kind(other)
            ))),
        })
        .collect()
}

fn neighborhood_polygon(row: usize, geometry: &Geometry<f64>) -> Result<MultiPolygon<f64>> {
    match geometry {
        Geometry::Polygon(p) => Ok(MultiPolygon::new(vec![p.clone()])),
        Geometry::MultiPolygon(mp) => Ok(mp.clone()),
        other => Err(Error::InvalidGeometry(format!(
            "neighborhood at row {} is not a polygon: {}",
            row,
            geometry_kind(other)
        ))),
    }
}

fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

/// Output column naming for an inner join of places with neighborhoods.
///
/// Columns on both sides get `_left` / `_right` suffixes. Input carrying an
/// `index_right` column, or suffixing that would produce a duplicate name, is
/// rejected.
struct JoinLayout {
    left: Vec<(String, String)>,
    right: Vec<(String, String)>,
}

impl JoinLayout {
    fn new(left: &[String], right: &[String]) -> Result<Self> {
        if let Some(side) = [("places", left), ("neighborhoods", right)]
            .iter()
            .find(|(_, columns)| columns.iter().any(|c| c == INDEX_RIGHT))
            .map(|(side, _)| side)
        {
            return Err(Error::ColumnConflict(format!(
                "{} already have a '{}' column",
                side, INDEX_RIGHT
            )));
        }

        let left_set: HashSet<&str> = left.iter().map(String::as_str).collect();
        let right_set: HashSet<&str> = right.iter().map(String::as_str).collect();

        let rename = |columns: &[String], other: &HashSet<&str>, suffix: &str| {
            columns
                .iter()
                .map(|c| {
                    let renamed = if other.contains(c.as_str()) {
                        format!("{}_{}", c, suffix)
                    } else {
                        c.clone()
                    };
                    (c.clone(), renamed)
                })
                .collect::<Vec<_>>()
        };

        let layout = Self {
            left: rename(left, &right_set, "left"),
            right: rename(right, &left_set, "right"),
        };

        let mut seen = HashSet::new();
        for column in layout.columns() {
            if !seen.insert(column.clone()) {
                return Err(Error::ColumnConflict(format!(
                    "joined output would contain '{}' twice",
                    column
                )));
            }
        }

        Ok(layout)
    }

    fn columns(&self) -> Vec<String> {
        self.left
            .iter()
            .map(|(_, c)| c.clone())
            .chain(std::iter::once(INDEX_RIGHT.to_string()))
            .chain(self.right.iter().map(|(_, c)| c.clone()))
            .collect()
    }

    fn join(&self, place: &GeoRecord, row: usize, neighborhood: &GeoRecord) -> Attributes {
        let mut attributes = Attributes::new();
        for (source, target) in &self.left {
            if let Some(value) = place.get(source) {
                attributes.insert(target.clone(), value.clone());
            }
        }
        attributes.insert(INDEX_RIGHT.to_string(), Value::from(row));
        for (source, target) in &self.right {
            if let Some(value) = neighborhood.get(source) {
                attributes.insert(target.clone(), value.clone());
            }
        }
        attributes
    }
}
