//! GeoJSON source and sink for geospatial frames.

use geo::Geometry;
use geojson::{Feature, FeatureCollection, GeoJson, JsonObject};
use serde_json::json;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{Attributes, Crs, GeoFrame, GeoRecord};

/// Load a GeoJSON file as a frame tagged with `crs`
pub fn read_geojson(path: &Path, crs: Crs) -> Result<GeoFrame> {
    info!("Loading features from {}", path.display());
    let content = fs::read_to_string(path)?;
    let frame = parse_geojson(&content, crs)?;
    info!("Loaded {} features", frame.len());
    Ok(frame)
}

/// Parse GeoJSON text into a frame.
///
/// Accepts a FeatureCollection, a single Feature or a bare Geometry.
/// Feature properties become attributes; a feature without geometry is an
/// error.
pub fn parse_geojson(content: &str, crs: Crs) -> Result<GeoFrame> {
    let features = match content.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(g) => vec![Feature::from(g)],
    };

    let mut frame = GeoFrame::new(crs, Vec::new());
    for (idx, feature) in features.into_iter().enumerate() {
        let geometry = feature
            .geometry
            .ok_or_else(|| Error::InvalidGeometry(format!("feature {} has no geometry", idx)))?;
        let geometry = Geometry::<f64>::try_from(geometry)?;
        let attributes: Attributes = feature.properties.unwrap_or_default();
        frame.push(GeoRecord::new(attributes, geometry));
    }

    Ok(frame)
}

/// Convert a frame into a FeatureCollection.
///
/// Frames outside WGS84 carry a legacy named `crs` member.
pub fn to_feature_collection(frame: &GeoFrame) -> FeatureCollection {
    let features = frame
        .records()
        .iter()
        .map(|record| Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::from(&record.geometry))),
            id: None,
            properties: Some(record.attributes.clone()),
            foreign_members: None,
        })
        .collect();

    let foreign_members = if frame.crs().is_wgs84() {
        None
    } else {
        let mut members = JsonObject::new();
        members.insert(
            "crs".to_string(),
            json!({
                "type": "name",
                "properties": {
                    "name": format!("urn:ogc:def:crs:EPSG::{}", frame.crs().epsg())
                }
            }),
        );
        Some(members)
    };

    FeatureCollection {
        bbox: None,
        features,
        foreign_members,
    }
}

/// Write a frame as pretty-printed GeoJSON
pub fn write_geojson<W: Write>(frame: &GeoFrame, writer: W) -> Result<()> {
    let collection = to_feature_collection(frame);
    serde_json::to_writer_pretty(writer, &collection)?;
    Ok(())
}
