//! Core data models for tabular and geospatial record sets.

pub mod crs;
pub mod frame;
pub mod place;
pub mod table;

pub use crs::{Crs, WGS84_EPSG};
pub use frame::{GeoFrame, GeoRecord, GEOMETRY_COLUMN};
pub use place::{NeighborhoodRecord, PlaceId, PlaceRecord};
pub use table::{Attributes, Table};
