//! Point-in-Polygon (PIP) neighborhood filter.
//!
//! Selects neighborhood polygons by name and joins places against them
//! using an R-tree spatial index.

mod index;
mod service;

pub use index::{IndexedPolygon, NeighborhoodIndex};
pub use service::{
    places_in_neighborhood, BoundaryPolicy, JoinOptions, NeighborhoodFilter, INDEX_RIGHT,
};
