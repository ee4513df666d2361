//! Mobility Index - geospatial helpers for place records
//!
//! Converts latitude/longitude tables into geospatial frames, computes
//! convex hull boundaries and filters places by named neighborhood.

pub mod builder;
pub mod config;
pub mod error;
pub mod hull;
pub mod io;
pub mod models;
pub mod pip;

pub use builder::{CoordinateFrameBuilder, FrameOptions};
pub use error::{Error, Result};
pub use hull::{HullComputer, HullOptions};
pub use models::{Crs, GeoFrame, GeoRecord, Table};
pub use pip::{BoundaryPolicy, JoinOptions, NeighborhoodFilter};
