//! Tabular and GeoJSON sources and sinks.

mod features;
mod table;

pub use features::{
    parse_geojson, read_geojson, to_feature_collection, write_geojson,
};
pub use table::{read_table, read_table_from_reader};
