//! Spatial index for fast neighborhood polygon lookups.

use geo::{Contains, Intersects, MultiPolygon, Point};
use rstar::{RTree, RTreeObject, AABB};
use std::sync::Arc;
use tracing::debug;

use super::BoundaryPolicy;

/// Wrapper for R-tree indexing of neighborhood polygons
#[derive(Clone)]
pub struct IndexedPolygon {
    /// Row of the polygon in its source frame
    pub row: usize,
    pub polygon: Arc<MultiPolygon<f64>>,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedPolygon {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl IndexedPolygon {
    /// Returns `None` for an empty polygon, which has no bounding box
    pub fn new(row: usize, polygon: MultiPolygon<f64>) -> Option<Self> {
        use geo::BoundingRect;
        let rect = polygon.bounding_rect()?;
        Some(Self {
            row,
            polygon: Arc::new(polygon),
            envelope: AABB::from_corners(
                [rect.min().x, rect.min().y],
                [rect.max().x, rect.max().y],
            ),
        })
    }

    fn holds(&self, point: &Point<f64>, policy: BoundaryPolicy) -> bool {
        match policy {
            BoundaryPolicy::Exclusive => self.polygon.contains(point),
            BoundaryPolicy::Inclusive => self.polygon.intersects(point),
        }
    }
}

/// Spatial index over neighborhood polygons using an R-tree
pub struct NeighborhoodIndex {
    tree: RTree<IndexedPolygon>,
}

impl NeighborhoodIndex {
    /// Build the index from `(row, polygon)` pairs
    pub fn build(polygons: Vec<(usize, MultiPolygon<f64>)>) -> Self {
        let indexed: Vec<IndexedPolygon> = polygons
            .into_iter()
            .filter_map(|(row, polygon)| IndexedPolygon::new(row, polygon))
            .collect();

        let tree = RTree::bulk_load(indexed);
        debug!("Neighborhood index built with {} entries", tree.size());

        Self { tree }
    }

    /// Lowest row holding the point
    pub fn first_match(&self, point: Point<f64>, policy: BoundaryPolicy) -> Option<usize> {
        let query_envelope = AABB::from_point([point.x(), point.y()]);

        self.tree
            .locate_in_envelope_intersecting(&query_envelope)
            .filter(|ip| ip.holds(&point, policy))
            .map(|ip| ip.row)
            .min()
    }

    /// Get total number of indexed polygons
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
