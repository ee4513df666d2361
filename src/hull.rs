//! Convex hull of every geometry in a frame.

use geo::{
    ConvexHull, Coord, CoordsIter, GeoNum, Geometry, Kernel, LineString, MultiPoint, Orientation,
    Point,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{Attributes, Crs, GeoFrame, GeoRecord};

/// Options for hull computation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HullOptions {
    /// CRS tag of the output frame
    pub crs: Crs,
}

/// Computes the single-row convex hull frame of a point set
#[derive(Debug, Clone, Default)]
pub struct HullComputer {
    options: HullOptions,
}

impl HullComputer {
    pub fn new(options: HullOptions) -> Self {
        Self { options }
    }

    /// Hull of all vertices of all geometries in `frame`.
    ///
    /// The output is tagged with the configured CRS, whatever the input CRS
    /// was; coordinates are never reprojected.
    pub fn convex_hull(&self, frame: &GeoFrame) -> Result<GeoFrame> {
        let coords: Vec<Coord<f64>> = frame.geometries().flat_map(|g| g.coords_iter()).collect();

        if coords.is_empty() {
            return Err(Error::EmptyInput(
                "convex hull requires at least one point".to_string(),
            ));
        }

        if frame.crs() != self.options.crs {
            warn!(
                "Input frame is in {} but hull is tagged {}; coordinates are not reprojected",
                frame.crs(),
                self.options.crs
            );
        }

        let hull = hull_geometry(&coords);
        debug!("Hull over {} coordinates: {:?}", coords.len(), hull);

        Ok(GeoFrame::from_records(
            self.options.crs,
            vec![GeoRecord::new(Attributes::new(), hull)],
        ))
    }
}

/// Hull with default options (output tagged WGS84)
pub fn convex_hull(frame: &GeoFrame) -> Result<GeoFrame> {
    HullComputer::default().convex_hull(frame)
}

/// Convex hull of a non-empty coordinate set.
///
/// Coincident input collapses to a `Point` and colinear input to a
/// two-vertex `LineString` between the extreme coordinates. Anything else is
/// a `Polygon` with a closed, counter-clockwise exterior.
fn hull_geometry(coords: &[Coord<f64>]) -> Geometry<f64> {
    let first = coords[0];
    if coords.iter().all(|c| *c == first) {
        return Geometry::Point(Point::from(first));
    }

    let lexicographic = |a: &&Coord<f64>, b: &&Coord<f64>| {
        a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y))
    };
    // Both exist: coords is non-empty.
    let lo = *coords.iter().min_by(lexicographic).unwrap_or(&first);
    let hi = *coords.iter().max_by(lexicographic).unwrap_or(&first);

    let colinear = coords
        .iter()
        .all(|c| <f64 as GeoNum>::Ker::orient2d(lo, hi, *c) == Orientation::Collinear);
    if colinear {
        return Geometry::LineString(LineString::new(vec![lo, hi]));
    }

    let points = MultiPoint::new(coords.iter().map(|c| Point::from(*c)).collect());
    Geometry::Polygon(points.convex_hull())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use crate::models::{PlaceRecord, Table};
    use geo::{coord, Intersects, Polygon};

    fn seattle_frame() -> GeoFrame {
        build(&Table::from_places(&[
            PlaceRecord::new(1, 47.615866, -122.309913),
            PlaceRecord::new(2, 47.618850, -122.325005),
            PlaceRecord::new(3, 47.596843, -122.326929),
        ]))
        .unwrap()
    }

    fn sorted(mut coords: Vec<Coord<f64>>) -> Vec<Coord<f64>> {
        coords.sort_by(|a, b| a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y)));
        coords
    }

    #[test]
    fn test_triangle_vertices_equal_input() {
        let frame = seattle_frame();
        let hull = convex_hull(&frame).unwrap();

        assert_eq!(hull.len(), 1);
        assert_eq!(hull.crs(), Crs::wgs84());

        let polygon = match &hull.records()[0].geometry {
            Geometry::Polygon(p) => p.clone(),
            other => panic!("expected polygon, got {:?}", other),
        };

        let ring: Vec<Coord<f64>> = polygon.exterior().coords().copied().collect();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.first(), ring.last());

        let vertices = sorted(ring[..3].to_vec());
        let input = sorted(frame.geometries().flat_map(|g| g.coords_iter()).collect());
        assert_eq!(vertices, input);
    }

    #[test]
    fn test_hull_covers_every_input_point() {
        let mut places = Vec::new();
        for i in 0..10 {
            for j in 0..10 {
                let lat = 47.5 + (i as f64) * 0.01 + ((i * j) % 7) as f64 * 0.001;
                let lng = -122.4 + (j as f64) * 0.01 - ((i + j) % 5) as f64 * 0.002;
                places.push(PlaceRecord::new(i * 10 + j, lat, lng));
            }
        }
        let frame = build(&Table::from_places(&places)).unwrap();
        let hull = convex_hull(&frame).unwrap();
        let shape = &hull.records()[0].geometry;

        assert!(matches!(shape, Geometry::Polygon(_)));
        for geometry in frame.geometries() {
            assert!(shape.intersects(geometry));
        }
    }

    #[test]
    fn test_single_point_collapses_to_point() {
        let frame = build(&Table::from_places(&[PlaceRecord::new(1, 10.0, 20.0)])).unwrap();
        let hull = convex_hull(&frame).unwrap();
        assert_eq!(
            hull.records()[0].geometry,
            Geometry::Point(Point::new(20.0, 10.0))
        );
    }

    #[test]
    fn test_duplicate_points_collapse_to_point() {
        let frame = build(&Table::from_places(&[
            PlaceRecord::new(1, 10.0, 20.0),
            PlaceRecord::new(2, 10.0, 20.0),
        ]))
        .unwrap();
        let hull = convex_hull(&frame).unwrap();
        assert!(matches!(hull.records()[0].geometry, Geometry::Point(_)));
    }

    #[test]
    fn test_colinear_points_collapse_to_segment() {
        let frame = build(&Table::from_places(&[
            PlaceRecord::new(1, 1.0, 1.0),
            PlaceRecord::new(2, 3.0, 3.0),
            PlaceRecord::new(3, 2.0, 2.0),
        ]))
        .unwrap();
        let hull = convex_hull(&frame).unwrap();
        assert_eq!(
            hull.records()[0].geometry,
            Geometry::LineString(LineString::new(vec![
                coord! { x: 1.0, y: 1.0 },
                coord! { x: 3.0, y: 3.0 },
            ]))
        );
    }

    #[test]
    fn test_empty_frame_fails() {
        let frame = GeoFrame::new(Crs::wgs84(), vec![]);
        assert!(matches!(convex_hull(&frame), Err(Error::EmptyInput(_))));
    }

    #[test]
    fn test_output_crs_is_configured_value() {
        let frame = seattle_frame().with_crs(Crs::from_epsg(3857));

        let hull = convex_hull(&frame).unwrap();
        assert_eq!(hull.crs(), Crs::wgs84());

        let computer = HullComputer::new(HullOptions {
            crs: Crs::from_epsg(3857),
        });
        assert_eq!(
            computer.convex_hull(&frame).unwrap().crs(),
            Crs::from_epsg(3857)
        );
    }

    #[test]
    fn test_polygon_vertices_participate() {
        let square = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]),
            vec![],
        );
        let frame = GeoFrame::from_records(
            Crs::wgs84(),
            vec![
                GeoRecord::new(Attributes::new(), square),
                GeoRecord::new(Attributes::new(), Point::new(5.0, 1.0)),
            ],
        );
        let hull = convex_hull(&frame).unwrap();
        let shape = &hull.records()[0].geometry;
        assert!(shape.intersects(&Point::new(5.0, 1.0)));
        assert!(shape.intersects(&Point::new(0.0, 2.0)));
        assert!(!shape.intersects(&Point::new(5.0, 2.0)));
    }
}
