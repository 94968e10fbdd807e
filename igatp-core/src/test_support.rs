//! Builders for points and square boundaries used by unit and behaviour
//! tests.

use geo::{Coord, MultiPolygon, polygon};

use crate::{
    Boundary, BoundaryLayer, ClusterProfile, Epsg, PointRecord, Resolution, SubIndices,
};

/// Axis-aligned square with its lower-left corner at `(x, y)`.
pub fn square(x: f64, y: f64, size: f64) -> MultiPolygon<f64> {
    MultiPolygon(vec![polygon![
        (x: x, y: y),
        (x: x + size, y: y),
        (x: x + size, y: y + size),
        (x: x, y: y + size),
    ]])
}

/// WGS84 layer of square boundaries given as `(id, x, y, size)`.
pub fn square_layer(resolution: Resolution, squares: &[(&str, f64, f64, f64)]) -> BoundaryLayer {
    BoundaryLayer::new(
        resolution,
        Epsg::WGS84,
        squares
            .iter()
            .map(|&(id, x, y, size)| Boundary::new(id, square(x, y, size)))
            .collect(),
    )
}

/// Point with no sub-indices at `(x, y)`.
pub fn point_at(name: &str, x: f64, y: f64) -> PointRecord {
    PointRecord::new(
        name,
        "Attraction",
        "Culture",
        ClusterProfile::MainstreamCore,
        SubIndices::default(),
        Coord { x, y },
    )
}

/// Point at `(x, y)` whose three sub-indices all equal `value`.
///
/// With any weight vector with a non-zero sum the composite score of such a
/// point is `value`.
///
/// # Panics
/// Panics when `value` lies outside `[0.0, 1.0]`.
pub fn uniform_point(name: &str, x: f64, y: f64, value: f64) -> PointRecord {
    let Ok(indices) = SubIndices::new(Some(value), Some(value), Some(value)) else {
        panic!("uniform sub-index {value} must lie within [0, 1]");
    };
    PointRecord {
        sub_indices: indices,
        ..point_at(name, x, y)
    }
}
