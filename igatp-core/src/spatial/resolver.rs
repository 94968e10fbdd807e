//! R\*-tree backed containment lookups.

use std::fmt;

use geo::{BoundingRect, Contains, Coord, Point};
use log::{debug, warn};
use rstar::{AABB, RTree, RTreeObject};

use crate::{Boundary, BoundaryLayer, Epsg, PointRecord};

use super::{Attribution, SpatialJoinError};

/// Envelope of one boundary, tagged with its position in the layer.
#[derive(Debug, Clone, Copy)]
struct IndexedEnvelope {
    position: usize,
    min: [f64; 2],
    max: [f64; 2],
}

impl RTreeObject for IndexedEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

/// Resolves enclosing boundaries for points within one layer.
///
/// Build once per layer and reuse across joins; the resolver borrows the
/// layer and never mutates it.
pub struct ContainmentResolver<'a> {
    layer: &'a BoundaryLayer,
    datum: Epsg,
    index: RTree<IndexedEnvelope>,
}

impl fmt::Debug for ContainmentResolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainmentResolver")
            .field("resolution", &self.layer.resolution)
            .field("datum", &self.datum)
            .field("entries", &self.index.size())
            .finish_non_exhaustive()
    }
}

impl<'a> ContainmentResolver<'a> {
    /// Index the boundaries of `layer`.
    ///
    /// Boundaries without geometry are skipped with a warning.
    ///
    /// # Errors
    /// Returns [`SpatialJoinError::MissingLayerDatum`] when the layer declares
    /// no datum.
    pub fn new(layer: &'a BoundaryLayer) -> Result<Self, SpatialJoinError> {
        let datum = layer.datum.ok_or(SpatialJoinError::MissingLayerDatum {
            resolution: layer.resolution,
        })?;
        let entries: Vec<_> = layer
            .boundaries
            .iter()
            .enumerate()
            .filter_map(|(position, boundary)| index_entry(position, boundary, layer))
            .collect();
        Ok(Self {
            layer,
            datum,
            index: RTree::bulk_load(entries),
        })
    }

    /// Datum shared by every boundary in the layer.
    pub const fn datum(&self) -> Epsg {
        self.datum
    }

    /// Return the first boundary, in layer order, that strictly contains
    /// `coord`.
    pub fn locate(&self, coord: Coord<f64>) -> Option<&'a Boundary> {
        if !(coord.x.is_finite() && coord.y.is_finite()) {
            return None;
        }
        let mut candidates: Vec<usize> = self
            .index
            .locate_in_envelope_intersecting(&AABB::from_point([coord.x, coord.y]))
            .map(|entry| entry.position)
            .collect();
        candidates.sort_unstable();

        let layer = self.layer;
        let point = Point::from(coord);
        let mut matches = candidates
            .into_iter()
            .filter_map(|position| layer.boundaries.get(position))
            .filter(|boundary| boundary.geometry.contains(&point));
        let first = matches.next()?;
        let extra = matches.count();
        if extra > 0 {
            debug!(
                "Point ({}, {}) lies in {} overlapping {} boundaries; attributing to '{}'",
                coord.x,
                coord.y,
                extra + 1,
                layer.resolution,
                first.key
            );
        }
        Some(first)
    }

    /// Attribute each point to its enclosing boundary.
    ///
    /// # Errors
    /// Returns [`SpatialJoinError::MissingPointDatum`] when `datum` is `None`
    /// and [`SpatialJoinError::DatumMismatch`] when it differs from the
    /// layer's datum.
    pub fn attribute<'p, I>(
        &self,
        points: I,
        datum: Option<Epsg>,
    ) -> Result<Attribution, SpatialJoinError>
    where
        I: IntoIterator<Item = &'p PointRecord>,
    {
        let points_datum = datum.ok_or(SpatialJoinError::MissingPointDatum)?;
        if points_datum != self.datum {
            return Err(SpatialJoinError::DatumMismatch {
                resolution: self.layer.resolution,
                points: points_datum,
                boundaries: self.datum,
            });
        }

        let assignments: Vec<_> = points
            .into_iter()
            .map(|point| {
                if !point.has_usable_position() {
                    warn!(
                        "Skipped containment for '{}': position is not finite",
                        point.name
                    );
                    return None;
                }
                self.locate(point.position)
                    .map(|boundary| boundary.key.clone())
            })
            .collect();

        let attribution = Attribution::new(self.layer.resolution, assignments);
        debug!(
            "Attributed {} of {} points to {} boundaries",
            attribution.attributed_count(),
            attribution.len(),
            self.layer.resolution
        );
        Ok(attribution)
    }
}

fn index_entry(
    position: usize,
    boundary: &Boundary,
    layer: &BoundaryLayer,
) -> Option<IndexedEnvelope> {
    let Some(rect) = boundary.geometry.bounding_rect() else {
        warn!(
            "Skipped {} boundary '{}': geometry is empty",
            layer.resolution, boundary.id
        );
        return None;
    };
    Some(IndexedEnvelope {
        position,
        min: [rect.min().x, rect.min().y],
        max: [rect.max().x, rect.max().y],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{point_at, square, square_layer};
    use crate::{BoundaryLayer, Resolution};
    use geo::MultiPolygon;
    use rstest::{fixture, rstest};

    #[fixture]
    fn disjoint_layer() -> BoundaryLayer {
        square_layer(
            Resolution::Municipality,
            &[("West", 0.0, 0.0, 1.0), ("East", 2.0, 0.0, 1.0)],
        )
    }

    #[rstest]
    fn attributes_point_inside_exactly_one_boundary(disjoint_layer: BoundaryLayer) {
        let resolver = ContainmentResolver::new(&disjoint_layer).expect("resolver");
        let points = [point_at("a", 0.5, 0.5), point_at("b", 2.5, 0.5)];
        let attribution = resolver
            .attribute(&points, Some(Epsg::WGS84))
            .expect("attribution");
        assert_eq!(attribution.get(0).map(|k| k.as_str()), Some("west"));
        assert_eq!(attribution.get(1).map(|k| k.as_str()), Some("east"));
    }

    #[rstest]
    #[case(1.5, 0.5)] // between the squares
    #[case(-3.0, 7.0)] // far away
    #[case(1.0, 0.5)] // on the west square's edge
    #[case(0.0, 0.0)] // on a corner
    fn points_outside_or_on_edges_are_unattributed(
        disjoint_layer: BoundaryLayer,
        #[case] x: f64,
        #[case] y: f64,
    ) {
        let resolver = ContainmentResolver::new(&disjoint_layer).expect("resolver");
        assert!(resolver.locate(Coord { x, y }).is_none());
    }

    #[rstest]
    fn overlapping_boundaries_resolve_to_first_in_layer_order() {
        let layer = square_layer(
            Resolution::Parish,
            &[("Second", 0.5, 0.5, 2.0), ("First", 0.0, 0.0, 2.0)],
        );
        let resolver = ContainmentResolver::new(&layer).expect("resolver");
        let located = resolver.locate(Coord { x: 1.0, y: 1.0 }).expect("match");
        assert_eq!(located.key.as_str(), "second");
    }

    #[rstest]
    fn empty_geometry_is_skipped() {
        let mut layer = square_layer(Resolution::Parish, &[("Kept", 0.0, 0.0, 1.0)]);
        layer
            .boundaries
            .insert(0, Boundary::new("Empty", MultiPolygon(Vec::new())));
        let resolver = ContainmentResolver::new(&layer).expect("resolver");
        let located = resolver.locate(Coord { x: 0.5, y: 0.5 }).expect("match");
        assert_eq!(located.key.as_str(), "kept");
    }

    #[rstest]
    fn non_finite_positions_are_unattributed(disjoint_layer: BoundaryLayer) {
        let resolver = ContainmentResolver::new(&disjoint_layer).expect("resolver");
        let points = [point_at("nan", f64::NAN, 0.5)];
        let attribution = resolver
            .attribute(&points, Some(Epsg::WGS84))
            .expect("attribution");
        assert_eq!(attribution.get(0), None);
    }

    #[rstest]
    fn rejects_layer_without_datum() {
        let layer = BoundaryLayer {
            resolution: Resolution::Parish,
            datum: None,
            boundaries: vec![Boundary::new("a", square(0.0, 0.0, 1.0))],
        };
        let err = ContainmentResolver::new(&layer).unwrap_err();
        assert_eq!(
            err,
            SpatialJoinError::MissingLayerDatum {
                resolution: Resolution::Parish
            }
        );
    }

    #[rstest]
    #[case(None, SpatialJoinError::MissingPointDatum)]
    #[case(
        Some(Epsg::PT_TM06),
        SpatialJoinError::DatumMismatch {
            resolution: Resolution::Municipality,
            points: Epsg::PT_TM06,
            boundaries: Epsg::WGS84,
        }
    )]
    fn rejects_incompatible_point_datum(
        disjoint_layer: BoundaryLayer,
        #[case] datum: Option<Epsg>,
        #[case] expected: SpatialJoinError,
    ) {
        let resolver = ContainmentResolver::new(&disjoint_layer).expect("resolver");
        let points = [point_at("a", 0.5, 0.5)];
        assert_eq!(resolver.attribute(&points, datum).unwrap_err(), expected);
    }
}
