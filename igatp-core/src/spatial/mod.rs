//! Attribution of points to the boundaries that enclose them.
//!
//! [`ContainmentResolver`] indexes the envelopes of a [`BoundaryLayer`] in an
//! R\*-tree and runs exact point-in-polygon tests only for envelope
//! candidates. Containment is strict: a point lying exactly on a boundary
//! edge is not contained by that boundary.
//!
//! Points and boundaries must share a declared datum. Missing or mismatched
//! datums abort the join with a [`SpatialJoinError`] instead of comparing
//! incompatible coordinates.
//!
//! [`BoundaryLayer`]: crate::BoundaryLayer

mod resolver;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{BoundaryKey, BoundaryLayer, Epsg, PointRecord, Resolution};

pub use resolver::ContainmentResolver;

/// Structural errors that prevent a spatial join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpatialJoinError {
    /// The boundary layer declares no datum.
    #[error("{resolution} boundaries declare no reference datum")]
    MissingLayerDatum {
        /// Resolution of the offending layer.
        resolution: Resolution,
    },
    /// The points declare no datum.
    #[error("points declare no reference datum")]
    MissingPointDatum,
    /// Points and boundaries use different datums.
    #[error("points use {points} but {resolution} boundaries use {boundaries}")]
    DatumMismatch {
        /// Resolution of the boundary layer.
        resolution: Resolution,
        /// Datum of the points.
        points: Epsg,
        /// Datum of the boundaries.
        boundaries: Epsg,
    },
}

/// Per-point boundary attribution at one resolution.
///
/// Entries are aligned with the points passed to
/// [`ContainmentResolver::attribute`]; `None` means no boundary contains the
/// point.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Attribution {
    resolution: Resolution,
    assignments: Vec<Option<BoundaryKey>>,
}

impl Attribution {
    /// Build an attribution from pre-computed assignments.
    pub const fn new(resolution: Resolution, assignments: Vec<Option<BoundaryKey>>) -> Self {
        Self {
            resolution,
            assignments,
        }
    }

    /// Resolution of the boundaries the points were attributed to.
    pub const fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Boundary key for the point at `index`, if any boundary contains it.
    pub fn get(&self, index: usize) -> Option<&BoundaryKey> {
        self.assignments.get(index).and_then(Option::as_ref)
    }

    /// Iterate over the assignments in point order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&BoundaryKey>> {
        self.assignments.iter().map(Option::as_ref)
    }

    /// Number of points covered by the attribution.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Report whether the attribution covers no points.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Number of points attributed to some boundary.
    pub fn attributed_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.is_some()).count()
    }
}

/// Attribute every point to the enclosing boundary of `layer`.
///
/// Convenience wrapper around [`ContainmentResolver`] for one-off joins.
///
/// # Errors
/// Returns [`SpatialJoinError`] when either side lacks a datum or the datums
/// differ.
///
/// # Examples
/// ```
/// use geo::{Coord, MultiPolygon, polygon};
/// use igatp_core::{
///     Boundary, BoundaryLayer, ClusterProfile, Epsg, PointRecord, Resolution, SubIndices,
///     spatial_attribute,
/// };
///
/// # fn main() -> Result<(), igatp_core::SpatialJoinError> {
/// let square = polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 2.0), (x: 0.0, y: 2.0)];
/// let layer = BoundaryLayer::new(
///     Resolution::Municipality,
///     Epsg::WGS84,
///     vec![Boundary::new("Porto", MultiPolygon(vec![square]))],
/// );
/// let inside = PointRecord::new(
///     "a", "c", "g", ClusterProfile::Unassigned, SubIndices::default(), Coord { x: 1.0, y: 1.0 },
/// );
/// let outside = PointRecord { position: Coord { x: 5.0, y: 5.0 }, ..inside.clone() };
///
/// let attribution = spatial_attribute(&[inside, outside], Some(Epsg::WGS84), &layer)?;
/// assert_eq!(attribution.get(0).map(|k| k.as_str()), Some("porto"));
/// assert_eq!(attribution.get(1), None);
/// # Ok(())
/// # }
/// ```
pub fn spatial_attribute(
    points: &[PointRecord],
    datum: Option<Epsg>,
    layer: &BoundaryLayer,
) -> Result<Attribution, SpatialJoinError> {
    ContainmentResolver::new(layer)?.attribute(points, datum)
}
