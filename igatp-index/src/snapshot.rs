//! Immutable, validated dataset shared by every dashboard render.

use igatp_core::{BoundaryLayer, Epsg, PointRecord, Resolution};
use serde::Deserialize;

use crate::{ParishStatistic, SentimentRecord, SnapshotError};

/// Raw inputs of a [`DatasetSnapshot`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SnapshotParts {
    /// Datum of the point coordinates.
    #[serde(default)]
    pub datum: Option<Epsg>,
    /// Merged touristic points.
    pub points: Vec<PointRecord>,
    /// Municipality boundaries.
    pub municipalities: BoundaryLayer,
    /// Parish boundaries.
    pub parishes: BoundaryLayer,
    /// Pre-aggregated parish table.
    #[serde(default)]
    pub parish_statistics: Vec<ParishStatistic>,
    /// Dated comment polarities.
    #[serde(default)]
    pub sentiment: Vec<SentimentRecord>,
}

/// A dataset whose layers are known to be joinable with its points.
///
/// # Examples
/// ```
/// use igatp_core::{Epsg, Resolution, test_support::square_layer};
/// use igatp_index::{DatasetSnapshot, SnapshotError, SnapshotParts};
///
/// let parts = SnapshotParts {
///     datum: Some(Epsg::WGS84),
///     points: Vec::new(),
///     municipalities: square_layer(Resolution::Parish, &[]),
///     parishes: square_layer(Resolution::Parish, &[]),
///     parish_statistics: Vec::new(),
///     sentiment: Vec::new(),
/// };
/// assert_eq!(
///     DatasetSnapshot::new(parts).unwrap_err(),
///     SnapshotError::WrongResolution {
///         expected: Resolution::Municipality,
///         found: Resolution::Parish,
///     }
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSnapshot {
    datum: Epsg,
    points: Vec<PointRecord>,
    municipalities: BoundaryLayer,
    parishes: BoundaryLayer,
    parish_statistics: Vec<ParishStatistic>,
    sentiment: Vec<SentimentRecord>,
}

impl DatasetSnapshot {
    /// Validate `parts` and freeze them into a snapshot.
    ///
    /// # Errors
    /// Returns [`SnapshotError`] when the points declare no datum, when a
    /// layer sits in the slot of the other resolution, or when a layer's
    /// datum differs from the points' datum.
    pub fn new(parts: SnapshotParts) -> Result<Self, SnapshotError> {
        let datum = parts.datum.ok_or(SnapshotError::MissingPointDatum)?;
        check_layer(&parts.municipalities, Resolution::Municipality, datum)?;
        check_layer(&parts.parishes, Resolution::Parish, datum)?;
        Ok(Self {
            datum,
            points: parts.points,
            municipalities: parts.municipalities,
            parishes: parts.parishes,
            parish_statistics: parts.parish_statistics,
            sentiment: parts.sentiment,
        })
    }

    /// Datum shared by the points and both layers.
    #[must_use]
    pub const fn datum(&self) -> Epsg {
        self.datum
    }

    /// Touristic points.
    #[must_use]
    pub fn points(&self) -> &[PointRecord] {
        &self.points
    }

    /// Municipality boundaries.
    #[must_use]
    pub const fn municipalities(&self) -> &BoundaryLayer {
        &self.municipalities
    }

    /// Parish boundaries.
    #[must_use]
    pub const fn parishes(&self) -> &BoundaryLayer {
        &self.parishes
    }

    /// Pre-aggregated parish table.
    #[must_use]
    pub fn parish_statistics(&self) -> &[ParishStatistic] {
        &self.parish_statistics
    }

    /// Dated comment polarities.
    #[must_use]
    pub fn sentiment(&self) -> &[SentimentRecord] {
        &self.sentiment
    }
}

fn check_layer(
    layer: &BoundaryLayer,
    expected: Resolution,
    datum: Epsg,
) -> Result<(), SnapshotError> {
    if layer.resolution != expected {
        return Err(SnapshotError::WrongResolution {
            expected,
            found: layer.resolution,
        });
    }
    if layer.datum != Some(datum) {
        return Err(SnapshotError::LayerDatum {
            resolution: expected,
            expected: datum,
            found: layer.datum,
        });
    }
    Ok(())
}
