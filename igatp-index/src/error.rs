//! Error types raised while assembling a snapshot or rendering a dashboard.

use igatp_core::{Epsg, Resolution, SpatialJoinError};
use thiserror::Error;

/// Errors raised by [`DatasetSnapshot::new`](crate::DatasetSnapshot::new).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// The points declare no reference datum.
    #[error("points declare no reference datum")]
    MissingPointDatum,
    /// A boundary layer was supplied in the slot of the other resolution.
    #[error("expected a {expected} layer but found a {found} layer")]
    WrongResolution {
        /// Resolution of the slot being filled.
        expected: Resolution,
        /// Resolution declared by the supplied layer.
        found: Resolution,
    },
    /// A boundary layer uses a different datum from the points.
    #[error("{resolution} boundaries do not use the points' datum {expected}")]
    LayerDatum {
        /// Resolution of the offending layer.
        resolution: Resolution,
        /// Datum of the points.
        expected: Epsg,
        /// Datum declared by the layer, if any.
        found: Option<Epsg>,
    },
}

/// Errors raised while rendering a dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// A spatial join could not be performed.
    #[error("spatial join failed")]
    SpatialJoin(#[from] SpatialJoinError),
}
