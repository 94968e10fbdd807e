//! Reference datums and the reprojection seam.
//!
//! Containment tests only make sense when points and boundaries share one
//! coordinate reference system. The engine does not reproject by itself:
//! callers supply a [`Reproject`] implementation backed by their geometry
//! library of choice, and the spatial join refuses to compare coordinates
//! whose datums differ or are unknown.

use geo::Coord;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An EPSG coordinate reference system code.
///
/// # Examples
/// ```
/// use igatp_core::Epsg;
///
/// assert_eq!(Epsg::WGS84.code(), 4326);
/// assert_eq!(Epsg::new(3763).to_string(), "EPSG:3763");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Epsg(u32);

impl Epsg {
    /// WGS 84 geographic coordinates (longitude, latitude in degrees).
    pub const WGS84: Self = Self(4326);
    /// ETRS89 / Portugal TM06, the datum of the official boundary map.
    pub const PT_TM06: Self = Self(3763);

    /// Wrap a raw EPSG code.
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// Return the raw EPSG code.
    pub const fn code(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Epsg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

/// Errors raised while transforming coordinates between datums.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReprojectError {
    /// The collaborator cannot transform between the two datums.
    #[error("no transformation available from {from} to {to}")]
    Unsupported {
        /// Source datum.
        from: Epsg,
        /// Target datum.
        to: Epsg,
    },
    /// The layer being transformed declares no datum.
    #[error("cannot reproject a layer without a declared datum")]
    MissingSourceDatum,
    /// A coordinate could not be transformed.
    #[error("failed to transform coordinate ({x}, {y}) from {from} to {to}")]
    Coordinate {
        /// Easting or longitude of the failed coordinate.
        x: f64,
        /// Northing or latitude of the failed coordinate.
        y: f64,
        /// Source datum.
        from: Epsg,
        /// Target datum.
        to: Epsg,
    },
}

/// Transform coordinates from one datum to another.
///
/// Implementations wrap an external geometry library. The engine only relies
/// on the contract that the returned coordinate is expressed in `to`.
pub trait Reproject {
    /// Transform a single coordinate.
    fn reproject(&self, coord: Coord<f64>, from: Epsg, to: Epsg)
    -> Result<Coord<f64>, ReprojectError>;
}

/// Reprojection that only accepts same-datum requests.
///
/// Useful when every source is already delivered in the target datum.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityReprojection;

impl Reproject for IdentityReprojection {
    fn reproject(
        &self,
        coord: Coord<f64>,
        from: Epsg,
        to: Epsg,
    ) -> Result<Coord<f64>, ReprojectError> {
        if from == to {
            Ok(coord)
        } else {
            Err(ReprojectError::Unsupported { from, to })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_accepts_same_datum() {
        let coord = Coord { x: 1.0, y: 2.0 };
        let result = IdentityReprojection.reproject(coord, Epsg::WGS84, Epsg::WGS84);
        assert_eq!(result, Ok(coord));
    }

    #[test]
    fn identity_rejects_other_datums() {
        let coord = Coord { x: 1.0, y: 2.0 };
        let err = IdentityReprojection
            .reproject(coord, Epsg::PT_TM06, Epsg::WGS84)
            .unwrap_err();
        assert_eq!(
            err,
            ReprojectError::Unsupported {
                from: Epsg::PT_TM06,
                to: Epsg::WGS84
            }
        );
    }
}
