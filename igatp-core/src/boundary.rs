//! Administrative boundaries at the two territorial resolutions.

use geo::{Coord, MapCoords, MultiPolygon};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Epsg, Reproject, ReprojectError};

/// Territorial granularity of a boundary layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Resolution {
    /// Municipality (concelho) boundaries.
    Municipality,
    /// Parish (freguesia) boundaries.
    Parish,
}

impl Resolution {
    /// Return the resolution as a lowercase `&str`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Municipality => "municipality",
            Self::Parish => "parish",
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalised boundary identifier used as a grouping and join key.
///
/// Identifiers from independently sourced tables rarely agree on
/// formatting, so keys are trimmed and lowercased. Purely numeric codes also
/// lose their leading zeros, which spreadsheets tend to strip.
///
/// # Examples
/// ```
/// use igatp_core::BoundaryKey;
///
/// assert_eq!(BoundaryKey::new("  Porto "), BoundaryKey::new("porto"));
/// assert_eq!(BoundaryKey::new("011312"), BoundaryKey::new("11312"));
/// assert_eq!(BoundaryKey::new("000").as_str(), "0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub struct BoundaryKey(String);

impl BoundaryKey {
    /// Normalise a raw identifier into a key.
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            let stripped = trimmed.trim_start_matches('0');
            let digits = if stripped.is_empty() { "0" } else { stripped };
            return Self(digits.to_owned());
        }
        Self(trimmed.to_lowercase())
    }

    /// Borrow the normalised key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for BoundaryKey {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<BoundaryKey> for String {
    fn from(value: BoundaryKey) -> Self {
        value.0
    }
}

impl std::fmt::Display for BoundaryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single administrative boundary.
///
/// # Examples
/// ```
/// use geo::{MultiPolygon, polygon};
/// use igatp_core::Boundary;
///
/// let square = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0)];
/// let boundary = Boundary::new(" Matosinhos ", MultiPolygon(vec![square]));
/// assert_eq!(boundary.key.as_str(), "matosinhos");
/// assert_eq!(boundary.label(), "Matosinhos");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Boundary {
    /// Identifier as delivered by the source.
    pub id: String,
    /// Normalised identifier.
    pub key: BoundaryKey,
    /// Display name, when different from the identifier.
    pub name: Option<String>,
    /// Boundary geometry.
    pub geometry: MultiPolygon<f64>,
}

impl Boundary {
    /// Construct a boundary, deriving its key from `id`.
    pub fn new(id: impl Into<String>, geometry: MultiPolygon<f64>) -> Self {
        let id = id.into();
        Self {
            key: BoundaryKey::new(&id),
            id,
            name: None,
            geometry,
        }
    }

    /// Attach a display name while returning `self` for chaining.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display label: the name when present, otherwise the trimmed identifier.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.id.trim())
    }

    /// Report whether the geometry contains at least one polygon.
    pub fn has_geometry(&self) -> bool {
        !self.geometry.0.is_empty()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Boundary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            id: String,
            #[serde(default)]
            name: Option<String>,
            geometry: MultiPolygon<f64>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let boundary = Self::new(raw.id, raw.geometry);
        Ok(match raw.name {
            Some(name) => boundary.with_name(name),
            None => boundary,
        })
    }
}

/// All boundaries of one resolution, with their reference datum.
///
/// Boundary order is significant: when boundaries overlap, the spatial join
/// attributes a point to the first containing boundary in this order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundaryLayer {
    /// Territorial granularity.
    pub resolution: Resolution,
    /// Datum of every geometry in the layer, if declared.
    #[cfg_attr(feature = "serde", serde(default))]
    pub datum: Option<Epsg>,
    /// Boundaries in source order.
    pub boundaries: Vec<Boundary>,
}

impl BoundaryLayer {
    /// Construct a layer with a declared datum.
    pub const fn new(resolution: Resolution, datum: Epsg, boundaries: Vec<Boundary>) -> Self {
        Self {
            resolution,
            datum: Some(datum),
            boundaries,
        }
    }

    /// Number of boundaries in the layer.
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    /// Report whether the layer has no boundaries.
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Transform every geometry into `target`.
    ///
    /// # Errors
    /// Returns [`ReprojectError::MissingSourceDatum`] when the layer declares
    /// no datum, or the first error reported by `reprojection`.
    pub fn reprojected<R>(self, target: Epsg, reprojection: &R) -> Result<Self, ReprojectError>
    where
        R: Reproject + ?Sized,
    {
        let source = self.datum.ok_or(ReprojectError::MissingSourceDatum)?;
        if source == target {
            return Ok(self);
        }
        let boundaries = self
            .boundaries
            .into_iter()
            .map(|boundary| {
                let geometry = boundary
                    .geometry
                    .try_map_coords(|coord: Coord<f64>| {
                        reprojection.reproject(coord, source, target)
                    })?;
                Ok(Boundary {
                    geometry,
                    ..boundary
                })
            })
            .collect::<Result<Vec<_>, ReprojectError>>()?;
        Ok(Self {
            resolution: self.resolution,
            datum: Some(target),
            boundaries,
        })
    }
}
