//! Touristic points and their normalised sub-indices.

use geo::Coord;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ClusterProfile, Topic};

/// One of the three normalised components of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SubIndex {
    /// Bayesian-adjusted rating quality.
    Rating,
    /// Review volume.
    Popularity,
    /// Mean comment polarity.
    Sentiment,
}

impl SubIndex {
    /// All sub-indices in weight-vector order.
    pub const ALL: [Self; 3] = [Self::Rating, Self::Popularity, Self::Sentiment];

    /// Return the sub-index name as a lowercase `&str`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Popularity => "popularity",
            Self::Sentiment => "sentiment",
        }
    }
}

impl std::fmt::Display for SubIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by [`SubIndices::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SubIndexError {
    /// A present value was outside `[0.0, 1.0]` or not finite.
    #[error("{index} sub-index {value} is outside the normalised range [0, 1]")]
    OutOfRange {
        /// Offending sub-index.
        index: SubIndex,
        /// Value supplied by the source.
        value: f64,
    },
}

/// The three pre-normalised sub-indices of a point.
///
/// Each value is either present and within `[0.0, 1.0]`, or absent.
///
/// # Examples
/// ```
/// use igatp_core::{SubIndex, SubIndices};
///
/// # fn main() -> Result<(), igatp_core::SubIndexError> {
/// let indices = SubIndices::new(Some(0.8), None, Some(0.5))?;
/// assert_eq!(indices.get(SubIndex::Rating), Some(0.8));
/// assert!(!indices.is_complete());
/// assert!(SubIndices::new(Some(1.2), None, None).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SubIndices {
    rating: Option<f64>,
    popularity: Option<f64>,
    sentiment: Option<f64>,
}

impl SubIndices {
    /// Validate and construct the sub-index triple.
    ///
    /// # Errors
    /// Returns [`SubIndexError::OutOfRange`] for the first present value that
    /// is non-finite or outside `[0.0, 1.0]`.
    pub fn new(
        rating: Option<f64>,
        popularity: Option<f64>,
        sentiment: Option<f64>,
    ) -> Result<Self, SubIndexError> {
        check(SubIndex::Rating, rating)?;
        check(SubIndex::Popularity, popularity)?;
        check(SubIndex::Sentiment, sentiment)?;
        Ok(Self {
            rating,
            popularity,
            sentiment,
        })
    }

    /// Return the value of a single sub-index.
    pub const fn get(&self, index: SubIndex) -> Option<f64> {
        match index {
            SubIndex::Rating => self.rating,
            SubIndex::Popularity => self.popularity,
            SubIndex::Sentiment => self.sentiment,
        }
    }

    /// Return all three values when every one of them is present.
    pub const fn complete(&self) -> Option<[f64; 3]> {
        match (self.rating, self.popularity, self.sentiment) {
            (Some(r), Some(p), Some(s)) => Some([r, p, s]),
            _ => None,
        }
    }

    /// Report whether all three values are present.
    pub const fn is_complete(&self) -> bool {
        self.complete().is_some()
    }
}

fn check(index: SubIndex, value: Option<f64>) -> Result<(), SubIndexError> {
    match value {
        Some(v) if !(0.0..=1.0).contains(&v) => Err(SubIndexError::OutOfRange { index, value: v }),
        _ => Ok(()),
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for SubIndices {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            rating: Option<f64>,
            #[serde(default)]
            popularity: Option<f64>,
            #[serde(default)]
            sentiment: Option<f64>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.rating, raw.popularity, raw.sentiment).map_err(serde::de::Error::custom)
    }
}

/// A geocoded touristic location.
///
/// Coordinates are stored as `x = longitude`, `y = latitude` in the datum of
/// the dataset the point belongs to.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use igatp_core::{ClusterProfile, PointRecord, SubIndices};
///
/// let point = PointRecord::new(
///     "Livraria Lello",
///     "Bookshop",
///     "Culture",
///     ClusterProfile::FlagshipVenues,
///     SubIndices::default(),
///     Coord { x: -8.6149, y: 41.1469 },
/// );
/// assert_eq!(point.name, "Livraria Lello");
/// assert!(point.dominant_topic.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointRecord {
    /// Location name.
    pub name: String,
    /// Source category, e.g. "Museum".
    pub category: String,
    /// Thematic group used by the dashboard filter.
    pub thematic_group: String,
    /// Tourist profile from the clustering step.
    pub cluster: ClusterProfile,
    /// Normalised rating, popularity and sentiment.
    pub sub_indices: SubIndices,
    /// Geographic position.
    pub position: Coord<f64>,
    /// Dominant review topic, when known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dominant_topic: Option<Topic>,
    /// City reported by the source.
    #[cfg_attr(feature = "serde", serde(default))]
    pub city: Option<String>,
    /// Number of similar locations nearby.
    #[cfg_attr(feature = "serde", serde(default))]
    pub similar_nearby: Option<u32>,
}

impl PointRecord {
    /// Construct a point without the optional presentation attributes.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        thematic_group: impl Into<String>,
        cluster: ClusterProfile,
        sub_indices: SubIndices,
        position: Coord<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            thematic_group: thematic_group.into(),
            cluster,
            sub_indices,
            position,
            dominant_topic: None,
            city: None,
            similar_nearby: None,
        }
    }

    /// Attach a dominant topic while returning `self` for chaining.
    #[must_use]
    pub const fn with_topic(mut self, topic: Topic) -> Self {
        self.dominant_topic = Some(topic);
        self
    }

    /// Report whether the position can take part in spatial predicates.
    pub const fn has_usable_position(&self) -> bool {
        self.position.x.is_finite() && self.position.y.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(0.0))]
    #[case(Some(1.0))]
    #[case(None)]
    fn accepts_boundary_and_absent_values(#[case] value: Option<f64>) {
        assert!(SubIndices::new(value, value, value).is_ok());
    }

    #[rstest]
    #[case(-0.01)]
    #[case(1.01)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_out_of_range_values(#[case] value: f64) {
        let err = SubIndices::new(Some(0.5), Some(value), None).unwrap_err();
        assert!(matches!(
            err,
            SubIndexError::OutOfRange {
                index: SubIndex::Popularity,
                ..
            }
        ));
    }

    #[test]
    fn complete_requires_every_value() {
        let partial = SubIndices::new(Some(0.1), Some(0.2), None).unwrap();
        assert_eq!(partial.complete(), None);
        let full = SubIndices::new(Some(0.1), Some(0.2), Some(0.3)).unwrap();
        assert_eq!(full.complete(), Some([0.1, 0.2, 0.3]));
    }

    #[test]
    fn non_finite_position_is_unusable() {
        let point = PointRecord::new(
            "x",
            "y",
            "z",
            ClusterProfile::Unassigned,
            SubIndices::default(),
            Coord {
                x: f64::NAN,
                y: 0.0,
            },
        );
        assert!(!point.has_usable_position());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialising_rejects_out_of_range_sub_index() {
        let err = serde_json::from_str::<SubIndices>(r#"{"rating": 2.0}"#).unwrap_err();
        assert!(err.to_string().contains("outside the normalised range"));
    }
}
