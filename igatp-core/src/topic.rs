//! Dominant review topics from the offline LDA model.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dominant topic attached to a point.
///
/// # Examples
/// ```
/// use igatp_core::Topic;
///
/// assert_eq!(Topic::from_id(3), Topic::Gastronomy);
/// assert_eq!(Topic::Gastronomy.as_str(), "gastronomic experience");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Topic {
    /// Beaches, walks and scenic open-air leisure.
    OutdoorNature,
    /// Lodging, cleanliness and hospitality.
    AccommodationComfort,
    /// Museums, history and heritage visits.
    CulturalHeritage,
    /// Food quality, dining and service.
    Gastronomy,
    /// A topic identifier with no known label.
    Unknown(i64),
}

impl Topic {
    /// Map a raw topic identifier onto a topic.
    pub const fn from_id(id: i64) -> Self {
        match id {
            0 => Self::OutdoorNature,
            1 => Self::AccommodationComfort,
            2 => Self::CulturalHeritage,
            3 => Self::Gastronomy,
            other => Self::Unknown(other),
        }
    }

    /// Return the topic label as a lowercase `&str`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OutdoorNature => "outdoor and nature leisure",
            Self::AccommodationComfort => "accommodation and comfort",
            Self::CulturalHeritage => "cultural and heritage visits",
            Self::Gastronomy => "gastronomic experience",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
