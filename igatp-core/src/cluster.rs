//! Tourist profiles produced by the offline K-Medoids clustering.
//!
//! The cluster identifier column is mapped onto a closed enumeration. The
//! mapping is total: identifiers outside the known range become
//! [`ClusterProfile::Unknown`] and missing identifiers become
//! [`ClusterProfile::Unassigned`], so no point is dropped by the mapping
//! itself.
//!
//! # Examples
//! ```
//! use igatp_core::ClusterProfile;
//!
//! assert_eq!(ClusterProfile::from_id(Some(3)), ClusterProfile::FlagshipVenues);
//! assert_eq!(ClusterProfile::from_id(Some(9)), ClusterProfile::Unknown(9));
//! assert_eq!(ClusterProfile::FlagshipVenues.to_string(), "Flagship Venues");
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Closed set of tourist profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClusterProfile {
    /// Niche or specialised places: high ratings, low exposure.
    BoutiqueNiche,
    /// Widely visited places with lower sentiment.
    HiddenPopular,
    /// Average quality and popularity; the dominant profile.
    MainstreamCore,
    /// High-quality, highly visible top locations.
    FlagshipVenues,
    /// Low visibility and low ratings.
    Underperformers,
    /// A single, extremely distinct case.
    ExtremeOutlier,
    /// A cluster identifier with no known profile.
    Unknown(i64),
    /// The source row carried no cluster identifier.
    Unassigned,
}

impl ClusterProfile {
    /// Profiles with a known label, in identifier order.
    pub const KNOWN: [Self; 6] = [
        Self::BoutiqueNiche,
        Self::HiddenPopular,
        Self::MainstreamCore,
        Self::FlagshipVenues,
        Self::Underperformers,
        Self::ExtremeOutlier,
    ];

    /// Map a raw cluster identifier onto a profile.
    pub const fn from_id(id: Option<i64>) -> Self {
        match id {
            Some(0) => Self::BoutiqueNiche,
            Some(1) => Self::HiddenPopular,
            Some(2) => Self::MainstreamCore,
            Some(3) => Self::FlagshipVenues,
            Some(4) => Self::Underperformers,
            Some(5) => Self::ExtremeOutlier,
            Some(other) => Self::Unknown(other),
            None => Self::Unassigned,
        }
    }

    /// Return the raw identifier, if the profile has one.
    ///
    /// # Examples
    /// ```
    /// use igatp_core::ClusterProfile;
    ///
    /// assert_eq!(ClusterProfile::MainstreamCore.id(), Some(2));
    /// assert_eq!(ClusterProfile::Unassigned.id(), None);
    /// ```
    pub const fn id(&self) -> Option<i64> {
        match self {
            Self::BoutiqueNiche => Some(0),
            Self::HiddenPopular => Some(1),
            Self::MainstreamCore => Some(2),
            Self::FlagshipVenues => Some(3),
            Self::Underperformers => Some(4),
            Self::ExtremeOutlier => Some(5),
            Self::Unknown(id) => Some(*id),
            Self::Unassigned => None,
        }
    }

    /// Human-readable profile label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::BoutiqueNiche => "Boutique / Niche",
            Self::HiddenPopular => "Hidden Popular",
            Self::MainstreamCore => "Mainstream Core",
            Self::FlagshipVenues => "Flagship Venues",
            Self::Underperformers => "Underperformers",
            Self::ExtremeOutlier => "Extreme Outlier",
            Self::Unknown(_) => "Unknown",
            Self::Unassigned => "Unassigned",
        }
    }
}

impl std::fmt::Display for ClusterProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(id) => write!(f, "Unknown ({id})"),
            other => f.write_str(other.label()),
        }
    }
}

impl std::str::FromStr for ClusterProfile {
    type Err = String;

    /// Parse either a numeric identifier or a snake-case profile name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(id) = trimmed.parse::<i64>() {
            return Ok(Self::from_id(Some(id)));
        }
        match trimmed.to_lowercase().as_str() {
            "boutique_niche" => Ok(Self::BoutiqueNiche),
            "hidden_popular" => Ok(Self::HiddenPopular),
            "mainstream_core" => Ok(Self::MainstreamCore),
            "flagship_venues" => Ok(Self::FlagshipVenues),
            "underperformers" => Ok(Self::Underperformers),
            "extreme_outlier" => Ok(Self::ExtremeOutlier),
            "unassigned" => Ok(Self::Unassigned),
            _ => Err(format!("unknown cluster profile '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    #[case(5)]
    fn known_ids_round_trip(#[case] id: i64) {
        assert_eq!(ClusterProfile::from_id(Some(id)).id(), Some(id));
    }

    #[rstest]
    #[case(Some(6), ClusterProfile::Unknown(6))]
    #[case(Some(-1), ClusterProfile::Unknown(-1))]
    #[case(None, ClusterProfile::Unassigned)]
    fn unmapped_ids_are_explicit(#[case] id: Option<i64>, #[case] expected: ClusterProfile) {
        assert_eq!(ClusterProfile::from_id(id), expected);
    }

    #[test]
    fn parses_names_and_ids() {
        assert_eq!(
            ClusterProfile::from_str("hidden_popular"),
            Ok(ClusterProfile::HiddenPopular)
        );
        assert_eq!(
            ClusterProfile::from_str(" 4 "),
            Ok(ClusterProfile::Underperformers)
        );
        let err = ClusterProfile::from_str("nope").unwrap_err();
        assert!(err.contains("unknown cluster profile"));
    }

    #[test]
    fn display_includes_unknown_id() {
        assert_eq!(ClusterProfile::Unknown(7).to_string(), "Unknown (7)");
    }
}
