//! Point selection by thematic group and tourist profile.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ClusterProfile, PointRecord};

/// Restricts the points taking part in a computation.
///
/// A `None` selection admits every value; an empty selection admits none.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use igatp_core::{ClusterProfile, PointFilter, PointRecord, SubIndices};
///
/// let point = PointRecord::new(
///     "Serralves", "Museum", "Culture", ClusterProfile::FlagshipVenues,
///     SubIndices::default(), Coord { x: -8.66, y: 41.16 },
/// );
/// let filter = PointFilter::default().with_groups(["Culture"]);
/// assert!(filter.matches(&point));
/// assert!(!filter.with_clusters([ClusterProfile::Underperformers]).matches(&point));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointFilter {
    /// Admitted thematic groups.
    #[cfg_attr(feature = "serde", serde(default))]
    pub thematic_groups: Option<BTreeSet<String>>,
    /// Admitted tourist profiles.
    #[cfg_attr(feature = "serde", serde(default))]
    pub clusters: Option<BTreeSet<ClusterProfile>>,
}

impl PointFilter {
    /// Restrict to the given thematic groups.
    #[must_use]
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.thematic_groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict to the given tourist profiles.
    #[must_use]
    pub fn with_clusters<I>(mut self, clusters: I) -> Self
    where
        I: IntoIterator<Item = ClusterProfile>,
    {
        self.clusters = Some(clusters.into_iter().collect());
        self
    }

    /// Report whether `point` passes the filter.
    pub fn matches(&self, point: &PointRecord) -> bool {
        let group_ok = self
            .thematic_groups
            .as_ref()
            .is_none_or(|groups| groups.contains(&point.thematic_group));
        let cluster_ok = self
            .clusters
            .as_ref()
            .is_none_or(|clusters| clusters.contains(&point.cluster));
        group_ok && cluster_ok
    }

    /// Select matching points, preserving input order.
    pub fn apply<'a>(&self, points: &'a [PointRecord]) -> Vec<&'a PointRecord> {
        points.iter().filter(|point| self.matches(point)).collect()
    }
}
