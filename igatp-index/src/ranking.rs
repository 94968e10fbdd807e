//! Top and bottom rankings over scored entries.

use std::collections::HashMap;

use igatp_core::{Measure, ScoredPoint, SubIndex};
use serde::{Deserialize, Serialize};

/// One ranked entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    /// The ranked item.
    pub item: T,
    /// Value the item was ranked by.
    pub value: f64,
}

/// The highest and lowest entries of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking<T> {
    /// Entries in descending order of value.
    pub top: Vec<Ranked<T>>,
    /// Entries in ascending order of value.
    pub bottom: Vec<Ranked<T>>,
}

impl<T> Default for Ranking<T> {
    fn default() -> Self {
        Self {
            top: Vec::new(),
            bottom: Vec::new(),
        }
    }
}

/// Number of entries shown per ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingSizes {
    /// Entries per territorial ranking.
    pub territories: usize,
    /// Entries per point ranking.
    pub points: usize,
}

impl Default for RankingSizes {
    fn default() -> Self {
        Self {
            territories: 3,
            points: 5,
        }
    }
}

/// Rank `entries` by value.
///
/// Absent entries are excluded and zero-by-policy entries rank as `0.0`.
/// Both views are stable, so ties keep their input order.
///
/// # Examples
/// ```
/// use igatp_core::Measure;
/// use igatp_index::rank;
///
/// let entries = [
///     ("A", Measure::Present(0.9)),
///     ("B", Measure::Present(0.5)),
///     ("C", Measure::Present(0.9)),
///     ("D", Measure::Absent),
///     ("E", Measure::Present(0.1)),
/// ];
/// let ranking = rank(entries, 3);
/// let top: Vec<_> = ranking.top.iter().map(|r| r.item).collect();
/// let bottom: Vec<_> = ranking.bottom.iter().map(|r| r.item).collect();
/// assert_eq!(top, ["A", "C", "B"]);
/// assert_eq!(bottom, ["E", "B", "A"]);
/// ```
#[must_use]
pub fn rank<T, I>(entries: I, n: usize) -> Ranking<T>
where
    T: Clone,
    I: IntoIterator<Item = (T, Measure)>,
{
    let mut ascending: Vec<Ranked<T>> = entries
        .into_iter()
        .filter_map(|(item, measure)| measure.value().map(|value| Ranked { item, value }))
        .collect();
    let mut descending = ascending.clone();
    descending.sort_by(|a, b| b.value.total_cmp(&a.value));
    descending.truncate(n);
    ascending.sort_by(|a, b| a.value.total_cmp(&b.value));
    ascending.truncate(n);
    Ranking {
        top: descending,
        bottom: ascending,
    }
}

/// Per-point value a point ranking is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointMetric {
    /// Composite score under the current weights.
    Composite,
    /// Rating sub-index.
    Rating,
    /// Popularity sub-index.
    Popularity,
    /// Sentiment sub-index.
    Sentiment,
}

impl PointMetric {
    /// Every metric in presentation order.
    pub const ALL: [Self; 4] = [
        Self::Composite,
        Self::Rating,
        Self::Popularity,
        Self::Sentiment,
    ];

    fn read(self, scored: &ScoredPoint<'_>) -> Option<f64> {
        let index = match self {
            Self::Composite => return scored.composite.value(),
            Self::Rating => SubIndex::Rating,
            Self::Popularity => SubIndex::Popularity,
            Self::Sentiment => SubIndex::Sentiment,
        };
        scored.point.sub_indices.get(index)
    }
}

/// Rank locations by the mean of `metric` across points sharing a name.
///
/// Names keep their first-seen order before ranking, so tied means resolve
/// in input order. A name with no present value is excluded.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "per-name means divide a float sum by a bounded count"
)]
pub fn rank_points(scored: &[ScoredPoint<'_>], metric: PointMetric, n: usize) -> Ranking<String> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, f64, usize)> = Vec::new();
    for entry in scored {
        let name = entry.point.name.as_str();
        let slot = *positions.entry(name).or_insert_with(|| {
            groups.push((name, 0.0, 0));
            groups.len() - 1
        });
        if let (Some(value), Some(group)) = (metric.read(entry), groups.get_mut(slot)) {
            group.1 += value;
            group.2 += 1;
        }
    }

    let means = groups.into_iter().map(|(name, sum, count)| {
        let mean = if count == 0 {
            Measure::Absent
        } else {
            Measure::Present(sum / count as f64)
        };
        (name.to_owned(), mean)
    });
    rank(means, n)
}
