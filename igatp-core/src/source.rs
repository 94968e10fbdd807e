//! Merge of the tabular sources into point records.
//!
//! The composite index table carries one row per location with its
//! sub-indices and position; the topic table carries the dominant LDA topic
//! keyed by `(name, category)`. Rows are left-joined on that key. Rows
//! without a usable position, or with sub-indices outside the normalised
//! range, are excluded and counted in the [`MergeReport`].

use std::collections::HashMap;

use geo::Coord;
use log::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ClusterProfile, PointRecord, SubIndices, Topic};

/// One row of the composite index table.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IndexRow {
    /// Location name.
    pub name: String,
    /// Source category.
    pub category: String,
    /// Thematic group.
    pub thematic_group: String,
    /// Raw cluster identifier.
    pub cluster_id: Option<i64>,
    /// Normalised Bayesian rating.
    pub rating: Option<f64>,
    /// Normalised popularity.
    pub popularity: Option<f64>,
    /// Normalised sentiment.
    pub sentiment: Option<f64>,
    /// Latitude in degrees.
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    pub longitude: Option<f64>,
    /// City reported by the source.
    pub city: Option<String>,
    /// Number of similar locations nearby.
    pub similar_nearby: Option<u32>,
}

/// One row of the topic table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TopicRow {
    /// Location name.
    pub name: String,
    /// Source category.
    pub category: String,
    /// Raw dominant topic identifier.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dominant_topic: Option<i64>,
}

/// Outcome of [`merge_sources`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergeReport {
    /// Merged points in index-table order.
    pub points: Vec<PointRecord>,
    /// Rows dropped because latitude or longitude was missing or not finite.
    pub missing_position: usize,
    /// Rows dropped because a sub-index was outside `[0, 1]`.
    pub invalid_sub_indices: usize,
}

/// Join index rows with their dominant topics.
///
/// When the topic table holds several rows for the same `(name, category)`
/// key, the first row with a topic wins, so the join never duplicates points.
///
/// # Examples
/// ```
/// use igatp_core::{IndexRow, Topic, TopicRow, merge_sources};
///
/// let index = vec![
///     IndexRow {
///         name: "Foz".into(),
///         category: "Beach".into(),
///         latitude: Some(41.15),
///         longitude: Some(-8.68),
///         ..IndexRow::default()
///     },
///     IndexRow { name: "Nowhere".into(), ..IndexRow::default() },
/// ];
/// let topics = vec![TopicRow {
///     name: "Foz".into(),
///     category: "Beach".into(),
///     dominant_topic: Some(0),
/// }];
///
/// let report = merge_sources(&index, &topics);
/// assert_eq!(report.points.len(), 1);
/// assert_eq!(report.points[0].dominant_topic, Some(Topic::OutdoorNature));
/// assert_eq!(report.missing_position, 1);
/// ```
pub fn merge_sources(index_rows: &[IndexRow], topic_rows: &[TopicRow]) -> MergeReport {
    let mut topics: HashMap<(&str, &str), Topic> = HashMap::new();
    for row in topic_rows {
        if let Some(id) = row.dominant_topic {
            topics
                .entry((row.name.as_str(), row.category.as_str()))
                .or_insert_with(|| Topic::from_id(id));
        }
    }

    let mut report = MergeReport::default();
    for row in index_rows {
        let Some(position) = position_of(row) else {
            report.missing_position += 1;
            continue;
        };
        let sub_indices = match SubIndices::new(row.rating, row.popularity, row.sentiment) {
            Ok(indices) => indices,
            Err(err) => {
                warn!("Skipped '{}' ({}): {err}", row.name, row.category);
                report.invalid_sub_indices += 1;
                continue;
            }
        };
        let mut point = PointRecord::new(
            row.name.clone(),
            row.category.clone(),
            row.thematic_group.clone(),
            ClusterProfile::from_id(row.cluster_id),
            sub_indices,
            position,
        );
        point.dominant_topic = topics
            .get(&(row.name.as_str(), row.category.as_str()))
            .copied();
        point.city.clone_from(&row.city);
        point.similar_nearby = row.similar_nearby;
        report.points.push(point);
    }

    if report.missing_position > 0 {
        warn!(
            "Skipped {} index rows without a usable position",
            report.missing_position
        );
    }
    report
}

fn position_of(row: &IndexRow) -> Option<Coord<f64>> {
    let (lat, lon) = (row.latitude?, row.longitude?);
    (lat.is_finite() && lon.is_finite()).then_some(Coord { x: lon, y: lat })
}
