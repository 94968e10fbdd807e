//! Pre-aggregated parish statistics.
//!
//! Parish means may come from an offline table instead of the live spatial
//! join. The table is joined to the parish layer on the normalised parish
//! code.

use std::collections::HashMap;
use std::str::FromStr;

use igatp_core::{BoundaryKey, BoundaryLayer, Measure};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::TerritorialAggregate;
use crate::aggregate::apply_rescale;

/// One row of the pre-aggregated parish table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParishStatistic {
    /// Parish code as delivered by the table.
    pub parish_code: String,
    /// Parish display name.
    pub parish_name: Option<String>,
    /// Mean composite score computed offline.
    pub igatp_mean: Option<f64>,
    /// Number of points behind the mean, when the table records it.
    pub point_count: Option<usize>,
}

/// Where parish-level aggregates come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParishSource {
    /// Aggregate the live spatial join under the current weights.
    #[default]
    Live,
    /// Use the pre-aggregated parish table.
    Precomputed,
}

impl ParishSource {
    /// Return the source name as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Precomputed => "precomputed",
        }
    }
}

impl std::fmt::Display for ParishSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`ParishSource`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown parish source '{0}', expected 'live' or 'precomputed'")]
pub struct ParseParishSourceError(String);

impl FromStr for ParishSource {
    type Err = ParseParishSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "precomputed" => Ok(Self::Precomputed),
            _ => Err(ParseParishSourceError(s.to_owned())),
        }
    }
}

/// Join the pre-aggregated parish table onto `layer`.
///
/// Table rows are matched on the normalised parish code; when a code occurs
/// more than once the first row wins. Parishes without a matching row have
/// an absent mean. When no row of the table carries a mean at all, every
/// rescaled value is [`Measure::ZeroByPolicy`].
///
/// # Examples
/// ```
/// use igatp_core::{Measure, Resolution, test_support::square_layer};
/// use igatp_index::{ParishStatistic, join_parish_statistics};
///
/// let layer = square_layer(Resolution::Parish, &[("0131", 0.0, 0.0, 1.0)]);
/// let table = [ParishStatistic {
///     parish_code: "131".into(),
///     parish_name: Some("Bonfim".into()),
///     igatp_mean: Some(0.42),
///     point_count: Some(12),
/// }];
///
/// let joined = join_parish_statistics(&layer, &table);
/// assert_eq!(joined[0].label, "Bonfim");
/// assert_eq!(joined[0].mean, Measure::Present(0.42));
/// assert_eq!(joined[0].count, 12);
/// ```
#[must_use]
pub fn join_parish_statistics(
    layer: &BoundaryLayer,
    table: &[ParishStatistic],
) -> Vec<TerritorialAggregate> {
    let mut rows: HashMap<BoundaryKey, &ParishStatistic> = HashMap::new();
    for row in table {
        rows.entry(BoundaryKey::new(&row.parish_code))
            .or_insert(row);
    }
    let has_means = table.iter().any(|row| row.igatp_mean.is_some());
    if !has_means {
        warn!("Parish statistics carry no mean values; scaled values fall back to zero");
    }

    let mut aggregates: Vec<TerritorialAggregate> = Vec::with_capacity(layer.len());
    for boundary in &layer.boundaries {
        if aggregates.iter().any(|existing| existing.key == boundary.key) {
            continue;
        }
        let row = rows.get(&boundary.key);
        let label = row
            .and_then(|stat| stat.parish_name.as_deref())
            .unwrap_or_else(|| boundary.label());
        aggregates.push(TerritorialAggregate {
            key: boundary.key.clone(),
            label: label.to_owned(),
            mean: Measure::from_option(row.and_then(|stat| stat.igatp_mean)),
            count: row.and_then(|stat| stat.point_count).unwrap_or(0),
            scaled: Measure::ZeroByPolicy,
        });
    }

    if has_means {
        apply_rescale(&mut aggregates);
    }
    debug!(
        "Joined {} parish statistics onto {} parishes",
        table.len(),
        aggregates.len()
    );
    aggregates
}
