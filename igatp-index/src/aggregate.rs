//! Territorial aggregation of composite scores.
//!
//! Scored points are grouped by the boundary that contains them. Each
//! boundary receives the arithmetic mean of its contributing scores and a
//! min-max rescaled copy of that mean for colour ramps.

use std::collections::HashMap;

use igatp_core::{Attribution, BoundaryKey, BoundaryLayer, Measure, ScoredPoint};
use log::debug;
use serde::Serialize;

/// Mean composite score of one boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerritorialAggregate {
    /// Normalised boundary key.
    pub key: BoundaryKey,
    /// Display label of the boundary.
    pub label: String,
    /// Mean composite score of the contributing points.
    pub mean: Measure,
    /// Number of points that contributed to the mean.
    pub count: usize,
    /// Mean rescaled into `[0, 1]` across the layer.
    pub scaled: Measure,
}

#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: usize,
    policy_only: bool,
}

impl Accumulator {
    #[expect(
        clippy::float_arithmetic,
        reason = "accumulating a running sum of scores"
    )]
    fn push(&mut self, score: Measure) {
        let Some(value) = score.value() else {
            return;
        };
        self.policy_only = (self.count == 0 || self.policy_only)
            && matches!(score, Measure::ZeroByPolicy);
        self.sum += value;
        self.count += 1;
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "means divide a float sum by a bounded point count"
    )]
    fn mean(self) -> Measure {
        match self.count {
            0 => Measure::Absent,
            _ if self.policy_only => Measure::ZeroByPolicy,
            count => Measure::Present(self.sum / count as f64),
        }
    }
}

/// Aggregate composite scores per boundary of `layer`.
///
/// `attribution` must be aligned with `scored`. The result holds one entry
/// per distinct boundary key in layer order; the first boundary carrying a
/// key provides its label. Absent scores are ignored and a boundary without
/// contributing points has an absent mean.
///
/// # Examples
/// ```
/// use igatp_core::{
///     Measure, Resolution, WeightVector, compute_composite, spatial_attribute,
///     test_support::{square_layer, uniform_point},
/// };
/// use igatp_index::aggregate_by_boundary;
///
/// # fn main() -> Result<(), igatp_core::SpatialJoinError> {
/// let layer = square_layer(Resolution::Municipality, &[("Porto", 0.0, 0.0, 1.0)]);
/// let points = [uniform_point("a", 0.5, 0.5, 0.2), uniform_point("b", 0.2, 0.2, 0.4)];
/// let attribution = spatial_attribute(&points, layer.datum, &layer)?;
/// let scored = compute_composite(&WeightVector::default(), &points);
///
/// let aggregates = aggregate_by_boundary(&scored, &attribution, &layer);
/// assert_eq!(aggregates[0].count, 2);
/// assert!(matches!(aggregates[0].mean, Measure::Present(m) if (m - 0.3).abs() < 1e-9));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn aggregate_by_boundary(
    scored: &[ScoredPoint<'_>],
    attribution: &Attribution,
    layer: &BoundaryLayer,
) -> Vec<TerritorialAggregate> {
    let mut totals: HashMap<&BoundaryKey, Accumulator> = HashMap::new();
    for (point, assigned) in scored.iter().zip(attribution.iter()) {
        if let Some(key) = assigned {
            totals.entry(key).or_default().push(point.composite);
        }
    }

    let mut aggregates: Vec<TerritorialAggregate> = Vec::with_capacity(layer.len());
    for boundary in &layer.boundaries {
        if aggregates.iter().any(|existing| existing.key == boundary.key) {
            continue;
        }
        let accumulator = totals.get(&boundary.key).copied().unwrap_or_default();
        aggregates.push(TerritorialAggregate {
            key: boundary.key.clone(),
            label: boundary.label().to_owned(),
            mean: accumulator.mean(),
            count: accumulator.count,
            scaled: Measure::Absent,
        });
    }
    apply_rescale(&mut aggregates);

    debug!(
        "Aggregated {} scored points into {} {} boundaries",
        scored.len(),
        aggregates.len(),
        layer.resolution
    );
    aggregates
}

pub(crate) fn apply_rescale(aggregates: &mut [TerritorialAggregate]) {
    let means: Vec<Measure> = aggregates.iter().map(|aggregate| aggregate.mean).collect();
    for (aggregate, scaled) in aggregates.iter_mut().zip(min_max_rescale(&means)) {
        aggregate.scaled = scaled;
    }
}

/// Rescale present values into `[0, 1]` with `(x - min) / (max - min)`.
///
/// Absent and zero-by-policy values pass through unchanged and do not take
/// part in the range. When every present value is equal, each rescales to
/// `0.0`.
///
/// # Examples
/// ```
/// use igatp_core::Measure;
/// use igatp_index::min_max_rescale;
///
/// let scaled = min_max_rescale(&[Measure::Present(2.0), Measure::Absent, Measure::Present(4.0)]);
/// assert_eq!(scaled, [Measure::Present(0.0), Measure::Absent, Measure::Present(1.0)]);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "min-max scaling subtracts and divides by the value range"
)]
pub fn min_max_rescale(values: &[Measure]) -> Vec<Measure> {
    let present = values.iter().filter_map(|value| match value {
        Measure::Present(v) => Some(*v),
        Measure::Absent | Measure::ZeroByPolicy => None,
    });
    let range = present.fold(None, |range: Option<(f64, f64)>, v| {
        Some(range.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
    });

    values
        .iter()
        .map(|value| match (*value, range) {
            (Measure::Present(v), Some((lo, hi))) => {
                let span = hi - lo;
                if span > 0.0 {
                    Measure::Present(((v - lo) / span).clamp(0.0, 1.0))
                } else {
                    Measure::Present(0.0)
                }
            }
            (other, _) => other,
        })
        .collect()
}
