//! Composite score calculation.
//!
//! The composite score is the weighted sum of a point's three sub-indices
//! under the normalised weight vector. Missing sub-indices propagate: a point
//! with any absent sub-index has an absent composite, so it is excluded from
//! territorial means instead of being counted as zero.

use crate::{Measure, NormalisedWeights, PointRecord, SubIndices, WeightVector};

/// Computes composite scores for a fixed weight vector.
///
/// # Examples
/// ```
/// use igatp_core::{CompositeScorer, Measure, SubIndices, WeightVector};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let scorer = CompositeScorer::new(&WeightVector::new(1.0, 1.0, 0.0)?);
/// let indices = SubIndices::new(Some(0.8), Some(0.4), Some(0.1))?;
/// let Measure::Present(score) = scorer.score(&indices) else {
///     panic!("score should be present");
/// };
/// assert!((score - 0.6).abs() < 1e-12);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeScorer {
    weights: NormalisedWeights,
}

impl CompositeScorer {
    /// Normalise `weights` and build a scorer.
    pub fn new(weights: &WeightVector) -> Self {
        Self {
            weights: weights.normalised(),
        }
    }

    /// The normalised weights applied by this scorer.
    pub const fn weights(&self) -> &NormalisedWeights {
        &self.weights
    }

    /// Score one sub-index triple.
    ///
    /// Returns [`Measure::Absent`] when any sub-index is missing and
    /// [`Measure::ZeroByPolicy`] when the raw weights summed to zero.
    pub fn score(&self, indices: &SubIndices) -> Measure {
        let Some([rating, popularity, sentiment]) = indices.complete() else {
            return Measure::Absent;
        };
        if self.weights.is_zero_sum() {
            return Measure::ZeroByPolicy;
        }
        let raw = self.weights.rating() * rating
            + self.weights.popularity() * popularity
            + self.weights.sentiment() * sentiment;
        // Sub-indices lie in [0, 1] and the weights are convex, so clamping
        // only absorbs rounding error.
        Measure::Present(raw.clamp(0.0, 1.0))
    }
}

/// A point paired with its composite score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPoint<'a> {
    /// The scored point.
    pub point: &'a PointRecord,
    /// Composite score under the current weights.
    pub composite: Measure,
}

/// Score every point under `weights`, preserving input order.
///
/// Accepts any iterator of borrowed points, so both a slice and a filtered
/// selection of references can be scored.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use igatp_core::{
///     ClusterProfile, Measure, PointRecord, SubIndices, WeightVector, compute_composite,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let point = PointRecord::new(
///     "Ribeira",
///     "Square",
///     "Leisure",
///     ClusterProfile::MainstreamCore,
///     SubIndices::new(Some(0.5), None, Some(0.5))?,
///     Coord { x: -8.61, y: 41.14 },
/// );
/// let points = [point];
/// let scored = compute_composite(&WeightVector::default(), &points);
/// assert_eq!(scored[0].composite, Measure::Absent);
/// # Ok(())
/// # }
/// ```
pub fn compute_composite<'a, I>(weights: &WeightVector, points: I) -> Vec<ScoredPoint<'a>>
where
    I: IntoIterator<Item = &'a PointRecord>,
{
    let scorer = CompositeScorer::new(weights);
    points
        .into_iter()
        .map(|point| ScoredPoint {
            point,
            composite: scorer.score(&point.sub_indices),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TOLERANCE: f64 = 1e-12;

    fn indices(r: Option<f64>, p: Option<f64>, s: Option<f64>) -> SubIndices {
        SubIndices::new(r, p, s).expect("valid sub-indices")
    }

    #[rstest]
    #[case((1.0, 0.0, 0.0), 0.9)]
    #[case((0.0, 1.0, 0.0), 0.3)]
    #[case((0.0, 0.0, 1.0), 0.6)]
    #[case((1.0, 1.0, 1.0), 0.6)]
    #[case((2.0, 1.0, 1.0), 0.675)]
    #[case((f64::MAX, f64::MAX, 0.0), 0.6)]
    fn weighted_sum_uses_normalised_weights(#[case] raw: (f64, f64, f64), #[case] expected: f64) {
        let weights = WeightVector::new(raw.0, raw.1, raw.2).expect("valid weights");
        let scorer = CompositeScorer::new(&weights);
        let score = scorer.score(&indices(Some(0.9), Some(0.3), Some(0.6)));
        let value = score.value().expect("score present");
        assert!(score.is_present());
        assert!((value - expected).abs() <= TOLERANCE, "got {value}");
    }

    #[rstest]
    #[case(indices(None, Some(0.3), Some(0.6)))]
    #[case(indices(Some(0.9), None, Some(0.6)))]
    #[case(indices(Some(0.9), Some(0.3), None))]
    fn missing_sub_index_yields_absent(#[case] input: SubIndices) {
        let scorer = CompositeScorer::new(&WeightVector::default());
        assert_eq!(scorer.score(&input), Measure::Absent);
    }

    #[test]
    fn missing_sub_index_with_zero_weight_is_still_absent() {
        let weights = WeightVector::new(1.0, 1.0, 0.0).expect("valid weights");
        let scorer = CompositeScorer::new(&weights);
        assert_eq!(
            scorer.score(&indices(Some(0.9), Some(0.3), None)),
            Measure::Absent
        );
    }

    #[test]
    fn scores_a_selection_of_references_in_order() {
        let points = [
            crate::test_support::uniform_point("A", 0.0, 0.0, 0.2),
            crate::test_support::uniform_point("B", 0.0, 0.0, 0.7),
        ];
        let selection: Vec<&PointRecord> = points.iter().rev().collect();
        let scored = compute_composite(&WeightVector::default(), selection.iter().copied());
        let names: Vec<&str> = scored.iter().map(|s| s.point.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
        assert_eq!(scored[0].composite.value().map(|v| (v - 0.7).abs() <= TOLERANCE), Some(true));
    }

    #[test]
    fn zero_weights_score_zero_by_policy() {
        let weights = WeightVector::new(0.0, 0.0, 0.0).expect("valid weights");
        let scorer = CompositeScorer::new(&weights);
        assert_eq!(
            scorer.score(&indices(Some(0.9), Some(0.3), Some(0.6))),
            Measure::ZeroByPolicy
        );
    }
}
