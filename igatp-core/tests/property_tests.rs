//! Property-based tests for weight normalisation and composite scoring.
//!
//! # Invariants tested
//!
//! - **Normalisation:** non-zero weight triples normalise to a sum of one.
//! - **Zero-sum fallback:** the all-zero triple scores as zero by policy.
//! - **Convexity:** a complete composite lies between the smallest and the
//!   largest of its sub-indices.

use igatp_core::{CompositeScorer, Measure, SubIndices, WeightVector};
use proptest::prelude::*;

fn weight() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), 0.0_f64..=100.0, 0.0_f64..=f64::MAX]
}

fn unit() -> impl Strategy<Value = f64> {
    0.0_f64..=1.0
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: non-zero weight triples normalise to a convex combination.
    #[test]
    fn normalised_weights_sum_to_one(
        rating in weight(),
        popularity in weight(),
        sentiment in weight(),
    ) {
        let weights = WeightVector::new(rating, popularity, sentiment)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let normalised = weights.normalised();
        if rating + popularity + sentiment > 0.0 {
            prop_assert!((normalised.sum() - 1.0).abs() < 1e-9);
            prop_assert!(!normalised.is_zero_sum());
        } else {
            prop_assert!(normalised.is_zero_sum());
        }
    }

    /// Property: the composite is bounded by the extreme sub-indices.
    #[test]
    fn composite_lies_between_sub_index_extremes(
        weights in (weight(), weight(), weight()),
        indices in (unit(), unit(), unit()),
    ) {
        let (rating, popularity, sentiment) = weights;
        prop_assume!(rating + popularity + sentiment > 0.0);
        let vector = WeightVector::new(rating, popularity, sentiment)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let sub_indices = SubIndices::new(Some(indices.0), Some(indices.1), Some(indices.2))
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let lower = indices.0.min(indices.1).min(indices.2);
        let upper = indices.0.max(indices.1).max(indices.2);

        match CompositeScorer::new(&vector).score(&sub_indices) {
            Measure::Present(score) => {
                prop_assert!(score >= lower - 1e-9, "{score} below {lower}");
                prop_assert!(score <= upper + 1e-9, "{score} above {upper}");
            }
            other => prop_assert!(false, "expected a present score, got {other:?}"),
        }
    }

    /// Property: zero weights never panic and always score zero by policy.
    #[test]
    fn zero_weights_score_zero_by_policy(indices in (unit(), unit(), unit())) {
        let sub_indices = SubIndices::new(Some(indices.0), Some(indices.1), Some(indices.2))
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let vector = WeightVector::new(0.0, 0.0, 0.0)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        prop_assert_eq!(CompositeScorer::new(&vector).score(&sub_indices), Measure::ZeroByPolicy);
    }
}
