//! User-supplied weights for the three sub-indices.
//!
//! A [`WeightVector`] holds the raw slider values; [`WeightVector::normalised`]
//! rescales them so they sum to one. A vector whose raw sum is zero is
//! normalised by treating the sum as one, which leaves every weight at zero
//! and makes the composite score zero by policy rather than undefined.

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::SubIndex;

const EQUAL_SHARE: f64 = 1.0 / 3.0;

/// Errors returned by [`WeightVector::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum WeightError {
    /// A weight was negative or not finite.
    #[error("{index} weight {value} must be finite and non-negative")]
    Invalid {
        /// Offending sub-index.
        index: SubIndex,
        /// Value supplied by the caller.
        value: f64,
    },
}

/// Raw, non-negative weights for rating, popularity and sentiment.
///
/// # Examples
/// ```
/// use igatp_core::WeightVector;
///
/// # fn main() -> Result<(), igatp_core::WeightError> {
/// let weights = WeightVector::new(2.0, 1.0, 1.0)?;
/// let normalised = weights.normalised();
/// assert!((normalised.rating() - 0.5).abs() < 1e-12);
/// assert!((normalised.sum() - 1.0).abs() < 1e-12);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct WeightVector {
    rating: f64,
    popularity: f64,
    sentiment: f64,
}

impl WeightVector {
    /// Validate and construct a weight vector.
    ///
    /// # Errors
    /// Returns [`WeightError::Invalid`] when a weight is negative, NaN or
    /// infinite.
    pub fn new(rating: f64, popularity: f64, sentiment: f64) -> Result<Self, WeightError> {
        validate(SubIndex::Rating, rating)?;
        validate(SubIndex::Popularity, popularity)?;
        validate(SubIndex::Sentiment, sentiment)?;
        Ok(Self {
            rating,
            popularity,
            sentiment,
        })
    }

    /// Raw weight for a sub-index.
    pub const fn get(&self, index: SubIndex) -> f64 {
        match index {
            SubIndex::Rating => self.rating,
            SubIndex::Popularity => self.popularity,
            SubIndex::Sentiment => self.sentiment,
        }
    }

    /// Sum of the raw weights.
    pub fn total(&self) -> f64 {
        self.rating + self.popularity + self.sentiment
    }

    /// Rescale the weights so they sum to one.
    ///
    /// The weights are first divided by the largest of them, so raw weights
    /// whose sum would overflow still keep their ratios. An all-zero vector
    /// is passed through unchanged and flagged as zero-sum.
    pub fn normalised(&self) -> NormalisedWeights {
        let largest = self.rating.max(self.popularity).max(self.sentiment);
        if largest == 0.0 {
            return NormalisedWeights {
                rating: self.rating,
                popularity: self.popularity,
                sentiment: self.sentiment,
                zero_sum: true,
            };
        }
        let (rating, popularity, sentiment) = (
            self.rating / largest,
            self.popularity / largest,
            self.sentiment / largest,
        );
        let total = rating + popularity + sentiment;
        NormalisedWeights {
            rating: rating / total,
            popularity: popularity / total,
            sentiment: sentiment / total,
            zero_sum: false,
        }
    }
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            rating: EQUAL_SHARE,
            popularity: EQUAL_SHARE,
            sentiment: EQUAL_SHARE,
        }
    }
}

fn validate(index: SubIndex, value: f64) -> Result<(), WeightError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(WeightError::Invalid { index, value })
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for WeightVector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default = "equal_share")]
            rating: f64,
            #[serde(default = "equal_share")]
            popularity: f64,
            #[serde(default = "equal_share")]
            sentiment: f64,
        }

        const fn equal_share() -> f64 {
            EQUAL_SHARE
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.rating, raw.popularity, raw.sentiment).map_err(serde::de::Error::custom)
    }
}

/// Weights after normalisation.
///
/// Unless every raw weight was zero, the three values sum to one within
/// floating-point tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NormalisedWeights {
    rating: f64,
    popularity: f64,
    sentiment: f64,
    zero_sum: bool,
}

impl NormalisedWeights {
    /// Normalised rating weight.
    pub const fn rating(&self) -> f64 {
        self.rating
    }

    /// Normalised popularity weight.
    pub const fn popularity(&self) -> f64 {
        self.popularity
    }

    /// Normalised sentiment weight.
    pub const fn sentiment(&self) -> f64 {
        self.sentiment
    }

    /// Normalised weight for a sub-index.
    pub const fn get(&self, index: SubIndex) -> f64 {
        match index {
            SubIndex::Rating => self.rating,
            SubIndex::Popularity => self.popularity,
            SubIndex::Sentiment => self.sentiment,
        }
    }

    /// Sum of the normalised weights.
    pub fn sum(&self) -> f64 {
        self.rating + self.popularity + self.sentiment
    }

    /// Report whether the zero-sum fallback applied.
    pub const fn is_zero_sum(&self) -> bool {
        self.zero_sum
    }
}
