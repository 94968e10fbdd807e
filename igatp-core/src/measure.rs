//! Three-valued numeric fields.
//!
//! Scores and aggregates are either computed from data, missing because an
//! input was missing, or set to zero by an explicit fallback policy. Keeping
//! the last two apart lets callers tell "no data" from "zero on purpose"
//! without sentinel values.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A numeric value that may be absent or zero by policy.
///
/// # Examples
/// ```
/// use igatp_core::Measure;
///
/// assert_eq!(Measure::Present(0.4).value(), Some(0.4));
/// assert_eq!(Measure::ZeroByPolicy.value(), Some(0.0));
/// assert_eq!(Measure::Absent.value(), None);
/// assert!(!Measure::ZeroByPolicy.is_present());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "value", rename_all = "snake_case"))]
pub enum Measure {
    /// A value computed from data.
    Present(f64),
    /// The value could not be computed because an input was missing.
    #[default]
    Absent,
    /// The value is zero because a documented fallback applied.
    ZeroByPolicy,
}

impl Measure {
    /// Wrap an optional value, treating non-finite values as absent.
    pub fn from_option(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Self::Present(v),
            _ => Self::Absent,
        }
    }

    /// Numeric reading of the measure; `ZeroByPolicy` reads as `0.0`.
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Present(v) => Some(*v),
            Self::ZeroByPolicy => Some(0.0),
            Self::Absent => None,
        }
    }

    /// Report whether the value was computed from data.
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Report whether the value is missing.
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl From<Option<f64>> for Measure {
    fn from(value: Option<f64>) -> Self {
        Self::from_option(value)
    }
}
