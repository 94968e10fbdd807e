//! Core domain types for the IGATP engine.
//!
//! The crate models touristic points, administrative boundaries and the
//! user-supplied weight vector, and provides the two pure building blocks the
//! rest of the engine leans on:
//!
//! - the composite score calculator ([`compute_composite`]), which blends the
//!   rating, popularity and sentiment sub-indices of every point;
//! - the spatial join resolver ([`ContainmentResolver`]), which attributes
//!   points to the boundary that encloses them.
//!
//! Constructors validate their input and return `Result` so malformed rows
//! are rejected at the edge rather than deep inside an aggregation.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod boundary;
pub mod cluster;
pub mod datum;
pub mod filter;
pub mod measure;
pub mod point;
pub mod score;
pub mod source;
pub mod spatial;
pub mod topic;
pub mod weights;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use boundary::{Boundary, BoundaryKey, BoundaryLayer, Resolution};
pub use cluster::ClusterProfile;
pub use datum::{Epsg, IdentityReprojection, Reproject, ReprojectError};
pub use filter::PointFilter;
pub use measure::Measure;
pub use point::{PointRecord, SubIndex, SubIndexError, SubIndices};
pub use score::{CompositeScorer, ScoredPoint, compute_composite};
pub use source::{IndexRow, MergeReport, TopicRow, merge_sources};
pub use spatial::{Attribution, ContainmentResolver, SpatialJoinError, spatial_attribute};
pub use topic::Topic;
pub use weights::{NormalisedWeights, WeightError, WeightVector};
