//! Facade crate for the IGATP composite index engine.
//!
//! This crate re-exports the point model, composite scorer and spatial join
//! from `igatp-core` together with the aggregation, ranking, trend and
//! dashboard layer from `igatp-index`.

#![forbid(unsafe_code)]

pub use igatp_core::{
    Attribution, Boundary, BoundaryKey, BoundaryLayer, ClusterProfile, CompositeScorer,
    ContainmentResolver, Epsg, IdentityReprojection, IndexRow, Measure, MergeReport,
    NormalisedWeights, PointFilter, PointRecord, Reproject, ReprojectError, Resolution,
    ScoredPoint, SpatialJoinError, SubIndex, SubIndexError, SubIndices, Topic, TopicRow,
    WeightError, WeightVector, compute_composite, merge_sources, spatial_attribute,
};

pub use igatp_index::{
    Dashboard, DashboardError, DashboardQuery, DashboardView, DatasetSnapshot, MetricRanking,
    MonthBucket, ParishSource, ParishStatistic, PointMetric, PointView, Ranked, Ranking,
    RankingSizes, RenderSummary, SentimentRecord, SnapshotError, SnapshotParts,
    TerritorialAggregate, YearMonth, aggregate_by_boundary, join_parish_statistics,
    min_max_rescale, monthly_trend, rank, rank_points,
};

#[cfg(feature = "test-support")]
pub use igatp_core::test_support;
