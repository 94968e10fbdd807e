//! Territorial aggregation, rankings and trends for the IGATP engine.
//!
//! The crate builds on the point model and spatial join of
//! [`igatp_core`]:
//! - **Territorial aggregation** averages composite scores per municipality
//!   or parish and rescales the means for display
//!   ([`aggregate_by_boundary`], [`join_parish_statistics`]).
//! - **Rankings** extract the highest and lowest entries with stable tie
//!   handling ([`rank`], [`rank_points`]).
//! - **Trends** bucket comment polarity by calendar month
//!   ([`monthly_trend`]).
//! - **Dashboard rendering** ties the steps together over an immutable
//!   [`DatasetSnapshot`] ([`Dashboard::render`]).
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use igatp_core::{Epsg, Resolution, test_support::{square_layer, uniform_point}};
//! use igatp_index::{Dashboard, DashboardQuery, DatasetSnapshot, SnapshotParts};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let snapshot = DatasetSnapshot::new(SnapshotParts {
//!     datum: Some(Epsg::WGS84),
//!     points: vec![uniform_point("Sé", 0.5, 0.5, 0.8)],
//!     municipalities: square_layer(Resolution::Municipality, &[("Porto", 0.0, 0.0, 1.0)]),
//!     parishes: square_layer(Resolution::Parish, &[("Sé", 0.0, 0.0, 1.0)]),
//!     parish_statistics: Vec::new(),
//!     sentiment: Vec::new(),
//! })?;
//! let view = Dashboard::new(Arc::new(snapshot)).render(&DashboardQuery::default())?;
//! assert_eq!(view.municipalities[0].count, 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod aggregate;
mod dashboard;
mod error;
mod parish;
mod ranking;
mod snapshot;
mod trend;

pub use aggregate::{TerritorialAggregate, aggregate_by_boundary, min_max_rescale};
pub use dashboard::{
    Dashboard, DashboardQuery, DashboardView, MetricRanking, PointView, RenderSummary,
};
pub use error::{DashboardError, SnapshotError};
pub use parish::{ParishSource, ParishStatistic, ParseParishSourceError, join_parish_statistics};
pub use ranking::{PointMetric, Ranked, Ranking, RankingSizes, rank, rank_points};
pub use snapshot::{DatasetSnapshot, SnapshotParts};
pub use trend::{MonthBucket, SentimentRecord, YearMonth, monthly_trend, parse_timestamp};
