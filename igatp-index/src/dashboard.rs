//! Full dashboard recomputation for one query.
//!
//! A [`Dashboard`] wraps a shared [`DatasetSnapshot`]. Every call to
//! [`Dashboard::render`] recomputes scores, joins, aggregates, rankings and
//! the sentiment trend from scratch; nothing is cached between renders.

use std::sync::Arc;

use geo::Coord;
use igatp_core::{
    Attribution, BoundaryKey, ClusterProfile, ContainmentResolver, Measure, NormalisedWeights,
    PointFilter, Resolution, ScoredPoint, SubIndices, Topic, WeightVector, compute_composite,
};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    DashboardError, DatasetSnapshot, MonthBucket, ParishSource, PointMetric, Ranking,
    RankingSizes, TerritorialAggregate, aggregate_by_boundary, join_parish_statistics,
    monthly_trend, rank, rank_points,
};

/// User selections driving one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardQuery {
    /// Raw sub-index weights.
    pub weights: WeightVector,
    /// Thematic group and profile selection.
    pub filter: PointFilter,
    /// Ranking lengths.
    pub ranking: RankingSizes,
    /// Keep only points inside some municipality.
    pub clip_to_study_area: bool,
    /// Source of the parish aggregates.
    pub parish_source: ParishSource,
}

impl Default for DashboardQuery {
    fn default() -> Self {
        Self {
            weights: WeightVector::default(),
            filter: PointFilter::default(),
            ranking: RankingSizes::default(),
            clip_to_study_area: true,
            parish_source: ParishSource::default(),
        }
    }
}

/// A scored point as presented by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointView {
    /// Location name.
    pub name: String,
    /// Source category.
    pub category: String,
    /// Thematic group.
    pub thematic_group: String,
    /// Tourist profile.
    pub cluster: ClusterProfile,
    /// Human-readable tourist profile.
    pub cluster_label: String,
    /// Dominant review topic.
    pub dominant_topic: Option<Topic>,
    /// City reported by the source.
    pub city: Option<String>,
    /// Number of similar locations nearby.
    pub similar_nearby: Option<u32>,
    /// Geographic position.
    pub position: Coord<f64>,
    /// Normalised sub-indices.
    pub sub_indices: SubIndices,
    /// Composite score.
    pub composite: Measure,
    /// Enclosing municipality.
    pub municipality: Option<BoundaryKey>,
    /// Enclosing parish.
    pub parish: Option<BoundaryKey>,
}

/// Ranking of locations by one point metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRanking {
    /// Metric the locations are ranked by.
    pub metric: PointMetric,
    /// Ranked location names.
    pub ranking: Ranking<String>,
}

/// Point counts at each pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RenderSummary {
    /// Points in the snapshot.
    pub total: usize,
    /// Points passing the filter.
    pub selected: usize,
    /// Selected points with a composite score.
    pub scored: usize,
    /// Scored points inside the study area.
    pub in_study_area: usize,
}

/// Everything the dashboard displays for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Weights after normalisation.
    pub weights: NormalisedWeights,
    /// Scored points with their boundary attribution.
    pub points: Vec<PointView>,
    /// Municipality aggregates in layer order.
    pub municipalities: Vec<TerritorialAggregate>,
    /// Parish aggregates in layer order.
    pub parishes: Vec<TerritorialAggregate>,
    /// Point rankings, one per metric.
    pub point_rankings: Vec<MetricRanking>,
    /// Municipalities ranked by mean composite score.
    pub municipality_ranking: Ranking<String>,
    /// Parishes ranked by mean composite score.
    pub parish_ranking: Ranking<String>,
    /// Monthly mean polarity.
    pub trend: Vec<MonthBucket>,
    /// Pipeline counts.
    pub summary: RenderSummary,
}

/// Renders dashboard views over a shared snapshot.
#[derive(Debug, Clone)]
pub struct Dashboard {
    snapshot: Arc<DatasetSnapshot>,
}

impl Dashboard {
    /// Wrap a snapshot.
    #[must_use]
    pub const fn new(snapshot: Arc<DatasetSnapshot>) -> Self {
        Self { snapshot }
    }

    /// The snapshot every render reads from.
    #[must_use]
    pub fn snapshot(&self) -> &DatasetSnapshot {
        &self.snapshot
    }

    /// Recompute the dashboard for `query`.
    ///
    /// Rendering the same query twice on the same snapshot yields equal
    /// views.
    ///
    /// # Errors
    /// Returns [`DashboardError::SpatialJoin`] when a boundary layer cannot
    /// be joined with the points.
    pub fn render(&self, query: &DashboardQuery) -> Result<DashboardView, DashboardError> {
        let snapshot = &*self.snapshot;
        let datum = Some(snapshot.datum());
        let selected = query.filter.apply(snapshot.points());
        let mut scored_all = compute_composite(&query.weights, selected.iter().copied());
        scored_all.retain(|scored| !scored.composite.is_absent());

        let municipality_resolver = ContainmentResolver::new(snapshot.municipalities())?;
        let attribution =
            municipality_resolver.attribute(scored_all.iter().map(|s| s.point), datum)?;
        let (scored, municipality_keys): (Vec<ScoredPoint<'_>>, Vec<Option<BoundaryKey>>) =
            scored_all
                .iter()
                .zip(attribution.iter())
                .filter(|(_, key)| !query.clip_to_study_area || key.is_some())
                .map(|(scored, key)| (*scored, key.cloned()))
                .unzip();
        let municipalities_attr = Attribution::new(Resolution::Municipality, municipality_keys);

        let parish_resolver = ContainmentResolver::new(snapshot.parishes())?;
        let parishes_attr = parish_resolver.attribute(scored.iter().map(|s| s.point), datum)?;

        let municipalities =
            aggregate_by_boundary(&scored, &municipalities_attr, snapshot.municipalities());
        let parishes = match query.parish_source {
            ParishSource::Live => {
                aggregate_by_boundary(&scored, &parishes_attr, snapshot.parishes())
            }
            ParishSource::Precomputed => {
                join_parish_statistics(snapshot.parishes(), snapshot.parish_statistics())
            }
        };

        let point_rankings = PointMetric::ALL
            .iter()
            .map(|&metric| MetricRanking {
                metric,
                ranking: rank_points(&scored, metric, query.ranking.points),
            })
            .collect();
        let municipality_ranking = territorial_ranking(&municipalities, query.ranking);
        let parish_ranking = territorial_ranking(&parishes, query.ranking);

        let points = scored
            .iter()
            .zip(municipalities_attr.iter().zip(parishes_attr.iter()))
            .map(|(scored_point, (municipality, parish))| {
                point_view(scored_point, municipality, parish)
            })
            .collect();

        let summary = RenderSummary {
            total: snapshot.points().len(),
            selected: selected.len(),
            scored: scored_all.len(),
            in_study_area: municipalities_attr.attributed_count(),
        };
        debug!(
            "Rendered dashboard: {} of {} points selected, {} scored, {} in study area",
            summary.selected, summary.total, summary.scored, summary.in_study_area
        );

        Ok(DashboardView {
            weights: query.weights.normalised(),
            points,
            municipalities,
            parishes,
            point_rankings,
            municipality_ranking,
            parish_ranking,
            trend: monthly_trend(snapshot.sentiment()),
            summary,
        })
    }
}

fn territorial_ranking(aggregates: &[TerritorialAggregate], sizes: RankingSizes) -> Ranking<String> {
    rank(
        aggregates
            .iter()
            .map(|aggregate| (aggregate.label.clone(), aggregate.mean)),
        sizes.territories,
    )
}

fn point_view(
    scored: &ScoredPoint<'_>,
    municipality: Option<&BoundaryKey>,
    parish: Option<&BoundaryKey>,
) -> PointView {
    let point = scored.point;
    PointView {
        name: point.name.clone(),
        category: point.category.clone(),
        thematic_group: point.thematic_group.clone(),
        cluster: point.cluster,
        cluster_label: point.cluster.to_string(),
        dominant_topic: point.dominant_topic,
        city: point.city.clone(),
        similar_nearby: point.similar_nearby,
        position: point.position,
        sub_indices: point.sub_indices,
        composite: scored.composite,
        municipality: municipality.cloned(),
        parish: parish.cloned(),
    }
}
