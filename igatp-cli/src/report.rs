//! Report command implementation for the IGATP CLI.

use std::io::{BufReader, Write};
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use igatp_core::{
    BoundaryLayer, ClusterProfile, Epsg, IdentityReprojection, IndexRow, PointFilter, SubIndex,
    TopicRow, WeightVector, merge_sources,
};
use igatp_fs::{create_utf8_file, open_utf8_file};
use igatp_index::{
    Dashboard, DashboardQuery, DashboardView, DatasetSnapshot, ParishSource, ParishStatistic,
    RankingSizes, SentimentRecord, SnapshotParts,
};
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_CLUSTERS, ARG_GROUPS, ARG_NO_CLIP, ARG_OUTPUT, ARG_PARISH_SOURCE, ARG_POPULARITY_WEIGHT,
    ARG_RATING_WEIGHT, ARG_REPORT_BUNDLE, ARG_SENTIMENT_WEIGHT, ARG_TOP_POINTS,
    ARG_TOP_TERRITORIES, CliError, ENV_REPORT_BUNDLE,
};

/// CLI arguments for the `report` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "report",
    long_about = "Render the dashboard view for a prepared dataset bundle. \
                 Weights, filters and ranking sizes can come from CLI flags, \
                 configuration files, or environment variables. The view is \
                 written as pretty-printed JSON.",
    about = "Render the dashboard view for a dataset bundle"
)]
#[ortho_config(prefix = "IGATP")]
pub(crate) struct ReportArgs {
    /// Path to a JSON dataset bundle.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) bundle_path: Option<Utf8PathBuf>,
    /// Raw weight of the rating sub-index.
    #[arg(long = ARG_RATING_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) rating_weight: Option<f64>,
    /// Raw weight of the popularity sub-index.
    #[arg(long = ARG_POPULARITY_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) popularity_weight: Option<f64>,
    /// Raw weight of the sentiment sub-index.
    #[arg(long = ARG_SENTIMENT_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) sentiment_weight: Option<f64>,
    /// Thematic groups to keep (comma separated).
    #[arg(long = ARG_GROUPS, value_name = "group", value_delimiter = ',')]
    #[serde(default)]
    pub(crate) groups: Option<Vec<String>>,
    /// Tourist profiles to keep, by name or cluster id (comma separated).
    #[arg(long = ARG_CLUSTERS, value_name = "profile", value_delimiter = ',')]
    #[serde(default)]
    pub(crate) clusters: Option<Vec<String>>,
    /// Number of locations per point ranking.
    #[arg(long = ARG_TOP_POINTS, value_name = "n")]
    #[serde(default)]
    pub(crate) top_points: Option<usize>,
    /// Number of territories per territorial ranking.
    #[arg(long = ARG_TOP_TERRITORIES, value_name = "n")]
    #[serde(default)]
    pub(crate) top_territories: Option<usize>,
    /// Parish aggregates to show: `live` or `precomputed`.
    #[arg(long = ARG_PARISH_SOURCE, value_name = "source")]
    #[serde(default)]
    pub(crate) parish_source: Option<String>,
    /// Keep points that fall outside every municipality.
    #[arg(long = ARG_NO_CLIP)]
    #[serde(default)]
    pub(crate) no_clip: bool,
    /// Write the view to this file instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl ReportArgs {
    pub(crate) fn into_config(self) -> Result<ReportConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ReportConfig::try_from(merged)
    }
}

/// Resolved `report` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ReportConfig {
    /// Path to the JSON dataset bundle.
    pub(crate) bundle_path: Utf8PathBuf,
    /// Dashboard selections.
    pub(crate) query: DashboardQuery,
    /// Optional output file; stdout when absent.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl ReportConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.bundle_path, ARG_REPORT_BUNDLE)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match igatp_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) if path.exists() => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Ok(false) => Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<ReportArgs> for ReportConfig {
    type Error = CliError;

    fn try_from(args: ReportArgs) -> Result<Self, Self::Error> {
        let bundle_path = args.bundle_path.ok_or(CliError::MissingArgument {
            field: ARG_REPORT_BUNDLE,
            env: ENV_REPORT_BUNDLE,
        })?;

        let defaults = WeightVector::default();
        let weights = WeightVector::new(
            args.rating_weight
                .unwrap_or_else(|| defaults.get(SubIndex::Rating)),
            args.popularity_weight
                .unwrap_or_else(|| defaults.get(SubIndex::Popularity)),
            args.sentiment_weight
                .unwrap_or_else(|| defaults.get(SubIndex::Sentiment)),
        )?;

        let mut filter = PointFilter::default();
        if let Some(groups) = args.groups {
            filter = filter.with_groups(groups);
        }
        if let Some(raw_clusters) = args.clusters {
            let clusters = raw_clusters
                .iter()
                .map(|raw| raw.parse::<ClusterProfile>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(CliError::InvalidCluster)?;
            filter = filter.with_clusters(clusters);
        }

        let sizes = RankingSizes::default();
        let ranking = RankingSizes {
            territories: args.top_territories.unwrap_or(sizes.territories),
            points: args.top_points.unwrap_or(sizes.points),
        };
        let parish_source = args
            .parish_source
            .as_deref()
            .map(str::parse::<ParishSource>)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            bundle_path,
            query: DashboardQuery {
                weights,
                filter,
                ranking,
                clip_to_study_area: !args.no_clip,
                parish_source,
            },
            output: args.output,
        })
    }
}

/// A prepared dataset: tabular sources plus both boundary layers.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ReportBundle {
    /// Datum of the point coordinates.
    #[serde(default)]
    pub(crate) datum: Option<Epsg>,
    /// Composite index table.
    #[serde(default)]
    pub(crate) index_rows: Vec<IndexRow>,
    /// Dominant topic table.
    #[serde(default)]
    pub(crate) topic_rows: Vec<TopicRow>,
    /// Municipality boundaries.
    pub(crate) municipalities: BoundaryLayer,
    /// Parish boundaries.
    pub(crate) parishes: BoundaryLayer,
    /// Pre-aggregated parish table.
    #[serde(default)]
    pub(crate) parish_statistics: Vec<ParishStatistic>,
    /// Dated comment polarities.
    #[serde(default)]
    pub(crate) sentiment: Vec<SentimentRecord>,
}

impl ReportBundle {
    /// Merge the tabular sources and validate the layers into a snapshot.
    pub(crate) fn into_snapshot(self) -> Result<DatasetSnapshot, CliError> {
        let merged = merge_sources(&self.index_rows, &self.topic_rows);
        info!(
            "Merged {} of {} index rows into points",
            merged.points.len(),
            self.index_rows.len()
        );
        if merged.invalid_sub_indices > 0 {
            warn!(
                "Dropped {} index rows with sub-indices outside [0, 1]",
                merged.invalid_sub_indices
            );
        }

        let municipalities = align_layer(self.municipalities, self.datum)?;
        let parishes = align_layer(self.parishes, self.datum)?;
        let snapshot = DatasetSnapshot::new(SnapshotParts {
            datum: self.datum,
            points: merged.points,
            municipalities,
            parishes,
            parish_statistics: self.parish_statistics,
            sentiment: self.sentiment,
        })?;
        Ok(snapshot)
    }
}

/// Bring `layer` into the points' datum when both datums are declared.
fn align_layer(layer: BoundaryLayer, datum: Option<Epsg>) -> Result<BoundaryLayer, CliError> {
    match (layer.datum, datum) {
        (Some(source), Some(target)) if source != target => {
            let resolution = layer.resolution;
            layer
                .reprojected(target, &IdentityReprojection)
                .map_err(|source| CliError::Reproject { resolution, source })
        }
        _ => Ok(layer),
    }
}

pub(super) fn run_report(args: ReportArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_report_with(args, &mut stdout)
}

/// Render the report, writing to the configured output file or `stdout`.
pub(super) fn run_report_with(args: ReportArgs, stdout: &mut dyn Write) -> Result<(), CliError> {
    let (config, view) = execute_report(args)?;
    match &config.output {
        Some(path) => {
            let mut file = create_utf8_file(path).map_err(|source| CliError::CreateOutput {
                path: path.clone(),
                source,
            })?;
            write_view(&mut file, &view)
        }
        None => write_view(stdout, &view),
    }
}

fn execute_report(args: ReportArgs) -> Result<(ReportConfig, DashboardView), CliError> {
    let config = resolve_report_config(args)?;
    let view = render_report(&config)?;
    Ok((config, view))
}

fn resolve_report_config(args: ReportArgs) -> Result<ReportConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

pub(super) fn render_report(config: &ReportConfig) -> Result<DashboardView, CliError> {
    let snapshot = load_bundle(&config.bundle_path)?.into_snapshot()?;
    let dashboard = Dashboard::new(Arc::new(snapshot));
    Ok(dashboard.render(&config.query)?)
}

/// Loads a JSON-encoded [`ReportBundle`] from disk.
pub(super) fn load_bundle(path: &Utf8Path) -> Result<ReportBundle, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenBundle {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseBundle {
        path: path.to_path_buf(),
        source,
    })
}

pub(super) fn write_view(writer: &mut dyn Write, view: &DashboardView) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(view).map_err(CliError::SerialiseView)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ReportConfig, CliError> {
    let merged = ReportArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ReportConfig::try_from(merged)
}
