//! Focused unit tests covering report CLI configuration and bundle loading.

use super::helpers::{bundle_json, temp_root, write_bundle, write_utf8};
use super::*;
use crate::report::{
    ReportConfig, config_from_layers_for_test, load_bundle, render_report, run_report_with,
};
use camino::Utf8Path;
use igatp_core::{ClusterProfile, Epsg, PointFilter, Resolution, SubIndex, WeightVector};
use igatp_index::{DashboardQuery, ParishSource, RankingSizes, SnapshotError};
use rstest::rstest;
use serde_json::json;

fn args_for(bundle: &Utf8Path) -> ReportArgs {
    ReportArgs {
        bundle_path: Some(bundle.to_path_buf()),
        ..ReportArgs::default()
    }
}

fn config_for(bundle: &Utf8Path, query: DashboardQuery) -> ReportConfig {
    ReportConfig {
        bundle_path: bundle.to_path_buf(),
        query,
        output: None,
    }
}

#[rstest]
fn converting_report_without_bundle_errors() {
    let err = ReportConfig::try_from(ReportArgs::default()).expect_err("missing bundle");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_REPORT_BUNDLE);
            assert_eq!(env, ENV_REPORT_BUNDLE);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn report_config_defaults_to_equal_weights_and_clipping() {
    let config = ReportConfig::try_from(args_for(Utf8Path::new("bundle.json"))).expect("config");
    assert_eq!(config.query, DashboardQuery::default());
    assert_eq!(config.output, None);
}

#[rstest]
fn report_flags_build_the_query() {
    let args = ReportArgs {
        rating_weight: Some(2.0),
        popularity_weight: Some(0.0),
        sentiment_weight: Some(1.0),
        groups: Some(vec!["Culture".to_owned()]),
        clusters: Some(vec!["flagship_venues".to_owned(), "0".to_owned()]),
        top_points: Some(2),
        top_territories: Some(1),
        parish_source: Some(" Precomputed ".to_owned()),
        no_clip: true,
        output: Some("out/view.json".into()),
        ..args_for(Utf8Path::new("bundle.json"))
    };

    let config = ReportConfig::try_from(args).expect("config");
    let expected_filter = PointFilter::default()
        .with_groups(["Culture"])
        .with_clusters([ClusterProfile::FlagshipVenues, ClusterProfile::BoutiqueNiche]);
    assert_eq!(
        config.query,
        DashboardQuery {
            weights: WeightVector::new(2.0, 0.0, 1.0).expect("weights"),
            filter: expected_filter,
            ranking: RankingSizes {
                territories: 1,
                points: 2,
            },
            clip_to_study_area: false,
            parish_source: ParishSource::Precomputed,
        }
    );
    assert_eq!(config.output, Some("out/view.json".into()));
}

#[rstest]
#[case::negative_weight(ReportArgs { rating_weight: Some(-1.0), ..ReportArgs::default() })]
#[case::unknown_cluster(ReportArgs { clusters: Some(vec!["tourists".to_owned()]), ..ReportArgs::default() })]
#[case::unknown_parish_source(ReportArgs { parish_source: Some("cached".to_owned()), ..ReportArgs::default() })]
fn invalid_selections_are_rejected(#[case] overrides: ReportArgs) {
    let args = ReportArgs {
        bundle_path: Some("bundle.json".into()),
        ..overrides
    };
    let err = ReportConfig::try_from(args).expect_err("selection should be rejected");
    assert!(
        matches!(
            err,
            CliError::InvalidWeights(_)
                | CliError::InvalidCluster(_)
                | CliError::InvalidParishSource(_)
        ),
        "unexpected error {err:?}"
    );
}

#[rstest]
fn validate_sources_reports_missing_bundle() {
    let (_tmp, root) = temp_root();
    let config = config_for(&root.join("missing.json"), DashboardQuery::default());

    let err = config.validate_sources().expect_err("missing bundle");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_REPORT_BUNDLE),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_not_file() {
    let (_tmp, root) = temp_root();
    let bundle_path = root.join("bundle.json");
    std::fs::create_dir(&bundle_path).expect("bundle directory");
    let config = config_for(&bundle_path, DashboardQuery::default());

    let err = config.validate_sources().expect_err("directory should fail");
    match err {
        CliError::SourcePathNotFile { field, path } => {
            assert_eq!(field, ARG_REPORT_BUNDLE);
            assert_eq!(path, bundle_path);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn load_bundle_rejects_invalid_json() {
    let (_tmp, root) = temp_root();
    let bundle_path = root.join("bundle.json");
    write_utf8(&bundle_path, b"{ not valid json");

    let err = load_bundle(&bundle_path).expect_err("invalid json should error");
    match err {
        CliError::ParseBundle { path, .. } => assert_eq!(path, bundle_path),
        other => panic!("expected ParseBundle, found {other:?}"),
    }
}

#[rstest]
fn load_bundle_io_error_returns_open_error() {
    let (_tmp, root) = temp_root();
    let bundle_path = root.join("bundle.json");

    let err = load_bundle(&bundle_path).expect_err("missing bundle should error");
    match err {
        CliError::OpenBundle { path, .. } => assert_eq!(path, bundle_path),
        other => panic!("expected OpenBundle, found {other:?}"),
    }
}

#[rstest]
fn bundle_renders_aggregates_and_trend() {
    let (_tmp, root) = temp_root();
    let bundle_path = write_bundle(&root, &bundle_json());

    let view = render_report(&config_for(&bundle_path, DashboardQuery::default()))
        .expect("bundle should render");

    assert_eq!(view.summary.total, 3);
    assert_eq!(view.summary.in_study_area, 3);
    let labels: Vec<&str> = view
        .municipalities
        .iter()
        .map(|aggregate| aggregate.label.as_str())
        .collect();
    assert_eq!(labels, ["Porto", "Matosinhos"]);
    assert_eq!(view.municipalities[0].count, 2);
    assert_eq!(view.parishes[1].key.as_str(), "130801");
    assert_eq!(view.trend.len(), 1);
    assert_eq!(view.trend[0].count, 2);
    let se = view
        .points
        .iter()
        .find(|point| point.name == "Sé")
        .expect("Sé should be rendered");
    assert!(se.dominant_topic.is_some());
}

#[rstest]
fn group_filter_narrows_rendered_points() {
    let (_tmp, root) = temp_root();
    let bundle_path = write_bundle(&root, &bundle_json());
    let query = DashboardQuery {
        filter: PointFilter::default().with_groups(["Culture"]),
        ..DashboardQuery::default()
    };

    let view = render_report(&config_for(&bundle_path, query)).expect("render");
    let names: Vec<&str> = view.points.iter().map(|point| point.name.as_str()).collect();
    assert_eq!(names, ["Sé", "Foz"]);
}

#[rstest]
fn layer_in_another_datum_fails_reprojection() {
    let (_tmp, root) = temp_root();
    let mut bundle = bundle_json();
    bundle["parishes"]["datum"] = json!(Epsg::PT_TM06);
    let bundle_path = write_bundle(&root, &bundle);

    let err = render_report(&config_for(&bundle_path, DashboardQuery::default()))
        .expect_err("identity reprojection cannot change datum");
    match err {
        CliError::Reproject { resolution, .. } => assert_eq!(resolution, Resolution::Parish),
        other => panic!("expected Reproject, found {other:?}"),
    }
}

#[rstest]
fn bundle_without_point_datum_is_rejected() {
    let (_tmp, root) = temp_root();
    let mut bundle = bundle_json();
    bundle["datum"] = serde_json::Value::Null;
    let bundle_path = write_bundle(&root, &bundle);

    let err = render_report(&config_for(&bundle_path, DashboardQuery::default()))
        .expect_err("points need a datum");
    match err {
        CliError::Snapshot(SnapshotError::MissingPointDatum) => {}
        other => panic!("expected MissingPointDatum, found {other:?}"),
    }
}

#[rstest]
fn run_report_writes_nested_output_file() {
    let (_tmp, root) = temp_root();
    let bundle_path = write_bundle(&root, &bundle_json());
    let output = root.join("reports/2024/view.json");
    let args = ReportArgs {
        output: Some(output.clone()),
        ..args_for(&bundle_path)
    };

    let mut stdout = Vec::new();
    run_report_with(args, &mut stdout).expect("report should succeed");

    assert!(stdout.is_empty());
    let written = std::fs::read_to_string(&output).expect("output file");
    let view: serde_json::Value = serde_json::from_str(&written).expect("JSON view");
    assert_eq!(view["summary"]["total"], json!(3));
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "top_points": "many" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "bundle_path": "from-file.json",
            "rating_weight": 5.0,
            "top_points": 7,
        }),
        None,
    );
    composer.push_environment(json!({
        "bundle_path": "from-env.json",
        "rating_weight": 3.0,
    }));
    composer.push_cli(json!({ "rating_weight": 1.0 }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.bundle_path, "from-env.json");
    let defaults = WeightVector::default();
    assert_eq!(config.query.weights.get(SubIndex::Rating), 1.0);
    assert_eq!(
        config.query.weights.get(SubIndex::Popularity),
        defaults.get(SubIndex::Popularity)
    );
    assert_eq!(config.query.ranking.points, 7);
}
