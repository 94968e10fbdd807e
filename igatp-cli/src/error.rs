//! Error types emitted by the IGATP CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use igatp_core::{ReprojectError, Resolution, WeightError};
use igatp_index::{DashboardError, ParseParishSourceError, SnapshotError};
use thiserror::Error;

/// Errors emitted by the IGATP CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configured weights are negative or not finite.
    #[error("invalid weights: {0}")]
    InvalidWeights(#[from] WeightError),
    /// A cluster selection could not be parsed.
    #[error("invalid cluster selection: {0}")]
    InvalidCluster(String),
    /// The parish source could not be parsed.
    #[error(transparent)]
    InvalidParishSource(#[from] ParseParishSourceError),
    /// Opening the dataset bundle failed.
    #[error("failed to open dataset bundle at {path:?}: {source}")]
    OpenBundle {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Decoding the dataset bundle failed.
    #[error("failed to parse dataset bundle at {path:?}: {source}")]
    ParseBundle {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// A boundary layer could not be brought into the points' datum.
    #[error("failed to reproject {resolution} boundaries: {source}")]
    Reproject {
        resolution: Resolution,
        #[source]
        source: ReprojectError,
    },
    /// The bundle's layers cannot be joined with its points.
    #[error("invalid dataset bundle: {0}")]
    Snapshot(#[from] SnapshotError),
    /// Rendering the dashboard failed.
    #[error("failed to render dashboard: {0}")]
    Render(#[from] DashboardError),
    /// Serialising the dashboard view failed.
    #[error("failed to serialise dashboard view: {0}")]
    SerialiseView(#[source] serde_json::Error),
    /// Creating the output file failed.
    #[error("failed to create output file {path:?}: {source}")]
    CreateOutput {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing the dashboard view failed.
    #[error("failed to write dashboard view: {0}")]
    WriteOutput(#[source] std::io::Error),
}
