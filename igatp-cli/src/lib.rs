//! Command-line interface for rendering IGATP dashboard reports.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod report;

pub use error::CliError;

use report::ReportArgs;

pub(crate) const ARG_REPORT_BUNDLE: &str = "bundle";
pub(crate) const ARG_RATING_WEIGHT: &str = "rating-weight";
pub(crate) const ARG_POPULARITY_WEIGHT: &str = "popularity-weight";
pub(crate) const ARG_SENTIMENT_WEIGHT: &str = "sentiment-weight";
pub(crate) const ARG_GROUPS: &str = "groups";
pub(crate) const ARG_CLUSTERS: &str = "clusters";
pub(crate) const ARG_TOP_POINTS: &str = "top-points";
pub(crate) const ARG_TOP_TERRITORIES: &str = "top-territories";
pub(crate) const ARG_PARISH_SOURCE: &str = "parish-source";
pub(crate) const ARG_NO_CLIP: &str = "no-clip";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ENV_REPORT_BUNDLE: &str = "IGATP_CMDS_REPORT_BUNDLE_PATH";

/// Run the IGATP CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Report(args) => report::run_report(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "igatp",
    about = "Composite tourism attractiveness reports over municipalities and parishes",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render the dashboard view for a prepared dataset bundle.
    Report(ReportArgs),
}

#[cfg(test)]
mod tests;
