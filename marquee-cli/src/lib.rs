//! Command-line interface for ranking Marquee events.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod rank;

pub use error::CliError;

use rank::{RankArgs, run_rank};

pub(crate) const ARG_RANK_REQUEST: &str = "request";
pub(crate) const ARG_RANK_EVENTS_DB: &str = "events-db";
pub(crate) const ARG_RANK_LIMIT: &str = "limit";
pub(crate) const ARG_RANK_OUTPUT: &str = "output";
pub(crate) const ENV_RANK_REQUEST: &str = "MARQUEE_CMDS_RANK_REQUEST_PATH";
pub(crate) const ENV_RANK_EVENTS_DB: &str = "MARQUEE_CMDS_RANK_EVENTS_DB";

/// Run the Marquee CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration layering,
/// input loading, ranking or output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Rank(args) => run_rank(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "marquee",
    about = "Event recommendation utilities for the Marquee engine",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank upcoming events for a visitor.
    Rank(RankArgs),
}

#[cfg(test)]
mod tests;
