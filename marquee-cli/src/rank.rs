//! Rank command implementation for the Marquee CLI.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use clap::Parser;
use marquee_core::{EventId, EventStore, FallbackHints, SqliteEventStore, UserContext, UserId};
use marquee_scorer::{RankedEvent, RecommendationScorer, ScoreWeights, SubScores, recommend};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::{
    ARG_RANK_EVENTS_DB, ARG_RANK_LIMIT, ARG_RANK_OUTPUT, ARG_RANK_REQUEST, CliError,
    ENV_RANK_EVENTS_DB, ENV_RANK_REQUEST,
};

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank the active, approved events in an events database for \
                 one visitor. The visitor is described by a JSON request \
                 holding an optional user id and the session's fallback \
                 hints. Paths can come from CLI flags, configuration files, \
                 or environment variables.",
    about = "Rank events for a visitor"
)]
#[ortho_config(prefix = "MARQUEE")]
pub(crate) struct RankArgs {
    /// Path to a JSON file containing a rank request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to the SQLite events database.
    #[arg(long = ARG_RANK_EVENTS_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) events_db: Option<Utf8PathBuf>,
    /// Keep only the best `count` events.
    #[arg(long = ARG_RANK_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Write the ranking to this file instead of standard output.
    #[arg(long = ARG_RANK_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Path to the SQLite events database.
    pub(crate) events_db: Utf8PathBuf,
    /// Maximum number of ranked events to report.
    pub(crate) limit: Option<usize>,
    /// Output file; standard output when absent.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RankConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_RANK_REQUEST)?;
        Self::require_existing(&self.events_db, ARG_RANK_EVENTS_DB)?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match marquee_fs::is_regular_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
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

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_RANK_REQUEST,
            env: ENV_RANK_REQUEST,
        })?;
        let events_db = args.events_db.ok_or(CliError::MissingArgument {
            field: ARG_RANK_EVENTS_DB,
            env: ENV_RANK_EVENTS_DB,
        })?;
        Ok(Self {
            request_path,
            events_db,
            limit: args.limit,
            output: args.output,
        })
    }
}

/// The visitor a ranking is produced for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub(crate) struct RankRequest {
    /// Authenticated user, or `null` for an anonymous visitor.
    #[serde(default)]
    pub(crate) user_id: Option<UserId>,
    /// Raw session hints.
    #[serde(default)]
    pub(crate) hints: FallbackHints,
}

/// One line of the ranking report.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct RankingEntry {
    /// Event identifier.
    pub(crate) id: EventId,
    /// Event title.
    pub(crate) title: String,
    /// Final weighted score.
    pub(crate) score: f64,
    /// Per-dimension scores.
    pub(crate) sub_scores: SubScoreReport,
}

/// Serialisable copy of [`SubScores`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub(crate) struct SubScoreReport {
    pub(crate) category: f64,
    pub(crate) budget: f64,
    pub(crate) distance: f64,
    pub(crate) popularity: f64,
    pub(crate) recency: f64,
}

impl From<SubScores> for SubScoreReport {
    fn from(scores: SubScores) -> Self {
        Self {
            category: scores.category,
            budget: scores.budget,
            distance: scores.distance,
            popularity: scores.popularity,
            recency: scores.recency,
        }
    }
}

impl From<RankedEvent> for RankingEntry {
    fn from(ranked: RankedEvent) -> Self {
        Self {
            id: ranked.event.id,
            title: ranked.event.title,
            score: ranked.score,
            sub_scores: ranked.breakdown.into(),
        }
    }
}

pub(super) fn run_rank(args: RankArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_rank_with(args, Utc::now(), &mut stdout)
}

/// Rank events at instant `now`, writing to the configured output file or,
/// when none is configured, to `stdout`.
pub(super) fn run_rank_with(
    args: RankArgs,
    now: DateTime<Utc>,
    stdout: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_rank_config(args)?;
    let ranking = execute_rank(&config, now)?;
    match &config.output {
        Some(path) => {
            let mut file =
                marquee_fs::create_file(path).map_err(|source| CliError::CreateOutput {
                    path: path.clone(),
                    source,
                })?;
            write_ranking(&mut file, &ranking)
        }
        None => write_ranking(stdout, &ranking),
    }
}

fn resolve_rank_config(args: RankArgs) -> Result<RankConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

pub(super) fn execute_rank(
    config: &RankConfig,
    now: DateTime<Utc>,
) -> Result<Vec<RankingEntry>, CliError> {
    let request = load_rank_request(&config.request_path)?;
    let store = SqliteEventStore::open(&config.events_db)?;
    rank_from_store(&store, &request, now, config.limit)
}

/// Rank the store's events for `request`, keeping at most `limit` entries.
pub(super) fn rank_from_store<S>(
    store: &S,
    request: &RankRequest,
    now: DateTime<Utc>,
    limit: Option<usize>,
) -> Result<Vec<RankingEntry>, CliError>
where
    S: EventStore + ?Sized,
{
    let scorer = RecommendationScorer::new(ScoreWeights::default(), now)?;
    let user = UserContext::from(request.user_id);
    let mut ranked = recommend(store, user, &request.hints, &scorer)?;
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    Ok(ranked.into_iter().map(RankingEntry::from).collect())
}

/// Loads a JSON-encoded [`RankRequest`] from disk.
pub(super) fn load_rank_request(path: &Utf8Path) -> Result<RankRequest, CliError> {
    let payload = marquee_fs::read_to_string(path).map_err(|source| CliError::ReadRankRequest {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&payload).map_err(|source| CliError::ParseRankRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_ranking(writer: &mut dyn Write, ranking: &[RankingEntry]) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(ranking).map_err(CliError::SerialiseRanking)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteRankOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WriteRankOutput)?;
    Ok(())
}
