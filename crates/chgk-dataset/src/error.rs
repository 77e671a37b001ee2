//! Error types for the dataset pipeline

use std::{io, path::PathBuf};

use crate::TournamentId;

/// Fatal structural failure while building a dataset.
///
/// Recoverable conditions (a mask whose length disagrees with the question
/// count, a team with no usable rows) are filtered in place and never surface
/// here.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum DatasetError {
    #[display("malformed result record in tournament {tournament_id}: {source}")]
    MalformedRecord {
        tournament_id: TournamentId,
        source: serde_json::Error,
    },
    #[display("no results for tournament {tournament_id}")]
    MissingResults { tournament_id: TournamentId },
    #[display("no metadata for tournament {tournament_id}")]
    UnknownTournament { tournament_id: TournamentId },
    #[display("question ids of tournament {tournament_id} do not fit in 64 bits")]
    QuestionIdOverflow { tournament_id: TournamentId },
    #[display("row batch has {found} columns, expected {expected}")]
    ShapeMismatch { expected: usize, found: usize },
    #[display("feature matrix has {rows} rows but {labels} labels")]
    LabelCountMismatch { rows: usize, labels: usize },
}

/// Failure while reading pipeline inputs or configuration.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("failed to open {kind} file {}: {source}", path.display())]
    Open {
        kind: &'static str,
        path: PathBuf,
        source: io::Error,
    },
    #[display("failed to parse {kind} JSON from {origin}: {source}")]
    Parse {
        kind: &'static str,
        origin: String,
        source: serde_json::Error,
    },
}
