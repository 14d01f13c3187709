//! Shared error types for the services crate.

use thiserror::Error;

use game_core::model::CandidateId;
use storage::repository::StorageError;

/// Errors emitted by quiz session operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSessionError {
    #[error("no quiz session is running")]
    NotActive,

    #[error("no question is active at the current cursor")]
    NoActiveQuestion,

    #[error("current question was already resolved")]
    AlreadyResolved,

    #[error("question was already re-enqueued once")]
    AlreadyPassed,
}

/// Errors emitted by bracket session operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BracketSessionError {
    #[error("no bracket session is running")]
    NotActive,

    #[error("no match is active at the current cursor")]
    NoActiveMatch,

    #[error("candidate {0} is not part of the current match")]
    UnknownCandidate(CandidateId),

    #[error("bracket requires a power-of-two candidate count >= 2, got {0}")]
    InvalidBracketSize(usize),
}

/// Errors emitted while reporting finished sessions to the backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    #[error("session has no game to report")]
    NothingToReport,

    #[error("bracket has not produced a winner yet")]
    NoWinner,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while starting a bracket game from storage.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BracketStartError {
    #[error(transparent)]
    Session(#[from] BracketSessionError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
