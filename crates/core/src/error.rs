use thiserror::Error;

use crate::model::{CandidateError, QuestionError, QuizError, WorldcupError};

/// Aggregate validation error for the domain model.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Worldcup(#[from] WorldcupError),
    #[error(transparent)]
    Candidate(#[from] CandidateError),
}
