use thiserror::Error;

use crate::model::ids::{QuestionId, QuizId};

/// Countdown applied to a question whose time limit is unset or zero.
pub const DEFAULT_QUESTION_TIME_LIMIT_SECS: u32 = 10;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz title cannot be empty")]
    EmptyTitle,

    #[error("quiz session time limit must be > 0 when set")]
    InvalidTimeLimit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question answer cannot be empty")]
    EmptyAnswer,
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

/// Descriptor for a timed short-answer quiz.
///
/// An optional overall session time limit runs alongside the per-question
/// countdowns; quizzes without one are bounded only per question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    id: QuizId,
    title: String,
    description: Option<String>,
    session_time_limit_secs: Option<u32>,
}

impl Quiz {
    /// Create a quiz descriptor.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyTitle` if the title is blank, and
    /// `QuizError::InvalidTimeLimit` if a zero session limit is supplied.
    pub fn new(
        id: QuizId,
        title: impl Into<String>,
        description: Option<String>,
        session_time_limit_secs: Option<u32>,
    ) -> Result<Self, QuizError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(QuizError::EmptyTitle);
        }
        if session_time_limit_secs == Some(0) {
            return Err(QuizError::InvalidTimeLimit);
        }

        Ok(Self {
            id,
            title,
            description,
            session_time_limit_secs,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuizId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Overall session countdown in seconds, if this quiz carries one.
    #[must_use]
    pub fn session_time_limit_secs(&self) -> Option<u32> {
        self.session_time_limit_secs
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single short-answer question with its cumulative answer stats.
///
/// The stats are owned by the backend; a session works against a read-only
/// copy and emits full replacement counters after the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    quiz_id: QuizId,
    number: u32,
    prompt: String,
    answer: String,
    time_limit_secs: Option<u32>,
    correct_count: u32,
    total_count: u32,
}

impl Question {
    /// Create a brand-new question with zeroed stats.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or canonical answer is blank.
    pub fn new(
        id: QuestionId,
        quiz_id: QuizId,
        number: u32,
        prompt: impl Into<String>,
        answer: impl Into<String>,
        time_limit_secs: Option<u32>,
    ) -> Result<Self, QuestionError> {
        Self::from_persisted(id, quiz_id, number, prompt, answer, time_limit_secs, 0, 0)
    }

    /// Rehydrate a question from persisted storage, stats included.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or canonical answer is blank.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        id: QuestionId,
        quiz_id: QuizId,
        number: u32,
        prompt: impl Into<String>,
        answer: impl Into<String>,
        time_limit_secs: Option<u32>,
        correct_count: u32,
        total_count: u32,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        let answer = answer.into();
        if answer.trim().is_empty() {
            return Err(QuestionError::EmptyAnswer);
        }

        Ok(Self {
            id,
            quiz_id,
            number,
            prompt,
            answer,
            time_limit_secs,
            correct_count,
            total_count,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn quiz_id(&self) -> QuizId {
        self.quiz_id
    }

    /// 1-based ordinal of this question within its quiz.
    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Canonical answer string, compared after normalization.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Effective countdown for this question.
    ///
    /// An unset or zero stored limit falls back to
    /// [`DEFAULT_QUESTION_TIME_LIMIT_SECS`].
    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        match self.time_limit_secs {
            Some(secs) if secs > 0 => secs,
            _ => DEFAULT_QUESTION_TIME_LIMIT_SECS,
        }
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.total_count
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn build_question(time_limit: Option<u32>) -> Question {
        Question::new(
            QuestionId::new(1),
            QuizId::new(1),
            1,
            "capital of France?",
            "paris",
            time_limit,
        )
        .unwrap()
    }

    #[test]
    fn blank_prompt_is_rejected() {
        let err = Question::new(
            QuestionId::new(1),
            QuizId::new(1),
            1,
            "   ",
            "paris",
            None,
        )
        .unwrap_err();
        assert!(matches!(err, QuestionError::EmptyPrompt));
    }

    #[test]
    fn blank_answer_is_rejected() {
        let err =
            Question::new(QuestionId::new(1), QuizId::new(1), 1, "q", " ", None).unwrap_err();
        assert!(matches!(err, QuestionError::EmptyAnswer));
    }

    #[test]
    fn missing_time_limit_falls_back_to_default() {
        assert_eq!(
            build_question(None).time_limit_secs(),
            DEFAULT_QUESTION_TIME_LIMIT_SECS
        );
        assert_eq!(
            build_question(Some(0)).time_limit_secs(),
            DEFAULT_QUESTION_TIME_LIMIT_SECS
        );
        assert_eq!(build_question(Some(20)).time_limit_secs(), 20);
    }

    #[test]
    fn quiz_rejects_blank_title_and_zero_limit() {
        let err = Quiz::new(QuizId::new(1), "  ", None, None).unwrap_err();
        assert!(matches!(err, QuizError::EmptyTitle));

        let err = Quiz::new(QuizId::new(1), "ok", None, Some(0)).unwrap_err();
        assert!(matches!(err, QuizError::InvalidTimeLimit));
    }

    #[test]
    fn persisted_question_keeps_stats() {
        let q = Question::from_persisted(
            QuestionId::new(3),
            QuizId::new(1),
            3,
            "q",
            "a",
            Some(15),
            7,
            12,
        )
        .unwrap();
        assert_eq!(q.correct_count(), 7);
        assert_eq!(q.total_count(), 12);
    }
}
