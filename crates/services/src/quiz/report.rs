use std::sync::Arc;

use game_core::Clock;
use game_core::model::{PlayerIdentity, QuizResultRecord};
use storage::repository::QuizStore;

use crate::error::ReportError;
use crate::quiz::session::QuizSession;

/// Outcome of a successful result submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedQuizResult {
    pub record: QuizResultRecord,
    pub questions_updated: usize,
}

/// Submits a finished quiz session to the backend.
///
/// The result record goes first, then one stat update per non-skipped history
/// entry, awaited sequentially so failures are attributable. The first failure
/// aborts the remaining calls and is returned as an error; already-applied
/// updates are not rolled back, and the session itself is never touched — its
/// score, tier, and history stay inspectable either way.
#[derive(Clone)]
pub struct QuizReporter {
    clock: Clock,
    store: Arc<dyn QuizStore>,
}

impl QuizReporter {
    #[must_use]
    pub fn new(store: Arc<dyn QuizStore>) -> Self {
        Self {
            clock: Clock::default(),
            store,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Assemble and submit the result payload plus per-question stat updates.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::NothingToReport` when the session never started,
    /// and `ReportError::Storage` on the first backend failure.
    pub async fn save_result(
        &self,
        session: &QuizSession,
        identity: &PlayerIdentity,
    ) -> Result<SavedQuizResult, ReportError> {
        let quiz = session.quiz().ok_or(ReportError::NothingToReport)?;

        let record = QuizResultRecord {
            quiz_id: quiz.id(),
            user_id: identity.user_id(),
            nickname: identity.nickname().to_owned(),
            score: session.score(),
            correct_count: session.correct_count(),
            total_questions: u32::try_from(session.total_questions()).unwrap_or(u32::MAX),
            remaining_time: session.session_time_remaining(),
            tier: session.current_tier(),
            completed_at: self.clock.now(),
        };
        self.store.save_quiz_result(&record).await?;

        let mut questions_updated = 0;
        for (question_id, patch) in session.stat_updates() {
            self.store.update_question_stats(question_id, &patch).await?;
            questions_updated += 1;
        }

        Ok(SavedQuizResult {
            record,
            questions_updated,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
