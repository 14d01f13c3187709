use std::sync::Arc;

use game_core::Clock;
use game_core::model::{PlayerIdentity, QuizId};
use game_core::scoring::Scoring;
use storage::repository::{QuizStore, StorageError};

use crate::error::ReportError;
use crate::quiz::report::{QuizReporter, SavedQuizResult};
use crate::quiz::session::QuizSession;

/// Orchestrates quiz session start and result submission against a store.
///
/// Keeps transport out of the session engine: the engine works on the fetched
/// working copies, and the game forwards the finished session to a reporter
/// sharing the same clock and store.
#[derive(Clone)]
pub struct QuizGame {
    clock: Clock,
    store: Arc<dyn QuizStore>,
    scoring: Scoring,
}

impl QuizGame {
    #[must_use]
    pub fn new(store: Arc<dyn QuizStore>) -> Self {
        Self {
            clock: Clock::default(),
            store,
            scoring: Scoring::default(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }

    /// Fetch the quiz and its ordered questions, then start a session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the quiz or its questions cannot be
    /// fetched.
    pub async fn start_session(&self, quiz_id: QuizId) -> Result<QuizSession, StorageError> {
        let quiz = self.store.get_quiz(quiz_id).await?;
        let questions = self.store.start_quiz(quiz_id).await?;

        let mut session = QuizSession::new().with_scoring(self.scoring.clone());
        session.start(quiz, questions);
        Ok(session)
    }

    /// Submit a finished session's result and per-question stats.
    ///
    /// # Errors
    ///
    /// Returns `ReportError` for unstarted sessions or backend failures.
    pub async fn save_result(
        &self,
        session: &QuizSession,
        identity: &PlayerIdentity,
    ) -> Result<SavedQuizResult, ReportError> {
        QuizReporter::new(Arc::clone(&self.store))
            .with_clock(self.clock)
            .save_result(session, identity)
            .await
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::model::{Question, QuestionId, Quiz};
    use game_core::time::fixed_clock;
    use storage::repository::InMemoryStore;

    fn seeded_store() -> InMemoryStore {
        let quiz = Quiz::new(QuizId::new(1), "Capitals", None, None).unwrap();
        let questions = vec![
            Question::new(QuestionId::new(2), QuizId::new(1), 2, "Korea?", "Seoul", None)
                .unwrap(),
            Question::new(QuestionId::new(1), QuizId::new(1), 1, "France?", "Paris", None)
                .unwrap(),
        ];
        let store = InMemoryStore::new();
        store.insert_quiz(quiz, questions);
        store
    }

    #[tokio::test]
    async fn start_session_fetches_ordered_questions_and_arms_the_timer() {
        let game = QuizGame::new(Arc::new(seeded_store())).with_clock(fixed_clock());
        let session = game.start_session(QuizId::new(1)).await.unwrap();

        assert!(session.is_active());
        assert_eq!(session.total_questions(), 2);
        assert_eq!(session.current_question().unwrap().number(), 1);
        assert_eq!(session.question_time_remaining(), 10);
    }

    #[tokio::test]
    async fn unknown_quiz_is_not_found() {
        let game = QuizGame::new(Arc::new(InMemoryStore::new()));
        let err = game.start_session(QuizId::new(42)).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn played_session_round_trips_through_save_result() {
        let store = seeded_store();
        let game = QuizGame::new(Arc::new(store.clone())).with_clock(fixed_clock());

        let mut session = game.start_session(QuizId::new(1)).await.unwrap();
        session.check_answer("Paris").unwrap();
        session.next_question().unwrap();
        session.check_answer("seoul").unwrap();
        session.next_question().unwrap();

        let saved = game
            .save_result(&session, &PlayerIdentity::guest())
            .await
            .unwrap();
        assert_eq!(saved.record.score, 20);
        assert_eq!(saved.questions_updated, 2);
        assert_eq!(store.quiz_results().len(), 1);
    }
}
