use async_trait::async_trait;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use game_core::model::{
    Candidate, CandidateId, CandidateStatsPatch, Question, QuestionId, QuestionStatsPatch, Quiz,
    QuizId, QuizResultRecord, Worldcup, WorldcupId, WorldcupResultRecord,
};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("backend responded with status {0}")]
    Status(u16),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

//
// ─── STORE CONTRACTS ───────────────────────────────────────────────────────────
//

/// Backend access for quizzes: fetches, stat replacements, result saves.
///
/// `start_quiz` returns the question list already filtered to the quiz and
/// ordered by question number; callers never re-sort.
#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Fetch a quiz descriptor by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_quiz(&self, id: QuizId) -> Result<Quiz, StorageError>;

    /// Fetch the ordered question list for a quiz.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the quiz is missing, or other
    /// storage errors.
    async fn start_quiz(&self, id: QuizId) -> Result<Vec<Question>, StorageError>;

    /// Replace a question's cumulative counters.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the question is missing, or other
    /// storage errors.
    async fn update_question_stats(
        &self,
        id: QuestionId,
        patch: &QuestionStatsPatch,
    ) -> Result<(), StorageError>;

    /// Append a finished quiz result.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn save_quiz_result(&self, record: &QuizResultRecord) -> Result<(), StorageError>;
}

/// Backend access for worldcups: candidate draws, stat replacements, result
/// saves. The draw in `start_worldcup` is the backend's responsibility; the
/// caller receives at most `count` candidates in play order.
#[async_trait]
pub trait WorldcupStore: Send + Sync {
    /// Fetch a worldcup descriptor by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_worldcup(&self, id: WorldcupId) -> Result<Worldcup, StorageError>;

    /// Draw up to `count` candidates for a tournament.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the worldcup is missing, or other
    /// storage errors.
    async fn start_worldcup(
        &self,
        id: WorldcupId,
        count: usize,
    ) -> Result<Vec<Candidate>, StorageError>;

    /// Replace a candidate's cumulative counters; unset fields are untouched.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the candidate is missing, or other
    /// storage errors.
    async fn update_candidate_stats(
        &self,
        id: CandidateId,
        patch: &CandidateStatsPatch,
    ) -> Result<(), StorageError>;

    /// Append a finished tournament result.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn save_worldcup_result(&self, record: &WorldcupResultRecord)
    -> Result<(), StorageError>;
}

//
// ─── IN-MEMORY STORE ───────────────────────────────────────────────────────────
//

#[derive(Default)]
struct InMemoryState {
    quizzes: HashMap<QuizId, Quiz>,
    questions: HashMap<QuestionId, Question>,
    quiz_questions: HashMap<QuizId, Vec<QuestionId>>,
    worldcups: HashMap<WorldcupId, Worldcup>,
    candidates: HashMap<CandidateId, Candidate>,
    worldcup_candidates: HashMap<WorldcupId, Vec<CandidateId>>,
    quiz_results: Vec<QuizResultRecord>,
    worldcup_results: Vec<WorldcupResultRecord>,
}

/// Simple in-memory store implementation for testing and prototyping.
///
/// Candidate draws come back in insertion order unless shuffling is enabled,
/// so tests see deterministic brackets by default. Saved results and applied
/// stat patches are retained for assertions.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<InMemoryState>>,
    shuffle_draw: bool,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable the production-like random candidate draw.
    #[must_use]
    pub fn with_shuffle_draw(mut self, shuffle: bool) -> Self {
        self.shuffle_draw = shuffle;
        self
    }

    /// Seed a quiz and its questions, keeping the given order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn insert_quiz(&self, quiz: Quiz, questions: Vec<Question>) {
        let mut state = self.state.lock().expect("in-memory store lock poisoned");
        let ids: Vec<QuestionId> = questions.iter().map(Question::id).collect();
        state.quiz_questions.insert(quiz.id(), ids);
        for question in questions {
            state.questions.insert(question.id(), question);
        }
        state.quizzes.insert(quiz.id(), quiz);
    }

    /// Seed a worldcup and its candidate pool, keeping the given order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn insert_worldcup(&self, worldcup: Worldcup, candidates: Vec<Candidate>) {
        let mut state = self.state.lock().expect("in-memory store lock poisoned");
        let ids: Vec<CandidateId> = candidates.iter().map(Candidate::id).collect();
        state.worldcup_candidates.insert(worldcup.id(), ids);
        for candidate in candidates {
            state.candidates.insert(candidate.id(), candidate);
        }
        state.worldcups.insert(worldcup.id(), worldcup);
    }

    /// Snapshot of a stored question (stats included), if present.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn question(&self, id: QuestionId) -> Option<Question> {
        let state = self.state.lock().expect("in-memory store lock poisoned");
        state.questions.get(&id).cloned()
    }

    /// Snapshot of a stored candidate (stats included), if present.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn candidate(&self, id: CandidateId) -> Option<Candidate> {
        let state = self.state.lock().expect("in-memory store lock poisoned");
        state.candidates.get(&id).cloned()
    }

    /// All quiz results saved so far, in submission order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn quiz_results(&self) -> Vec<QuizResultRecord> {
        let state = self.state.lock().expect("in-memory store lock poisoned");
        state.quiz_results.clone()
    }

    /// All worldcup results saved so far, in submission order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn worldcup_results(&self) -> Vec<WorldcupResultRecord> {
        let state = self.state.lock().expect("in-memory store lock poisoned");
        state.worldcup_results.clone()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, InMemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl QuizStore for InMemoryStore {
    async fn get_quiz(&self, id: QuizId) -> Result<Quiz, StorageError> {
        let state = self.lock()?;
        state.quizzes.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    async fn start_quiz(&self, id: QuizId) -> Result<Vec<Question>, StorageError> {
        let state = self.lock()?;
        let ids = state
            .quiz_questions
            .get(&id)
            .ok_or(StorageError::NotFound)?;
        let mut questions = Vec::with_capacity(ids.len());
        for qid in ids {
            match state.questions.get(qid) {
                Some(question) => questions.push(question.clone()),
                None => return Err(StorageError::NotFound),
            }
        }
        questions.sort_by_key(Question::number);
        Ok(questions)
    }

    async fn update_question_stats(
        &self,
        id: QuestionId,
        patch: &QuestionStatsPatch,
    ) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        let question = state.questions.get(&id).ok_or(StorageError::NotFound)?;
        let updated = Question::from_persisted(
            question.id(),
            question.quiz_id(),
            question.number(),
            question.prompt(),
            question.answer(),
            Some(question.time_limit_secs()),
            patch.correct_count,
            patch.total_count,
        )
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
        state.questions.insert(id, updated);
        Ok(())
    }

    async fn save_quiz_result(&self, record: &QuizResultRecord) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        state.quiz_results.push(record.clone());
        Ok(())
    }
}

#[async_trait]
impl WorldcupStore for InMemoryStore {
    async fn get_worldcup(&self, id: WorldcupId) -> Result<Worldcup, StorageError> {
        let state = self.lock()?;
        state
            .worldcups
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn start_worldcup(
        &self,
        id: WorldcupId,
        count: usize,
    ) -> Result<Vec<Candidate>, StorageError> {
        let state = self.lock()?;
        let ids = state
            .worldcup_candidates
            .get(&id)
            .ok_or(StorageError::NotFound)?;
        let mut pool = Vec::with_capacity(ids.len());
        for cid in ids {
            match state.candidates.get(cid) {
                Some(candidate) => pool.push(candidate.clone()),
                None => return Err(StorageError::NotFound),
            }
        }
        if self.shuffle_draw {
            let mut rng = rand::rng();
            pool.shuffle(&mut rng);
        }
        pool.truncate(count);
        Ok(pool)
    }

    async fn update_candidate_stats(
        &self,
        id: CandidateId,
        patch: &CandidateStatsPatch,
    ) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        let candidate = state.candidates.get(&id).ok_or(StorageError::NotFound)?;
        let updated = Candidate::from_persisted(
            candidate.id(),
            candidate.worldcup_id(),
            candidate.name(),
            candidate.image_url().cloned(),
            patch.win_count.unwrap_or_else(|| candidate.win_count()),
            patch.final_count.unwrap_or_else(|| candidate.final_count()),
            patch.appear_count.unwrap_or_else(|| candidate.appear_count()),
        )
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
        state.candidates.insert(id, updated);
        Ok(())
    }

    async fn save_worldcup_result(
        &self,
        record: &WorldcupResultRecord,
    ) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        state.worldcup_results.push(record.clone());
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::scoring::Tier;
    use game_core::time::fixed_now;

    fn build_quiz(id: u64) -> Quiz {
        Quiz::new(QuizId::new(id), format!("Quiz {id}"), None, None).unwrap()
    }

    fn build_question(id: u64, quiz_id: u64, number: u32) -> Question {
        Question::new(
            QuestionId::new(id),
            QuizId::new(quiz_id),
            number,
            format!("prompt {number}"),
            format!("answer {number}"),
            None,
        )
        .unwrap()
    }

    fn build_worldcup(id: u64) -> Worldcup {
        Worldcup::new(WorldcupId::new(id), format!("Cup {id}"), None).unwrap()
    }

    fn build_candidate(id: u64, worldcup_id: u64) -> Candidate {
        Candidate::new(
            CandidateId::new(id),
            WorldcupId::new(worldcup_id),
            format!("candidate {id}"),
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn start_quiz_returns_questions_ordered_by_number() {
        let store = InMemoryStore::new();
        store.insert_quiz(
            build_quiz(1),
            vec![
                build_question(12, 1, 3),
                build_question(10, 1, 1),
                build_question(11, 1, 2),
            ],
        );

        let questions = store.start_quiz(QuizId::new(1)).await.unwrap();
        let numbers: Vec<u32> = questions.iter().map(Question::number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn missing_quiz_is_not_found() {
        let store = InMemoryStore::new();
        let err = store.start_quiz(QuizId::new(9)).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn question_stats_are_replaced_not_incremented() {
        let store = InMemoryStore::new();
        store.insert_quiz(build_quiz(1), vec![build_question(10, 1, 1)]);

        store
            .update_question_stats(
                QuestionId::new(10),
                &QuestionStatsPatch {
                    correct_count: 5,
                    total_count: 9,
                },
            )
            .await
            .unwrap();

        let question = store.question(QuestionId::new(10)).unwrap();
        assert_eq!(question.correct_count(), 5);
        assert_eq!(question.total_count(), 9);
    }

    #[tokio::test]
    async fn unshuffled_draw_is_insertion_ordered_and_capped() {
        let store = InMemoryStore::new();
        store.insert_worldcup(
            build_worldcup(1),
            (1..=8).map(|i| build_candidate(i, 1)).collect(),
        );

        let drawn = store.start_worldcup(WorldcupId::new(1), 4).await.unwrap();
        let ids: Vec<u64> = drawn.iter().map(|c| c.id().value()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn candidate_patch_touches_only_set_fields() {
        let store = InMemoryStore::new();
        store.insert_worldcup(build_worldcup(1), vec![build_candidate(1, 1)]);

        store
            .update_candidate_stats(
                CandidateId::new(1),
                &CandidateStatsPatch {
                    appear_count: Some(3),
                    ..CandidateStatsPatch::default()
                },
            )
            .await
            .unwrap();

        let candidate = store.candidate(CandidateId::new(1)).unwrap();
        assert_eq!(candidate.appear_count(), 3);
        assert_eq!(candidate.win_count(), 0);
        assert_eq!(candidate.final_count(), 0);
    }

    #[tokio::test]
    async fn saved_quiz_results_are_kept_in_order() {
        let store = InMemoryStore::new();
        let record = QuizResultRecord {
            quiz_id: QuizId::new(1),
            user_id: None,
            nickname: "익명".into(),
            score: 30,
            correct_count: 3,
            total_questions: 5,
            remaining_time: 0,
            tier: Tier::Average,
            completed_at: fixed_now(),
        };
        store.save_quiz_result(&record).await.unwrap();

        let saved = store.quiz_results();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0], record);
    }
}
