use std::sync::Arc;

use game_core::Clock;
use game_core::model::WorldcupId;
use storage::repository::WorldcupStore;

use crate::bracket::report::{BracketReporter, SavedWorldcupResult};
use crate::bracket::session::BracketSession;
use crate::error::{BracketStartError, ReportError};

/// Orchestrates bracket session start and result submission against a store.
///
/// The store performs the candidate draw; the session engine only sees the
/// drawn working copies.
#[derive(Clone)]
pub struct BracketGame {
    clock: Clock,
    store: Arc<dyn WorldcupStore>,
}

impl BracketGame {
    #[must_use]
    pub fn new(store: Arc<dyn WorldcupStore>) -> Self {
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

    /// Fetch the worldcup, draw `count` candidates, and start a session.
    ///
    /// # Errors
    ///
    /// Returns `BracketStartError::Storage` when fetching fails and
    /// `BracketStartError::Session` when the draw is not a power of two (for
    /// instance a pool smaller than the requested round size).
    pub async fn start_session(
        &self,
        worldcup_id: WorldcupId,
        count: usize,
    ) -> Result<BracketSession, BracketStartError> {
        let worldcup = self.store.get_worldcup(worldcup_id).await?;
        let candidates = self.store.start_worldcup(worldcup_id, count).await?;

        let mut session = BracketSession::new();
        session.start(worldcup, candidates)?;
        Ok(session)
    }

    /// Submit a finished session's stat updates and result record.
    ///
    /// # Errors
    ///
    /// Returns `ReportError` for unfinished sessions or backend failures.
    pub async fn save_result(
        &self,
        session: &BracketSession,
    ) -> Result<SavedWorldcupResult, ReportError> {
        BracketReporter::new(Arc::clone(&self.store))
            .with_clock(self.clock)
            .save_result(session)
            .await
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::model::{Candidate, CandidateId, Worldcup};
    use game_core::time::fixed_clock;
    use storage::repository::InMemoryStore;

    fn seeded_store(count: u64) -> InMemoryStore {
        let worldcup = Worldcup::new(WorldcupId::new(1), "Best dessert", None).unwrap();
        let candidates: Vec<Candidate> = (1..=count)
            .map(|i| {
                Candidate::new(
                    CandidateId::new(i),
                    WorldcupId::new(1),
                    format!("candidate {i}"),
                    None,
                )
                .unwrap()
            })
            .collect();
        let store = InMemoryStore::new();
        store.insert_worldcup(worldcup, candidates);
        store
    }

    #[tokio::test]
    async fn start_session_draws_the_requested_round_size() {
        let game = BracketGame::new(Arc::new(seeded_store(8))).with_clock(fixed_clock());
        let session = game.start_session(WorldcupId::new(1), 4).await.unwrap();

        assert!(session.is_active());
        assert_eq!(session.start_round(), 4);
        assert_eq!(session.round_label().to_string(), "4강");
    }

    #[tokio::test]
    async fn short_draws_surface_the_bracket_size_error() {
        // Only 3 candidates exist, so an 8-round draw cannot be bisected.
        let game = BracketGame::new(Arc::new(seeded_store(3)));
        let err = game
            .start_session(WorldcupId::new(1), 8)
            .await
            .unwrap_err();
        assert!(matches!(err, BracketStartError::Session(_)));
    }

    #[tokio::test]
    async fn played_session_round_trips_through_save_result() {
        let store = seeded_store(4);
        let game = BracketGame::new(Arc::new(store.clone())).with_clock(fixed_clock());

        let mut session = game.start_session(WorldcupId::new(1), 4).await.unwrap();
        while session.winner().is_none() {
            let left_id = session.current_match().unwrap().left.id();
            session.select(left_id).unwrap();
        }

        let saved = game.save_result(&session).await.unwrap();
        assert_eq!(saved.candidates_updated, 5);
        assert_eq!(store.worldcup_results().len(), 1);
    }
}
