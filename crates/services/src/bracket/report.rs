use std::sync::Arc;

use game_core::Clock;
use game_core::model::{Candidate, CandidateStatsPatch, WorldcupResultRecord};
use storage::repository::WorldcupStore;

use crate::bracket::session::BracketSession;
use crate::error::ReportError;

/// Outcome of a successful result submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedWorldcupResult {
    pub record: WorldcupResultRecord,
    /// Stat update calls issued: one for the winner plus one per entrant.
    pub candidates_updated: usize,
}

/// Submits a finished tournament to the backend.
///
/// Calls go out sequentially: the winner's win/final counters, then one
/// appearance counter per original entrant (winner included), then the result
/// record. The first failure aborts the remaining calls and is returned as an
/// error; already-applied updates are not rolled back, and the session itself
/// stays inspectable.
#[derive(Clone)]
pub struct BracketReporter {
    clock: Clock,
    store: Arc<dyn WorldcupStore>,
}

impl BracketReporter {
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

    /// Submit stat updates and the result record for a finished session.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::NothingToReport` when the session never started,
    /// `ReportError::NoWinner` before the final match is resolved, and
    /// `ReportError::Storage` on the first backend failure.
    pub async fn save_result(
        &self,
        session: &BracketSession,
    ) -> Result<SavedWorldcupResult, ReportError> {
        let worldcup = session.worldcup().ok_or(ReportError::NothingToReport)?;
        let winner = session.winner().ok_or(ReportError::NoWinner)?;

        self.store
            .update_candidate_stats(
                winner.id(),
                &CandidateStatsPatch {
                    win_count: Some(winner.win_count() + 1),
                    final_count: Some(winner.final_count() + 1),
                    appear_count: None,
                },
            )
            .await?;
        let mut candidates_updated = 1;

        for candidate in session.candidates() {
            self.store
                .update_candidate_stats(
                    candidate.id(),
                    &CandidateStatsPatch {
                        appear_count: Some(candidate.appear_count() + 1),
                        ..CandidateStatsPatch::default()
                    },
                )
                .await?;
            candidates_updated += 1;
        }

        let record = WorldcupResultRecord {
            worldcup_id: worldcup.id(),
            winner_id: winner.id(),
            top4: session.top4().iter().map(Candidate::id).collect(),
            selections: session.selections().to_vec(),
            start_round: session.start_round(),
            created_at: self.clock.now(),
        };
        self.store.save_worldcup_result(&record).await?;

        Ok(SavedWorldcupResult {
            record,
            candidates_updated,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
