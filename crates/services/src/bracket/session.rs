use game_core::model::{Candidate, CandidateId, RoundLabel, Selection, Worldcup};

use crate::error::BracketSessionError;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// The pair currently facing off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    pub left: &'a Candidate,
    pub right: &'a Candidate,
}

/// Result of resolving one match.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutcome {
    /// More matches remain in the tournament.
    Continue { round: RoundLabel },
    /// One candidate is left standing; the session is terminal.
    Finished { winner: Candidate },
}

/// Position within the current round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// 1-based index of the match in progress.
    pub current: usize,
    /// Matches in the current round, at least 1.
    pub total: usize,
    pub percentage: f64,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state machine for one single-elimination tournament play-through.
///
/// Pairs are consumed two at a time; winners seed the next round, and each
/// round transition promotes a fresh snapshot list rather than mutating shared
/// state. The session owns all mutation; the host reads state and resolves
/// matches until a single candidate remains.
#[derive(Debug, Clone, PartialEq)]
pub struct BracketSession {
    worldcup: Option<Worldcup>,
    candidates: Vec<Candidate>,
    current_round: Vec<Candidate>,
    next_round: Vec<Candidate>,
    match_index: usize,
    selections: Vec<Selection>,
    top4: Vec<Candidate>,
    start_round: u32,
    round_label: RoundLabel,
    winner: Option<Candidate>,
    active: bool,
}

impl Default for BracketSession {
    fn default() -> Self {
        Self {
            worldcup: None,
            candidates: Vec::new(),
            current_round: Vec::new(),
            next_round: Vec::new(),
            match_index: 0,
            selections: Vec::new(),
            top4: Vec::new(),
            start_round: 0,
            round_label: RoundLabel::from_entrants(0),
            winner: None,
            active: false,
        }
    }
}

impl BracketSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a tournament, discarding any previous session state.
    ///
    /// The candidate count must halve cleanly down to a single champion, so
    /// only powers of two of at least 2 are accepted; anything else is
    /// rejected before any state is touched.
    ///
    /// # Errors
    ///
    /// Returns `BracketSessionError::InvalidBracketSize` for counts that are
    /// not a power of two >= 2.
    pub fn start(
        &mut self,
        worldcup: Worldcup,
        candidates: Vec<Candidate>,
    ) -> Result<(), BracketSessionError> {
        let count = candidates.len();
        if count < 2 || !count.is_power_of_two() {
            return Err(BracketSessionError::InvalidBracketSize(count));
        }

        self.reset();
        self.current_round = candidates.clone();
        self.candidates = candidates;
        self.worldcup = Some(worldcup);
        self.start_round = count as u32;
        self.round_label = RoundLabel::from_entrants(count as u32);
        self.active = true;
        Ok(())
    }

    #[must_use]
    pub fn worldcup(&self) -> Option<&Worldcup> {
        self.worldcup.as_ref()
    }

    /// The original entrant list, in draw order.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Candidates still competing.
    #[must_use]
    pub fn current_round(&self) -> &[Candidate] {
        &self.current_round
    }

    #[must_use]
    pub fn round_label(&self) -> RoundLabel {
        self.round_label
    }

    /// Entrant count the tournament started with.
    #[must_use]
    pub fn start_round(&self) -> u32 {
        self.start_round
    }

    /// Match decisions so far, in resolution order.
    #[must_use]
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// The semifinalists, snapshotted when the 4-entrant round completed.
    #[must_use]
    pub fn top4(&self) -> &[Candidate] {
        &self.top4
    }

    #[must_use]
    pub fn winner(&self) -> Option<&Candidate> {
        self.winner.as_ref()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    /// The pair at the match cursor, or `None` once the round is exhausted.
    #[must_use]
    pub fn current_match(&self) -> Option<Match<'_>> {
        if self.match_index + 1 >= self.current_round.len() {
            return None;
        }
        Some(Match {
            left: &self.current_round[self.match_index],
            right: &self.current_round[self.match_index + 1],
        })
    }

    /// Resolve the current match in favor of `candidate_id`.
    ///
    /// Records the selection, advances the winner, and collapses the round
    /// when its last pair is consumed: the accumulator becomes the next round
    /// snapshot, the 4-entrant round is remembered as the top-4, and a round
    /// of one means the tournament is over.
    ///
    /// # Errors
    ///
    /// Returns `BracketSessionError::NotActive` outside a running session,
    /// `BracketSessionError::NoActiveMatch` when the round is exhausted, and
    /// `BracketSessionError::UnknownCandidate` if the id is not in the pair.
    pub fn select(
        &mut self,
        candidate_id: CandidateId,
    ) -> Result<SelectOutcome, BracketSessionError> {
        if !self.active {
            return Err(BracketSessionError::NotActive);
        }
        if self.match_index + 1 >= self.current_round.len() {
            return Err(BracketSessionError::NoActiveMatch);
        }

        let left = &self.current_round[self.match_index];
        let right = &self.current_round[self.match_index + 1];
        let chosen = if left.id() == candidate_id {
            left.clone()
        } else if right.id() == candidate_id {
            right.clone()
        } else {
            return Err(BracketSessionError::UnknownCandidate(candidate_id));
        };
        let selection = Selection::new(left.id(), right.id(), chosen.id(), self.round_label);

        self.selections.push(selection);
        self.next_round.push(chosen);
        self.match_index += 2;

        if self.match_index >= self.current_round.len() {
            if self.current_round.len() == 4 {
                self.top4 = self.current_round.clone();
            }

            self.current_round = std::mem::take(&mut self.next_round);
            self.match_index = 0;

            if self.current_round.len() == 1 {
                let winner = self.current_round[0].clone();
                self.winner = Some(winner.clone());
                self.active = false;
                return Ok(SelectOutcome::Finished { winner });
            }
            self.round_label = RoundLabel::from_entrants(self.current_round.len() as u32);
        }

        Ok(SelectOutcome::Continue {
            round: self.round_label,
        })
    }

    /// Position within the current round; total is clamped to 1 so a finished
    /// bracket still reads 1 of 1.
    #[must_use]
    pub fn progress(&self) -> Progress {
        let total = (self.current_round.len() / 2).max(1);
        let current = self.match_index / 2 + 1;
        Progress {
            current,
            total,
            percentage: current as f64 / total as f64 * 100.0,
        }
    }

    /// Discard all session state. Safe to call at any time.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
