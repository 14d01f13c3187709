use serde::{Serialize, Serializer};
use std::fmt;

use crate::model::ids::CandidateId;

//
// ─── ROUND LABEL ───────────────────────────────────────────────────────────────
//

/// Human-readable label for a bracket round, derived from the live entrant
/// count: `64강`, `32강`, `16강`, `8강`, `4강`, and `결승` for the final pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoundLabel {
    entrants: u32,
}

impl RoundLabel {
    #[must_use]
    pub fn from_entrants(entrants: u32) -> Self {
        Self { entrants }
    }

    #[must_use]
    pub fn entrants(&self) -> u32 {
        self.entrants
    }

    /// True for the last pair standing.
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.entrants <= 2
    }
}

impl fmt::Display for RoundLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_final() {
            write!(f, "결승")
        } else {
            write!(f, "{}강", self.entrants)
        }
    }
}

impl Serialize for RoundLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

//
// ─── SELECTION ─────────────────────────────────────────────────────────────────
//

/// Record of one match decision: the pair shown and the candidate chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub left_id: CandidateId,
    pub right_id: CandidateId,
    pub selected_id: CandidateId,
    pub round: RoundLabel,
}

impl Selection {
    #[must_use]
    pub fn new(
        left_id: CandidateId,
        right_id: CandidateId,
        selected_id: CandidateId,
        round: RoundLabel,
    ) -> Self {
        Self {
            left_id,
            right_id,
            selected_id,
            round,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
