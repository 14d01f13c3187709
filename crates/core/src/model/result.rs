use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::ids::{CandidateId, QuizId, UserId, WorldcupId};
use crate::model::selection::Selection;
use crate::scoring::Tier;

//
// ─── QUIZ RESULTS ──────────────────────────────────────────────────────────────
//

/// Final quiz outcome submitted to the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResultRecord {
    pub quiz_id: QuizId,
    pub user_id: Option<UserId>,
    pub nickname: String,
    pub score: u32,
    pub correct_count: u32,
    pub total_questions: u32,
    pub remaining_time: u32,
    pub tier: Tier,
    pub completed_at: DateTime<Utc>,
}

/// Full replacement counters for one question, computed by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStatsPatch {
    pub correct_count: u32,
    pub total_count: u32,
}

//
// ─── WORLDCUP RESULTS ──────────────────────────────────────────────────────────
//

/// Final tournament outcome submitted to the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldcupResultRecord {
    pub worldcup_id: WorldcupId,
    pub winner_id: CandidateId,
    pub top4: Vec<CandidateId>,
    pub selections: Vec<Selection>,
    pub start_round: u32,
    pub created_at: DateTime<Utc>,
}

/// Full replacement counters for one candidate; absent fields stay untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateStatsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appear_count: Option<u32>,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
