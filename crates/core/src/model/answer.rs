use serde::Serialize;

use crate::model::ids::QuestionId;
use crate::model::question::Question;

/// Normalize an answer for comparison: trim surrounding whitespace, case-fold,
/// and drop all internal whitespace, so `" Ap ple "` and `"apple"` compare
/// equal.
#[must_use]
pub fn normalize_answer(raw: &str) -> String {
    raw.to_lowercase().split_whitespace().collect()
}

/// Record of one resolved question within a quiz session.
///
/// History entries are append-only; insertion order is the record of truth for
/// audit and replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub question_number: u32,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub skipped: bool,
    pub time_spent_secs: u32,
    pub score: u32,
}

impl AnswerRecord {
    /// Record for an explicitly submitted answer.
    #[must_use]
    pub fn answered(
        question: &Question,
        user_answer: impl Into<String>,
        is_correct: bool,
        time_spent_secs: u32,
        score: u32,
    ) -> Self {
        Self {
            question_id: question.id(),
            question_number: question.number(),
            user_answer: user_answer.into(),
            correct_answer: question.answer().to_owned(),
            is_correct,
            skipped: false,
            time_spent_secs,
            score,
        }
    }

    /// Record for a question resolved without input (timeout or explicit skip).
    #[must_use]
    pub fn skipped(question: &Question, time_spent_secs: u32) -> Self {
        Self {
            question_id: question.id(),
            question_number: question.number(),
            user_answer: String::new(),
            correct_answer: question.answer().to_owned(),
            is_correct: false,
            skipped: true,
            time_spent_secs,
            score: 0,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::QuizId;

    fn build_question() -> Question {
        Question::new(
            QuestionId::new(1),
            QuizId::new(1),
            1,
            "capital of France?",
            "Paris",
            None,
        )
        .unwrap()
    }

    #[test]
    fn normalization_folds_case_and_whitespace() {
        assert_eq!(normalize_answer(" Apple "), "apple");
        assert_eq!(normalize_answer("New  York"), "newyork");
        assert_eq!(normalize_answer("\tSeo ul\n"), "seoul");
        assert_eq!(normalize_answer(""), "");
    }

    #[test]
    fn answered_record_keeps_raw_input() {
        let q = build_question();
        let record = AnswerRecord::answered(&q, " paris ", true, 4, 10);
        assert_eq!(record.user_answer, " paris ");
        assert_eq!(record.correct_answer, "Paris");
        assert!(record.is_correct);
        assert!(!record.skipped);
        assert_eq!(record.score, 10);
    }

    #[test]
    fn skipped_record_is_incorrect_and_scoreless() {
        let q = build_question();
        let record = AnswerRecord::skipped(&q, 10);
        assert!(record.skipped);
        assert!(!record.is_correct);
        assert_eq!(record.score, 0);
        assert!(record.user_answer.is_empty());
    }
}
