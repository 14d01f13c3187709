use std::collections::HashSet;

use game_core::model::{
    AnswerRecord, Question, QuestionId, QuestionStatsPatch, Quiz, normalize_answer,
};
use game_core::scoring::{Scoring, Tier};

use crate::countdown::{Countdown, Tick};
use crate::error::QuizSessionError;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Result of checking a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub score: u32,
}

/// Result of advancing the question cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// A next question is active and its countdown armed.
    Next,
    /// The cursor ran past the last question; the session is terminal.
    Finished,
}

/// What happened during one virtual second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// The session is not live.
    Idle,
    /// Countdowns advanced, nothing fired.
    Running,
    /// The question countdown ran out; a skipped entry was recorded. The host
    /// should show feedback and call [`QuizSession::next_question`].
    QuestionTimedOut,
    /// The overall session countdown ran out; the session is terminal.
    SessionExpired,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state machine for one timed short-answer quiz play-through.
///
/// The session owns all mutation: the host reads state, submits answers, and
/// drives time by calling [`tick`](Self::tick) once per second. History is
/// append-only; one entry per resolved question, in resolution order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuizSession {
    scoring: Scoring,
    quiz: Option<Quiz>,
    questions: Vec<Question>,
    current: usize,
    answers: Vec<AnswerRecord>,
    score: u32,
    tier: Option<Tier>,
    question_timer: Countdown,
    session_timer: Countdown,
    active: bool,
    timed_out: bool,
    current_resolved: bool,
    passed: HashSet<QuestionId>,
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific scoring scheme instead of the flat default.
    #[must_use]
    pub fn with_scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }

    /// Begin a play-through, discarding any previous session state.
    ///
    /// The question list may be empty; such a session is live but has no
    /// current question, and the first [`next_question`](Self::next_question)
    /// call (or [`end`](Self::end)) terminates it. The first question's
    /// countdown is armed immediately, as is the overall session countdown
    /// when the quiz carries a limit.
    pub fn start(&mut self, quiz: Quiz, questions: Vec<Question>) {
        self.reset();

        if let Some(limit) = quiz.session_time_limit_secs() {
            self.session_timer.arm(limit);
        }
        if let Some(first) = questions.first() {
            self.question_timer.arm(first.time_limit_secs());
        }

        self.quiz = Some(quiz);
        self.questions = questions;
        self.active = true;
    }

    #[must_use]
    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Tier computed at termination; `None` while the session is live.
    #[must_use]
    pub fn tier(&self) -> Option<Tier> {
        self.tier
    }

    /// Tier for the score as it stands, final or not.
    #[must_use]
    pub fn current_tier(&self) -> Tier {
        self.tier
            .unwrap_or_else(|| self.scoring.tier_for(self.score))
    }

    #[must_use]
    pub fn scoring(&self) -> &Scoring {
        &self.scoring
    }

    /// Resolved-question history, in resolution order.
    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.answers.iter().filter(|a| a.is_correct).count() as u32
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Seconds left on the active question countdown.
    #[must_use]
    pub fn question_time_remaining(&self) -> u32 {
        self.question_timer.remaining()
    }

    /// Seconds left on the overall session countdown; 0 when the quiz has
    /// none.
    #[must_use]
    pub fn session_time_remaining(&self) -> u32 {
        self.session_timer.remaining()
    }

    /// Question at the cursor, or `None` once the session ran past the list.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// Check a submitted answer against the current question.
    ///
    /// Both sides are normalized (trimmed, case-folded, internal whitespace
    /// dropped) before comparison. A correct answer is awarded per the
    /// configured scoring and accumulated. Either way a history entry is
    /// appended and the question countdown stops, so a pending timeout can no
    /// longer fire for this question. The cursor does not advance.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::NotActive` outside a running session,
    /// `QuizSessionError::NoActiveQuestion` when the cursor is out of bounds,
    /// and `QuizSessionError::AlreadyResolved` if this question already has a
    /// history entry, so one question can never be recorded twice.
    pub fn check_answer(&mut self, user_answer: &str) -> Result<AnswerOutcome, QuizSessionError> {
        if !self.active {
            return Err(QuizSessionError::NotActive);
        }
        if self.current_resolved {
            return Err(QuizSessionError::AlreadyResolved);
        }
        let question = self
            .questions
            .get(self.current)
            .ok_or(QuizSessionError::NoActiveQuestion)?;

        let correct = normalize_answer(user_answer) == normalize_answer(question.answer());
        let remaining = self.question_timer.remaining();
        let time_spent = question.time_limit_secs().saturating_sub(remaining);
        let awarded = if correct { self.scoring.award(remaining) } else { 0 };
        let record = AnswerRecord::answered(question, user_answer, correct, time_spent, awarded);

        self.question_timer.cancel();
        self.score += awarded;
        self.answers.push(record);
        self.current_resolved = true;

        Ok(AnswerOutcome {
            correct,
            score: awarded,
        })
    }

    /// Resolve the current question without input: incorrect, zero score,
    /// marked skipped. Fired by the timeout path and callable by the host.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::NotActive` outside a running session,
    /// `QuizSessionError::NoActiveQuestion` when the cursor is out of bounds,
    /// and `QuizSessionError::AlreadyResolved` if this question already has a
    /// history entry.
    pub fn skip_current(&mut self) -> Result<(), QuizSessionError> {
        if !self.active {
            return Err(QuizSessionError::NotActive);
        }
        if self.current_resolved {
            return Err(QuizSessionError::AlreadyResolved);
        }
        let question = self
            .questions
            .get(self.current)
            .ok_or(QuizSessionError::NoActiveQuestion)?;

        let time_spent = question
            .time_limit_secs()
            .saturating_sub(self.question_timer.remaining());
        let record = AnswerRecord::skipped(question, time_spent);

        self.question_timer.cancel();
        self.answers.push(record);
        self.current_resolved = true;
        Ok(())
    }

    /// Re-enqueue the current question at the end of the pending list and move
    /// on, recording nothing. The question resurfaces later; each question can
    /// be passed at most once.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::NotActive` outside a running session,
    /// `QuizSessionError::NoActiveQuestion` when the cursor is out of bounds,
    /// `QuizSessionError::AlreadyResolved` once the question has a history
    /// entry, and `QuizSessionError::AlreadyPassed` on a second pass.
    pub fn pass_current(&mut self) -> Result<(), QuizSessionError> {
        if !self.active {
            return Err(QuizSessionError::NotActive);
        }
        if self.current_resolved {
            return Err(QuizSessionError::AlreadyResolved);
        }
        let question_id = self
            .questions
            .get(self.current)
            .ok_or(QuizSessionError::NoActiveQuestion)?
            .id();
        if !self.passed.insert(question_id) {
            return Err(QuizSessionError::AlreadyPassed);
        }

        // The cursor stays put: removing the current question slides the next
        // pending one into place, and the passed one resurfaces at the end.
        let question = self.questions.remove(self.current);
        self.questions.push(question);

        let limit = self.questions[self.current].time_limit_secs();
        self.question_timer.arm(limit);
        Ok(())
    }

    /// Advance the cursor by one.
    ///
    /// Within bounds the new question's countdown is armed; past the end the
    /// session terminates via [`end`](Self::end).
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::NotActive` outside a running session.
    pub fn next_question(&mut self) -> Result<Advance, QuizSessionError> {
        if !self.active {
            return Err(QuizSessionError::NotActive);
        }

        self.current += 1;
        self.current_resolved = false;
        if self.current >= self.questions.len() {
            self.end();
            Ok(Advance::Finished)
        } else {
            let limit = self.questions[self.current].time_limit_secs();
            self.question_timer.arm(limit);
            Ok(Advance::Next)
        }
    }

    /// Terminate the session: stop both countdowns together and fix the tier
    /// from the final score. Idempotent until the next reset.
    pub fn end(&mut self) {
        self.active = false;
        self.question_timer.cancel();
        self.session_timer.cancel();
        if self.tier.is_none() {
            self.tier = Some(self.scoring.tier_for(self.score));
        }
    }

    /// Advance virtual time by one second.
    ///
    /// Exactly one skipped entry is appended when the question countdown runs
    /// out, and an expired session countdown terminates the whole session.
    /// Errors never escape this path; a terminal session ignores ticks.
    pub fn tick(&mut self) -> TickEvent {
        if !self.active {
            return TickEvent::Idle;
        }

        if self.session_timer.tick() == Tick::Expired {
            self.end();
            return TickEvent::SessionExpired;
        }

        match self.question_timer.tick() {
            Tick::Expired => {
                // The countdown only runs while a question is active, so the
                // skip cannot fail; swallow rather than poison the tick path.
                let _ = self.skip_current();
                self.timed_out = true;
                TickEvent::QuestionTimedOut
            }
            Tick::Running { .. } | Tick::Idle => TickEvent::Running,
        }
    }

    /// Consume the timeout flag, for hosts that poll instead of matching
    /// [`TickEvent`].
    pub fn take_timeout_flag(&mut self) -> bool {
        std::mem::take(&mut self.timed_out)
    }

    /// Full replacement counters for every non-skipped history entry, ready
    /// for the backend's per-question stat updates.
    #[must_use]
    pub fn stat_updates(&self) -> Vec<(QuestionId, QuestionStatsPatch)> {
        self.answers
            .iter()
            .filter(|answer| !answer.skipped)
            .filter_map(|answer| {
                let question = self
                    .questions
                    .iter()
                    .find(|q| q.id() == answer.question_id)?;
                Some((
                    question.id(),
                    QuestionStatsPatch {
                        correct_count: question.correct_count() + u32::from(answer.is_correct),
                        total_count: question.total_count() + 1,
                    },
                ))
            })
            .collect()
    }

    /// Discard all session state, keeping the configured scoring. Safe to call
    /// at any time, including before a session ever started.
    pub fn reset(&mut self) {
        let scoring = self.scoring.clone();
        *self = Self {
            scoring,
            ..Self::default()
        };
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
