#![forbid(unsafe_code)]

pub mod bracket;
pub mod countdown;
pub mod error;
pub mod quiz;

pub use game_core::Clock;

pub use bracket::{
    BracketGame, BracketReporter, BracketSession, BracketSessionError, BracketStartError, Match,
    Progress, SavedWorldcupResult, SelectOutcome,
};
pub use countdown::{Countdown, Tick};
pub use error::ReportError;
pub use quiz::{
    Advance, AnswerOutcome, QuizGame, QuizReporter, QuizSession, QuizSessionError, SavedQuizResult,
    TickEvent,
};
