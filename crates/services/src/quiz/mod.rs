mod game;
mod report;
mod session;

// Public API of the quiz subsystem.
pub use crate::error::QuizSessionError;
pub use game::QuizGame;
pub use report::{QuizReporter, SavedQuizResult};
pub use session::{Advance, AnswerOutcome, QuizSession, TickEvent};
