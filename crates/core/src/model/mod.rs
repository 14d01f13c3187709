mod answer;
mod candidate;
mod identity;
mod ids;
mod question;
mod result;
mod selection;

pub use answer::{AnswerRecord, normalize_answer};
pub use candidate::{Candidate, CandidateError, Worldcup, WorldcupError};
pub use identity::{ANONYMOUS_NICKNAME, PlayerIdentity};
pub use ids::{CandidateId, ParseIdError, QuestionId, QuizId, UserId, WorldcupId};
pub use question::{DEFAULT_QUESTION_TIME_LIMIT_SECS, Question, QuestionError, Quiz, QuizError};
pub use result::{CandidateStatsPatch, QuestionStatsPatch, QuizResultRecord, WorldcupResultRecord};
pub use selection::{RoundLabel, Selection};
