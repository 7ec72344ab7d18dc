//! Quiz error types.

use thiserror::Error;

/// Errors raised by the question generator and the session state machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// The dataset failed to load or has no rows; the quiz cannot start.
    #[error("no player data loaded")]
    EmptyDataset,

    /// The generator was handed an empty subject pool.
    #[error("question pool is empty")]
    EmptyPool,

    /// An answer was submitted while no question was on screen.
    #[error("no question is awaiting an answer")]
    NoQuestionPending,

    /// The round is over and must be restarted before playing on.
    #[error("the round is over, restart to keep playing")]
    RoundOver,

    /// The submitted answer is not one of the offered options.
    #[error("not one of the offered options: {0}")]
    InvalidChoice(String),
}
