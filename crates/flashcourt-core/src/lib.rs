//! flashcourt-core: question generation, levels, and quiz session state.
//!
//! This crate defines the player data model, the per-category question
//! strategies, the level table, and the session state machine that the
//! rest of flashcourt builds on.

pub mod error;
pub mod level;
pub mod model;
pub mod question;
pub mod report;
pub mod session;
pub mod store;

pub use error::QuizError;
pub use level::{LevelConfig, QuizMode};
pub use model::{Answer, Category, Dataset, PlayerRecord};
pub use question::{generate, Question};
pub use session::{Feedback, MissedQuestion, Phase, QuizSession, RoundOutcome};
