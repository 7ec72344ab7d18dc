//! Quiz session state machine.
//!
//! A session moves between three phases:
//!
//! - `AwaitingQuestion`: nothing on screen; [`QuizSession::next_question`]
//!   generates one.
//! - `AwaitingAnswer`: a question is pending; [`QuizSession::answer`] scores
//!   it and either returns to `AwaitingQuestion` or closes the round.
//! - `Complete`: an imperfect round (or any classic round) has ended; only
//!   [`QuizSession::restart`] leaves this phase.
//!
//! Perfect leveled rounds never stop in `Complete`: they level up (or, at
//! the top level, start a fresh round) straight away and report the outcome
//! in the returned [`Feedback`].

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuizError;
use crate::level::{QuizMode, MAX_LEVEL};
use crate::model::{Answer, Category, Dataset, PlayerRecord};
use crate::question::{generate, Question};
use crate::report::RoundSummary;

/// Where a session is within its round.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    AwaitingQuestion,
    AwaitingAnswer(Question),
    /// Round over; `score` is the score the round ended with.
    Complete { score: usize, round_length: usize },
}

/// A wrongly answered question, kept for review until the round resets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissedQuestion {
    pub question: String,
    pub your_answer: Answer,
    pub correct_answer: Answer,
}

/// What happened when a round closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Perfect round below the top level.
    LevelUp { from: u8, to: u8 },
    /// Perfect round at the top level; a new round starts at the same level.
    Mastered,
    /// The quiz stops until restarted.
    Finished { score: usize, round_length: usize },
}

/// Result of submitting an answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub correct: bool,
    pub chosen: Answer,
    pub correct_answer: Answer,
    /// Score after this answer, before any round reset.
    pub score: usize,
    /// Questions answered this round, including this one.
    pub answered: usize,
    /// Set when this answer closed the round.
    pub outcome: Option<RoundOutcome>,
}

/// Per-user quiz state.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    mode: QuizMode,
    level: u8,
    score: usize,
    /// 1-based; exceeds the round length once the round is over.
    question_number: usize,
    schedule: Vec<Category>,
    used_players: HashSet<String>,
    phase: Phase,
    missed: Vec<MissedQuestion>,
    history: Vec<RoundSummary>,
}

impl QuizSession {
    /// Start a session at level 1.
    pub fn new<R: Rng + ?Sized>(mode: QuizMode, rng: &mut R) -> Self {
        Self::starting_at(mode, 1, rng)
    }

    /// Start a session at an arbitrary level (clamped to 1..=5).
    pub fn starting_at<R: Rng + ?Sized>(mode: QuizMode, level: u8, rng: &mut R) -> Self {
        let level = level.clamp(1, MAX_LEVEL);
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            mode,
            level,
            score: 0,
            question_number: 1,
            schedule: mode.schedule(level, rng),
            used_players: HashSet::new(),
            phase: Phase::AwaitingQuestion,
            missed: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn question_number(&self) -> usize {
        self.question_number
    }

    pub fn round_length(&self) -> usize {
        self.mode.round_length()
    }

    /// Questions answered so far this round.
    pub fn answered(&self) -> usize {
        (self.question_number - 1).min(self.round_length())
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn schedule(&self) -> &[Category] {
        &self.schedule
    }

    pub fn used_players(&self) -> &HashSet<String> {
        &self.used_players
    }

    pub fn missed(&self) -> &[MissedQuestion] {
        &self.missed
    }

    /// Summaries of every round closed so far, oldest first.
    pub fn history(&self) -> &[RoundSummary] {
        &self.history
    }

    pub fn current_question(&self) -> Option<&Question> {
        match &self.phase {
            Phase::AwaitingAnswer(q) => Some(q),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, Phase::Complete { .. })
    }

    /// Category scheduled for the current question number.
    pub fn current_category(&self) -> Category {
        let idx = (self.question_number - 1) % self.schedule.len().max(1);
        self.schedule.get(idx).copied().unwrap_or(Category::Team)
    }

    /// The pending question, generating one if none is on screen.
    pub fn next_question<R: Rng + ?Sized>(
        &mut self,
        dataset: &Dataset,
        rng: &mut R,
    ) -> Result<&Question, QuizError> {
        if dataset.is_empty() {
            return Err(QuizError::EmptyDataset);
        }
        match self.phase {
            Phase::Complete { .. } => return Err(QuizError::RoundOver),
            Phase::AwaitingAnswer(_) => {}
            Phase::AwaitingQuestion => {
                let question = self.build_question(dataset, rng)?;
                self.phase = Phase::AwaitingAnswer(question);
            }
        }
        self.current_question().ok_or(QuizError::NoQuestionPending)
    }

    fn build_question<R: Rng + ?Sized>(
        &mut self,
        dataset: &Dataset,
        rng: &mut R,
    ) -> Result<Question, QuizError> {
        let category = self.current_category();
        let mut pool: Vec<&PlayerRecord> = dataset
            .records()
            .iter()
            .filter(|r| !self.used_players.contains(&r.player))
            .collect();
        if pool.is_empty() {
            tracing::debug!("every player used this round, reopening the full pool");
            self.used_players.clear();
            pool = dataset.records().iter().collect();
        }

        let question = generate(rng, &pool, dataset, category)?;
        self.used_players.insert(question.player.clone());
        Ok(question)
    }

    /// Score the pending question.
    pub fn answer<R: Rng + ?Sized>(
        &mut self,
        choice: &Answer,
        rng: &mut R,
    ) -> Result<Feedback, QuizError> {
        let question = match &self.phase {
            Phase::AwaitingAnswer(q) => q,
            Phase::Complete { .. } => return Err(QuizError::RoundOver),
            Phase::AwaitingQuestion => return Err(QuizError::NoQuestionPending),
        };
        if !question.options.contains(choice) {
            return Err(QuizError::InvalidChoice(choice.to_string()));
        }

        let correct = question.is_correct(choice);
        let correct_answer = question.correct.clone();
        if correct {
            self.score += 1;
        } else {
            self.missed.push(MissedQuestion {
                question: question.prompt(),
                your_answer: choice.clone(),
                correct_answer: correct_answer.clone(),
            });
        }

        self.question_number += 1;
        self.phase = Phase::AwaitingQuestion;

        let score = self.score;
        let answered = self.answered();
        let outcome = if self.question_number > self.round_length() {
            Some(self.complete_round(rng))
        } else {
            None
        };

        Ok(Feedback {
            correct,
            chosen: choice.clone(),
            correct_answer,
            score,
            answered,
            outcome,
        })
    }

    fn complete_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> RoundOutcome {
        let round_length = self.round_length();
        let score = self.score;
        let perfect = score == round_length;
        // Summarise before anything resets.
        self.history.push(self.summary());

        match self.mode {
            QuizMode::Leveled if perfect && self.level < MAX_LEVEL => {
                let from = self.level;
                self.level += 1;
                tracing::info!(from, to = self.level, "perfect round, level up");
                self.reset_round(rng);
                RoundOutcome::LevelUp {
                    from,
                    to: self.level,
                }
            }
            QuizMode::Leveled if perfect => {
                tracing::info!(level = self.level, "perfect round at the top level");
                self.reset_round(rng);
                RoundOutcome::Mastered
            }
            _ => {
                tracing::info!(score, round_length, level = self.level, "round finished");
                self.phase = Phase::Complete {
                    score,
                    round_length,
                };
                RoundOutcome::Finished {
                    score,
                    round_length,
                }
            }
        }
    }

    /// Start a fresh round at the current level.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        tracing::debug!(level = self.level, "restarting round");
        self.reset_round(rng);
    }

    fn reset_round<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.score = 0;
        self.question_number = 1;
        self.missed.clear();
        self.used_players.clear();
        self.schedule = self.mode.schedule(self.level, rng);
        self.phase = Phase::AwaitingQuestion;
    }

    /// Snapshot of the round as it stands.
    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            session_id: self.id,
            mode: self.mode,
            level: self.level,
            score: self.score,
            answered: self.answered(),
            round_length: self.round_length(),
            missed: self.missed.clone(),
            recorded_at: Utc::now(),
        }
    }
}
