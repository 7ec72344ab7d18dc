//! Round summaries and session reports with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::level::QuizMode;
use crate::session::{MissedQuestion, QuizSession};

/// One round, captured when it closed (or when the session was saved).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub session_id: Uuid,
    pub mode: QuizMode,
    pub level: u8,
    pub score: usize,
    pub answered: usize,
    pub round_length: usize,
    #[serde(default)]
    pub missed: Vec<MissedQuestion>,
    pub recorded_at: DateTime<Utc>,
}

impl RoundSummary {
    pub fn is_perfect(&self) -> bool {
        self.score == self.round_length
    }
}

/// Everything worth keeping from a session once the player quits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub mode: QuizMode,
    /// Level reached when the report was taken.
    pub level: u8,
    /// Closed rounds, oldest first.
    #[serde(default)]
    pub rounds: Vec<RoundSummary>,
    /// The round being played at quit time, if any question was answered.
    #[serde(default)]
    pub in_progress: Option<RoundSummary>,
}

impl SessionReport {
    pub fn from_session(session: &QuizSession) -> Self {
        let in_progress = (!session.is_complete() && session.answered() > 0)
            .then(|| session.summary());
        Self {
            session_id: session.id(),
            started_at: session.started_at(),
            mode: session.mode(),
            level: session.level(),
            rounds: session.history().to_vec(),
            in_progress,
        }
    }

    /// Total correct answers across every round in the report.
    pub fn total_correct(&self) -> usize {
        self.rounds
            .iter()
            .chain(self.in_progress.iter())
            .map(|r| r.score)
            .sum()
    }

    /// Every missed question, in the order they were missed.
    pub fn all_missed(&self) -> impl Iterator<Item = &MissedQuestion> {
        self.rounds
            .iter()
            .chain(self.in_progress.iter())
            .flat_map(|r| r.missed.iter())
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
