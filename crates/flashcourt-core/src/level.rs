//! Level table and per-round category schedules.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::Category;

/// Questions per round in leveled play.
pub const ROUND_LENGTH: usize = 10;

/// Questions in the single classic round.
pub const CLASSIC_ROUND_LENGTH: usize = 20;

pub const MAX_LEVEL: u8 = 5;

/// First level at which height questions appear.
pub const HEIGHT_UNLOCK_LEVEL: u8 = 4;

/// How one level fills its ten questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelConfig {
    pub level: u8,
    /// Team questions per round.
    pub team_questions: usize,
    /// Other categories asked a fixed number of times.
    pub fixed: &'static [(Category, usize)],
    /// Slots filled by sampling unlocked categories without replacement.
    pub random_slots: usize,
    pub height_unlocked: bool,
    /// Shown when the level starts.
    pub intro: &'static str,
}

pub const LEVELS: [LevelConfig; MAX_LEVEL as usize] = [
    LevelConfig {
        level: 1,
        team_questions: 6,
        fixed: &[(Category::College, 4)],
        random_slots: 0,
        height_unlocked: false,
        intro: "Rookie: name the team and the college.",
    },
    LevelConfig {
        level: 2,
        team_questions: 5,
        fixed: &[(Category::College, 2), (Category::Position, 3)],
        random_slots: 0,
        height_unlocked: false,
        intro: "Sophomore: positions join the rotation.",
    },
    LevelConfig {
        level: 3,
        team_questions: 5,
        fixed: &[],
        random_slots: 5,
        height_unlocked: false,
        intro: "Veteran: age, experience, and draft picks are in play.",
    },
    LevelConfig {
        level: 4,
        team_questions: 4,
        fixed: &[],
        random_slots: 6,
        height_unlocked: true,
        intro: "All-Star: height questions are unlocked.",
    },
    LevelConfig {
        level: 5,
        team_questions: 2,
        fixed: &[(Category::Height, 2), (Category::DraftPick, 2)],
        random_slots: 4,
        height_unlocked: true,
        intro: "MVP: heights and draft picks every round.",
    },
];

impl LevelConfig {
    /// Config for `level`, clamped into 1..=5.
    pub fn for_level(level: u8) -> &'static LevelConfig {
        let idx = level.clamp(1, MAX_LEVEL) as usize - 1;
        &LEVELS[idx]
    }

    /// Non-Team categories that random slots may draw from.
    pub fn unlocked(&self) -> Vec<Category> {
        Category::non_team()
            .filter(|c| self.height_unlocked || *c != Category::Height)
            .collect()
    }

    /// Category for each question of a round, shuffled.
    pub fn schedule<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Category> {
        let mut schedule = vec![Category::Team; self.team_questions];
        for &(category, count) in self.fixed {
            schedule.extend(std::iter::repeat(category).take(count));
        }
        let unlocked = self.unlocked();
        schedule.extend(unlocked.choose_multiple(rng, self.random_slots).copied());
        schedule.shuffle(rng);
        schedule
    }
}

/// Which flavour of quiz is being played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    /// Ten-question rounds; a perfect round unlocks the next level.
    #[default]
    Leveled,
    /// A single twenty-question round, no levels.
    Classic,
}

impl QuizMode {
    pub fn round_length(&self) -> usize {
        match self {
            QuizMode::Leveled => ROUND_LENGTH,
            QuizMode::Classic => CLASSIC_ROUND_LENGTH,
        }
    }

    /// Category schedule for a fresh round at `level`.
    pub fn schedule<R: Rng + ?Sized>(&self, level: u8, rng: &mut R) -> Vec<Category> {
        match self {
            QuizMode::Leveled => LevelConfig::for_level(level).schedule(rng),
            QuizMode::Classic => classic_schedule(rng),
        }
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizMode::Leveled => write!(f, "leveled"),
            QuizMode::Classic => write!(f, "classic"),
        }
    }
}

impl FromStr for QuizMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "leveled" | "levels" => Ok(QuizMode::Leveled),
            "classic" => Ok(QuizMode::Classic),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

/// Non-Team categories of the classic round. Position is leveled-only.
pub fn classic_categories() -> impl Iterator<Item = Category> {
    Category::non_team().filter(|c| *c != Category::Position)
}

/// Half Team, half drawn with replacement from the classic categories.
fn classic_schedule<R: Rng + ?Sized>(rng: &mut R) -> Vec<Category> {
    let half = CLASSIC_ROUND_LENGTH / 2;
    let others: Vec<Category> = classic_categories().collect();
    let mut schedule = vec![Category::Team; half];
    for _ in 0..half {
        if let Some(c) = others.choose(rng) {
            schedule.push(*c);
        }
    }
    schedule.shuffle(rng);
    schedule
}
