//! Core data model types for flashcourt.
//!
//! These are the fundamental types the rest of the system uses to represent
//! players, the loaded dataset, question categories, and answers.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// One row of the player table.
///
/// Every field is non-empty once a record has made it through the loader.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Player name, used as the subject key.
    pub player: String,
    pub team: String,
    pub age: u32,
    /// Height in `F'I"` form, e.g. `6'2"`.
    pub height: String,
    /// Years in the league; rookies are usually listed as `R`.
    pub experience: String,
    /// College, or country for international players.
    pub college: String,
    pub position: String,
    /// Draft label, e.g. "1st overall".
    pub draft_pick: String,
}

impl PlayerRecord {
    /// The value of a text column for this record.
    pub fn text(&self, column: TextColumn) -> &str {
        match column {
            TextColumn::Player => &self.player,
            TextColumn::Team => &self.team,
            TextColumn::Height => &self.height,
            TextColumn::Experience => &self.experience,
            TextColumn::College => &self.college,
            TextColumn::Position => &self.position,
            TextColumn::DraftPick => &self.draft_pick,
        }
    }
}

/// The string-valued columns of [`PlayerRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextColumn {
    Player,
    Team,
    Height,
    Experience,
    College,
    Position,
    DraftPick,
}

/// The cleaned, deduplicated player table. Immutable after load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<PlayerRecord>,
}

impl Dataset {
    pub fn new(records: Vec<PlayerRecord>) -> Self {
        Self { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct values of a text column, in first-seen order.
    pub fn distinct_text(&self, column: TextColumn) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.text(column))
            .filter(|v| seen.insert(*v))
            .collect()
    }

    /// Distinct ages, in first-seen order.
    pub fn distinct_ages(&self) -> Vec<u32> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.age)
            .filter(|a| seen.insert(*a))
            .collect()
    }
}

/// Convert a `F'I"` height string to total inches.
///
/// The quote character is stripped and the rest split on the apostrophe.
/// Anything that does not yield exactly two integer parts is unparseable.
pub fn height_to_inches(height: &str) -> Option<u32> {
    let cleaned = height.replace('"', "");
    let parts: Vec<&str> = cleaned.split('\'').collect();
    if parts.len() != 2 {
        return None;
    }
    let feet: u32 = parts[0].trim().parse().ok()?;
    let inches: u32 = parts[1].trim().parse().ok()?;
    Some(feet * 12 + inches)
}

/// Question categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Team,
    Age,
    Height,
    Experience,
    College,
    Position,
    DraftPick,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Team,
        Category::Age,
        Category::Height,
        Category::Experience,
        Category::College,
        Category::Position,
        Category::DraftPick,
    ];

    /// Every category other than Team.
    pub fn non_team() -> impl Iterator<Item = Category> {
        Self::ALL.into_iter().filter(|c| *c != Category::Team)
    }

    /// Label used in question copy ("What is the {label} of ...").
    pub fn prompt_label(&self) -> &'static str {
        match self {
            Category::Experience => "WNBA experience",
            Category::College => "college/country",
            Category::DraftPick => "draft pick",
            Category::Team => "team",
            Category::Age => "age",
            Category::Height => "height",
            Category::Position => "position",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Team => write!(f, "Team"),
            Category::Age => write!(f, "Age"),
            Category::Height => write!(f, "Height"),
            Category::Experience => write!(f, "WNBA Experience"),
            Category::College => write!(f, "College/Country"),
            Category::Position => write!(f, "Position"),
            Category::DraftPick => write!(f, "Draft Pick"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "team" => Ok(Category::Team),
            "age" => Ok(Category::Age),
            "height" | "ht" => Ok(Category::Height),
            "experience" | "wnba experience" | "exp" => Ok(Category::Experience),
            "college" | "college/country" => Ok(Category::College),
            "position" | "pos" => Ok(Category::Position),
            "draft pick" | "draft-pick" | "draftpick" => Ok(Category::DraftPick),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// An answer option. Ages are integers, everything else is text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Years(u32),
    Text(String),
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Years(n) => write!(f, "{n}"),
            Answer::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Answer {
    fn from(s: &str) -> Self {
        Answer::Text(s.to_string())
    }
}

impl From<u32> for Answer {
    fn from(n: u32) -> Self {
        Answer::Years(n)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_parsing() {
        assert_eq!(height_to_inches("6'2\""), Some(74));
        assert_eq!(height_to_inches("5'10\""), Some(70));
        assert_eq!(height_to_inches("6'0"), Some(72));
        assert_eq!(height_to_inches("6 ft"), None);
        assert_eq!(height_to_inches("6'2'1\""), None);
        assert_eq!(height_to_inches("six'two\""), None);
        assert_eq!(height_to_inches(""), None);
    }

    #[test]
    fn category_display_and_parse() {
        assert_eq!(Category::Experience.to_string(), "WNBA Experience");
        assert_eq!(Category::DraftPick.to_string(), "Draft Pick");
        for c in Category::ALL {
            assert_eq!(c.to_string().parse::<Category>().unwrap(), c);
        }
        assert_eq!("ht".parse::<Category>().unwrap(), Category::Height);
        assert_eq!("Pos".parse::<Category>().unwrap(), Category::Position);
        assert!("salary".parse::<Category>().is_err());
    }

    #[test]
    fn non_team_excludes_team() {
        let cats: Vec<_> = Category::non_team().collect();
        assert_eq!(cats.len(), 6);
        assert!(!cats.contains(&Category::Team));
    }

    #[test]
    fn distinct_values_keep_first_seen_order() {
        let ds = fixtures::abcd();
        assert_eq!(ds.distinct_text(TextColumn::Team), vec!["X", "Y", "Z"]);
        assert_eq!(ds.distinct_ages(), vec![25, 30, 22, 28]);
    }

    #[test]
    fn answer_display() {
        assert_eq!(Answer::Years(25).to_string(), "25");
        assert_eq!(Answer::from("Aces").to_string(), "Aces");
    }
}
