//! CSV parsing and normalization of the player table.
//!
//! Only the eight quiz columns are kept. Rows with a missing value in any of
//! them are dropped, ages are coerced to integers, and exact duplicates are
//! removed keeping the first occurrence.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Deserialize;

use flashcourt_core::level::ROUND_LENGTH;
use flashcourt_core::model::{height_to_inches, Dataset, PlayerRecord, TextColumn};

use crate::error::DataLoadError;

/// Required columns and the header spellings accepted for each.
const COLUMNS: [(&str, &[&str]); 8] = [
    ("Player", &["Player"]),
    ("Team", &["Team"]),
    ("Age", &["Age"]),
    ("Ht", &["Ht", "Height"]),
    ("Exp", &["Exp", "Experience"]),
    ("College", &["College"]),
    ("Pos", &["Pos", "Position"]),
    ("Draft Pick", &["Draft Pick", "DraftPick"]),
];

#[derive(Debug, Deserialize)]
struct RawPlayer {
    #[serde(rename = "Player")]
    player: Option<String>,
    #[serde(rename = "Team")]
    team: Option<String>,
    #[serde(rename = "Age")]
    age: Option<String>,
    #[serde(rename = "Ht", alias = "Height")]
    height: Option<String>,
    #[serde(rename = "Exp", alias = "Experience")]
    experience: Option<String>,
    #[serde(rename = "College")]
    college: Option<String>,
    #[serde(rename = "Pos", alias = "Position")]
    position: Option<String>,
    #[serde(rename = "Draft Pick", alias = "DraftPick")]
    draft_pick: Option<String>,
}

/// What happened to the rows of a parsed document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_read: usize,
    pub dropped_missing: usize,
    pub dropped_bad_age: usize,
    pub malformed: usize,
    pub duplicates: usize,
    pub kept: usize,
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows read, {} kept ({} missing values, {} bad ages, {} malformed, {} duplicates)",
            self.rows_read,
            self.kept,
            self.dropped_missing,
            self.dropped_bad_age,
            self.malformed,
            self.duplicates
        )
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Coerce an age cell to an integer. Float spellings like `25.0` are
/// accepted when they hold a whole number.
pub fn coerce_age(value: &str) -> Option<u32> {
    let value = value.trim();
    if let Ok(age) = value.parse::<u32>() {
        return Some(age);
    }
    let age = value.parse::<f64>().ok()?;
    (age.is_finite() && age >= 0.0 && age.fract() == 0.0 && age <= f64::from(u32::MAX))
        .then_some(age as u32)
}

/// Parse a CSV document into a cleaned dataset.
pub fn parse_dataset(content: &str) -> Result<(Dataset, LoadReport), DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: HashSet<String> = reader
        .headers()?
        .iter()
        .map(str::to_string)
        .collect();
    let missing: Vec<String> = COLUMNS
        .iter()
        .filter(|(_, spellings)| !spellings.iter().any(|s| headers.contains(*s)))
        .map(|(name, _)| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DataLoadError::MissingColumns(missing));
    }

    let mut report = LoadReport::default();
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for result in reader.deserialize::<RawPlayer>() {
        report.rows_read += 1;
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("skipping malformed player row: {e}");
                report.malformed += 1;
                continue;
            }
        };

        let fields = (
            present(raw.player),
            present(raw.team),
            present(raw.age),
            present(raw.height),
            present(raw.experience),
            present(raw.college),
            present(raw.position),
            present(raw.draft_pick),
        );
        let (
            Some(player),
            Some(team),
            Some(age),
            Some(height),
            Some(experience),
            Some(college),
            Some(position),
            Some(draft_pick),
        ) = fields
        else {
            report.dropped_missing += 1;
            continue;
        };

        let Some(age) = coerce_age(&age) else {
            tracing::warn!("skipping '{player}': age '{age}' is not a whole number");
            report.dropped_bad_age += 1;
            continue;
        };

        let record = PlayerRecord {
            player,
            team,
            age,
            height,
            experience,
            college,
            position,
            draft_pick,
        };
        if seen.insert(record.clone()) {
            records.push(record);
        } else {
            report.duplicates += 1;
        }
    }

    report.kept = records.len();
    tracing::debug!(%report, "parsed player table");
    Ok((Dataset::new(records), report))
}

/// A non-fatal problem found in a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetWarning {
    pub message: String,
}

impl DatasetWarning {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Check a dataset for things that degrade the quiz without breaking it.
pub fn validate_dataset(dataset: &Dataset) -> Vec<DatasetWarning> {
    let mut warnings = Vec::new();

    if dataset.is_empty() {
        warnings.push(DatasetWarning::new("dataset has no usable rows"));
        return warnings;
    }

    if dataset.len() < ROUND_LENGTH {
        warnings.push(DatasetWarning::new(format!(
            "only {} players; subjects will repeat within a {ROUND_LENGTH}-question round",
            dataset.len()
        )));
    }

    let bad_heights: Vec<&str> = dataset
        .distinct_text(TextColumn::Height)
        .into_iter()
        .filter(|h| height_to_inches(h).is_none())
        .collect();
    if !bad_heights.is_empty() {
        warnings.push(DatasetWarning::new(format!(
            "{} unparseable height(s), never offered as distractors: {}",
            bad_heights.len(),
            bad_heights.join(", ")
        )));
    }

    let columns = [
        (TextColumn::Team, "Team"),
        (TextColumn::Experience, "Exp"),
        (TextColumn::College, "College"),
        (TextColumn::Position, "Pos"),
    ];
    for (column, name) in columns {
        let distinct = dataset.distinct_text(column).len();
        if distinct < 4 {
            warnings.push(DatasetWarning::new(format!(
                "column '{name}' has {distinct} distinct value(s); questions will offer fewer than 4 options"
            )));
        }
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in dataset.records() {
        *counts.entry(record.player.as_str()).or_default() += 1;
    }
    let mut repeated: Vec<&str> = counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(name, _)| name)
        .collect();
    if !repeated.is_empty() {
        repeated.sort_unstable();
        warnings.push(DatasetWarning::new(format!(
            "player(s) listed more than once: {}",
            repeated.join(", ")
        )));
    }

    warnings
}
