//! Multiple-choice question generation.
//!
//! Each [`Category`] maps to a [`QuestionStrategy`] that decides what the
//! question is about, what the right answer is, and which values may be
//! offered as distractors. The generator itself only samples and shuffles.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::QuizError;
use crate::model::{height_to_inches, Answer, Category, Dataset, PlayerRecord, TextColumn};

/// Number of wrong options offered alongside the correct one.
pub const DISTRACTOR_COUNT: usize = 3;

/// Minimum gap (years or inches) between a numeric answer and its distractors.
pub const MIN_SPACING: i64 = 2;

/// A generated question, discarded once answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub category: Category,
    /// Question text: a player name, or the draft label for draft-pick questions.
    pub subject: String,
    /// Name of the player the question was built from.
    pub player: String,
    /// Correct answer plus distractors, shuffled.
    pub options: Vec<Answer>,
    pub correct: Answer,
}

impl Question {
    /// Category-specific question copy.
    pub fn prompt(&self) -> String {
        match self.category {
            Category::Team => format!("{} plays for what team?", self.subject),
            Category::DraftPick => {
                format!("Who was selected with the draft pick: {}?", self.subject)
            }
            other => format!("What is the {} of {}?", other.prompt_label(), self.subject),
        }
    }

    pub fn is_correct(&self, answer: &Answer) -> bool {
        *answer == self.correct
    }

    /// Resolve user input to one of the options.
    ///
    /// A 1-based option number wins; otherwise the input is matched against
    /// the option text, ignoring ASCII case.
    pub fn resolve_choice(&self, input: &str) -> Option<&Answer> {
        let input = input.trim();
        if let Ok(n) = input.parse::<usize>() {
            if (1..=self.options.len()).contains(&n) {
                return self.options.get(n - 1);
            }
        }
        self.options
            .iter()
            .find(|o| o.to_string().eq_ignore_ascii_case(input))
    }
}

/// What a strategy extracts from the subject record.
#[derive(Debug, Clone)]
pub struct Framing {
    pub subject: String,
    pub correct: Answer,
    /// Distinct candidate values; may still contain the correct answer.
    pub candidates: Vec<Answer>,
}

/// Turns a subject record into question text, answer, and distractor candidates.
pub trait QuestionStrategy: Sync {
    fn frame(&self, subject: &PlayerRecord, dataset: &Dataset) -> Framing;
}

/// "Who was picked at X?", answered with a player name.
struct DraftPickStrategy;

impl QuestionStrategy for DraftPickStrategy {
    fn frame(&self, subject: &PlayerRecord, dataset: &Dataset) -> Framing {
        Framing {
            subject: subject.draft_pick.clone(),
            correct: Answer::Text(subject.player.clone()),
            candidates: text_answers(dataset.distinct_text(TextColumn::Player)),
        }
    }
}

struct AgeStrategy;

impl QuestionStrategy for AgeStrategy {
    fn frame(&self, subject: &PlayerRecord, dataset: &Dataset) -> Framing {
        let correct = i64::from(subject.age);
        let candidates = dataset
            .distinct_ages()
            .into_iter()
            .filter(|a| (i64::from(*a) - correct).abs() >= MIN_SPACING)
            .map(Answer::Years)
            .collect();
        Framing {
            subject: subject.player.clone(),
            correct: Answer::Years(subject.age),
            candidates,
        }
    }
}

struct HeightStrategy;

impl QuestionStrategy for HeightStrategy {
    fn frame(&self, subject: &PlayerRecord, dataset: &Dataset) -> Framing {
        // An unparseable answer leaves nothing to compare against.
        let candidates = match height_to_inches(&subject.height) {
            Some(correct) => {
                let correct = i64::from(correct);
                dataset
                    .distinct_text(TextColumn::Height)
                    .into_iter()
                    .filter(|h| {
                        height_to_inches(h)
                            .is_some_and(|inches| (i64::from(inches) - correct).abs() >= MIN_SPACING)
                    })
                    .map(Answer::from)
                    .collect()
            }
            None => Vec::new(),
        };
        Framing {
            subject: subject.player.clone(),
            correct: Answer::Text(subject.height.clone()),
            candidates,
        }
    }
}

/// Plain column lookup: Team, Experience, College, Position.
struct ColumnStrategy(TextColumn);

impl QuestionStrategy for ColumnStrategy {
    fn frame(&self, subject: &PlayerRecord, dataset: &Dataset) -> Framing {
        Framing {
            subject: subject.player.clone(),
            correct: Answer::Text(subject.text(self.0).to_string()),
            candidates: text_answers(dataset.distinct_text(self.0)),
        }
    }
}

fn text_answers(values: Vec<&str>) -> Vec<Answer> {
    values.into_iter().map(Answer::from).collect()
}

static DRAFT_PICK: DraftPickStrategy = DraftPickStrategy;
static AGE: AgeStrategy = AgeStrategy;
static HEIGHT: HeightStrategy = HeightStrategy;
static TEAM: ColumnStrategy = ColumnStrategy(TextColumn::Team);
static EXPERIENCE: ColumnStrategy = ColumnStrategy(TextColumn::Experience);
static COLLEGE: ColumnStrategy = ColumnStrategy(TextColumn::College);
static POSITION: ColumnStrategy = ColumnStrategy(TextColumn::Position);

/// The strategy used for a category.
pub fn strategy_for(category: Category) -> &'static dyn QuestionStrategy {
    match category {
        Category::DraftPick => &DRAFT_PICK,
        Category::Age => &AGE,
        Category::Height => &HEIGHT,
        Category::Team => &TEAM,
        Category::Experience => &EXPERIENCE,
        Category::College => &COLLEGE,
        Category::Position => &POSITION,
    }
}

/// Build a question for `category`.
///
/// The subject is drawn from `pool`; distractors come from the whole
/// `dataset`. Fewer than three distractors are used when that is all the
/// dataset can offer.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    pool: &[&PlayerRecord],
    dataset: &Dataset,
    category: Category,
) -> Result<Question, QuizError> {
    let subject = pool.choose(rng).copied().ok_or(QuizError::EmptyPool)?;
    let Framing {
        subject: text,
        correct,
        candidates,
    } = strategy_for(category).frame(subject, dataset);

    let mut seen = HashSet::new();
    let candidates: Vec<Answer> = candidates
        .into_iter()
        .filter(|c| *c != correct && seen.insert(c.clone()))
        .collect();

    let mut options = Vec::with_capacity(DISTRACTOR_COUNT + 1);
    options.push(correct.clone());
    options.extend(candidates.choose_multiple(rng, DISTRACTOR_COUNT).cloned());
    options.shuffle(rng);

    tracing::debug!(
        category = %category,
        player = %subject.player,
        options = options.len(),
        "generated question"
    );

    Ok(Question {
        category,
        subject: text,
        player: subject.player.clone(),
        options,
        correct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn everyone(ds: &Dataset) -> Vec<&PlayerRecord> {
        ds.records().iter().collect()
    }

    fn subject<'a>(ds: &'a Dataset, name: &str) -> Vec<&'a PlayerRecord> {
        ds.records().iter().filter(|r| r.player == name).collect()
    }

    #[test]
    fn correct_answer_appears_exactly_once() {
        let ds = fixtures::league(40);
        let pool = everyone(&ds);
        let mut rng = StdRng::seed_from_u64(7);
        for category in Category::ALL {
            for _ in 0..50 {
                let q = generate(&mut rng, &pool, &ds, category).unwrap();
                let hits = q.options.iter().filter(|o| **o == q.correct).count();
                assert_eq!(hits, 1, "{category}: {:?}", q.options);
                assert_eq!(q.options.len(), 4, "{category}: {:?}", q.options);
            }
        }
    }

    #[test]
    fn age_distractors_are_spaced() {
        let ds = fixtures::abcd();
        let pool = subject(&ds, "A");
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let q = generate(&mut rng, &pool, &ds, Category::Age).unwrap();
            assert_eq!(q.correct, Answer::Years(25));
            let mut distractors: Vec<_> = q
                .options
                .iter()
                .filter(|o| **o != q.correct)
                .cloned()
                .collect();
            distractors.sort_by_key(|a| a.to_string());
            assert_eq!(
                distractors,
                vec![Answer::Years(22), Answer::Years(28), Answer::Years(30)]
            );
        }
    }

    #[test]
    fn near_ages_are_never_offered() {
        let mut records = fixtures::abcd().records().to_vec();
        records.push(fixtures::player("E", "Y", 24, "6'4\""));
        records.push(fixtures::player("F", "Z", 26, "6'5\""));
        let ds = Dataset::new(records);
        let pool = subject(&ds, "A");
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let q = generate(&mut rng, &pool, &ds, Category::Age).unwrap();
            assert!(!q.options.contains(&Answer::Years(24)));
            assert!(!q.options.contains(&Answer::Years(26)));
        }
    }

    #[test]
    fn height_distractors_are_spaced_and_parseable() {
        let mut records = fixtures::league(30).records().to_vec();
        records.push(fixtures::player("Odd", "Sun", 30, "tall"));
        let ds = Dataset::new(records);
        let pool = everyone(&ds);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let q = generate(&mut rng, &pool, &ds, Category::Height).unwrap();
            let Some(correct) = height_to_inches(&q.correct.to_string()) else {
                assert_eq!(q.options.len(), 1);
                continue;
            };
            for option in q.options.iter().filter(|o| **o != q.correct) {
                let inches = height_to_inches(&option.to_string()).expect("parseable");
                assert!((i64::from(inches) - i64::from(correct)).abs() >= MIN_SPACING);
            }
        }
    }

    #[test]
    fn draft_pick_asks_for_the_player() {
        let ds = fixtures::abcd();
        let pool = subject(&ds, "B");
        let mut rng = StdRng::seed_from_u64(5);
        let q = generate(&mut rng, &pool, &ds, Category::DraftPick).unwrap();
        assert_eq!(q.subject, "B pick");
        assert_eq!(q.correct, Answer::from("B"));
        assert_eq!(q.options.len(), 4);
        assert_eq!(q.prompt(), "Who was selected with the draft pick: B pick?");
    }

    #[test]
    fn small_dataset_yields_fewer_options() {
        let ds = fixtures::abcd();
        let pool = subject(&ds, "A");
        let mut rng = StdRng::seed_from_u64(9);
        // Teams are X, Y, Z: two distractors at most.
        let q = generate(&mut rng, &pool, &ds, Category::Team).unwrap();
        assert_eq!(q.options.len(), 3);
        assert_eq!(q.correct, Answer::from("X"));
        // Every other height is at least two inches from 5'10".
        let q = generate(&mut rng, &pool, &ds, Category::Height).unwrap();
        assert_eq!(q.options.len(), 4);
    }

    #[test]
    fn option_count_matches_available_distractors() {
        let ds = Dataset::new(vec![
            fixtures::player("A", "X", 25, "6'0\""),
            fixtures::player("B", "X", 26, "6'1\""),
        ]);
        let pool = subject(&ds, "A");
        let mut rng = StdRng::seed_from_u64(2);
        let q = generate(&mut rng, &pool, &ds, Category::Team).unwrap();
        assert_eq!(q.options, vec![Answer::from("X")]);
        let q = generate(&mut rng, &pool, &ds, Category::Age).unwrap();
        assert_eq!(q.options, vec![Answer::Years(25)]);
        let q = generate(&mut rng, &pool, &ds, Category::Height).unwrap();
        assert_eq!(q.options.len(), 1);
    }

    #[test]
    fn unparseable_subject_height_has_no_distractors() {
        let ds = Dataset::new(vec![
            fixtures::player("A", "X", 25, "6 feet"),
            fixtures::player("B", "Y", 30, "6'2\""),
        ]);
        let pool = subject(&ds, "A");
        let mut rng = StdRng::seed_from_u64(4);
        let q = generate(&mut rng, &pool, &ds, Category::Height).unwrap();
        assert_eq!(q.options, vec![Answer::from("6 feet")]);
    }

    #[test]
    fn empty_pool_is_an_error() {
        let ds = fixtures::abcd();
        let mut rng = StdRng::seed_from_u64(0);
        let err = generate(&mut rng, &[], &ds, Category::Team).unwrap_err();
        assert_eq!(err, QuizError::EmptyPool);
    }

    #[test]
    fn prompts_follow_category_copy() {
        let q = Question {
            category: Category::Team,
            subject: "A'ja Wilson".into(),
            player: "A'ja Wilson".into(),
            options: vec![Answer::from("Aces")],
            correct: Answer::from("Aces"),
        };
        assert_eq!(q.prompt(), "A'ja Wilson plays for what team?");

        let q = Question {
            category: Category::Experience,
            ..q
        };
        assert_eq!(q.prompt(), "What is the WNBA experience of A'ja Wilson?");

        let q = Question {
            category: Category::College,
            ..q
        };
        assert_eq!(q.prompt(), "What is the college/country of A'ja Wilson?");
    }

    #[test]
    fn resolve_choice_by_number_or_text() {
        let q = Question {
            category: Category::Team,
            subject: "A".into(),
            player: "A".into(),
            options: vec![Answer::from("Aces"), Answer::from("Sun"), Answer::from("Lynx")],
            correct: Answer::from("Sun"),
        };
        assert_eq!(q.resolve_choice("2"), Some(&Answer::from("Sun")));
        assert_eq!(q.resolve_choice(" lynx "), Some(&Answer::from("Lynx")));
        assert_eq!(q.resolve_choice("4"), None);
        assert_eq!(q.resolve_choice("Storm"), None);
    }
}
