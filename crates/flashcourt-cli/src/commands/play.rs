//! The `flashcourt play` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use flashcourt_core::level::{LevelConfig, QuizMode};
use flashcourt_core::report::SessionReport;
use flashcourt_core::session::{Feedback, Phase, QuizSession, RoundOutcome};
use flashcourt_core::Question;
use flashcourt_data::{source_for, DatasetCache, LoadedDataset};

use super::review::missed_table;

const BAR_WIDTH: usize = 20;
const ANSWER_PROMPT: &str = "Your answer (m: missed, q: quit) > ";

pub async fn execute(
    source: Option<String>,
    mode: Option<String>,
    seed: Option<u64>,
    summary_out: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::resolve_config(config_path.as_deref(), source, mode, seed)?;

    let cache = DatasetCache::new(source_for(&config.source, config.request_timeout_secs)?);
    let loaded = cache.get().await;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = QuizSession::new(config.mode, &mut rng);
    tracing::debug!(session = %session.id(), mode = %config.mode, "starting quiz");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run(&mut session, loaded, &mut rng, stdin.lock(), stdout.lock())?;

    if let Some(path) = summary_out {
        SessionReport::from_session(&session).save_json(&path)?;
        eprintln!("Session report saved to: {}", path.display());
    }

    Ok(())
}

/// Drive a session from line-oriented input until the player quits or the
/// input runs out.
pub fn run<R, I, W>(
    session: &mut QuizSession,
    loaded: &LoadedDataset,
    rng: &mut R,
    mut input: I,
    mut out: W,
) -> Result<()>
where
    R: Rng + ?Sized,
    I: BufRead,
    W: Write,
{
    if !loaded.is_available() {
        writeln!(out, "No data found! Please check the dataset source.")?;
        if let Some(warning) = &loaded.warning {
            writeln!(out, "{warning}")?;
        }
        return Ok(());
    }
    let dataset = loaded.dataset.as_ref();

    writeln!(
        out,
        "WNBA Flashcard Trainer ({} players, {} mode)",
        dataset.len(),
        session.mode()
    )?;
    if session.mode() == QuizMode::Leveled {
        writeln!(out, "{}", LevelConfig::for_level(session.level()).intro)?;
    }

    loop {
        if let &Phase::Complete {
            score,
            round_length,
        } = session.phase()
        {
            writeln!(out, "\nQuiz Complete!")?;
            writeln!(out, "Your final score: {score} out of {round_length}")?;
            let Some(command) =
                read_line(&mut input, &mut out, "[r]estart, [m]issed questions, [q]uit > ")?
            else {
                return Ok(());
            };
            match command.to_lowercase().as_str() {
                "r" | "restart" => session.restart(rng),
                "m" | "missed" => print_missed(&mut out, session)?,
                "q" | "quit" => return Ok(()),
                other => writeln!(out, "Unknown command: {other}")?,
            }
            continue;
        }

        let question = session.next_question(dataset, rng)?.clone();
        print_question(&mut out, session, &question)?;

        let choice = loop {
            let Some(line) = read_line(&mut input, &mut out, ANSWER_PROMPT)? else {
                return Ok(());
            };
            if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
                return Ok(());
            }
            if line.eq_ignore_ascii_case("m") || line.eq_ignore_ascii_case("missed") {
                print_missed(&mut out, session)?;
                continue;
            }
            match question.resolve_choice(&line) {
                Some(answer) => break answer.clone(),
                None => writeln!(
                    out,
                    "Pick one of the options 1-{} or type its text.",
                    question.options.len()
                )?,
            }
        };

        let feedback = session.answer(&choice, rng)?;
        print_feedback(&mut out, session, &feedback)?;
    }
}

fn print_question<W: Write>(out: &mut W, session: &QuizSession, question: &Question) -> Result<()> {
    writeln!(out)?;
    match session.mode() {
        QuizMode::Leveled => writeln!(
            out,
            "Level {} | Question {} of {} [{}]",
            session.level(),
            session.question_number(),
            session.round_length(),
            question.category
        )?,
        QuizMode::Classic => writeln!(
            out,
            "Question {} of {} [{}]",
            session.question_number(),
            session.round_length(),
            question.category
        )?,
    }
    writeln!(out, "{}", question.prompt())?;
    for (i, option) in question.options.iter().enumerate() {
        writeln!(out, "  {}. {option}", i + 1)?;
    }
    Ok(())
}

fn print_feedback<W: Write>(out: &mut W, session: &QuizSession, feedback: &Feedback) -> Result<()> {
    if feedback.correct {
        writeln!(out, "Correct!")?;
    } else {
        writeln!(
            out,
            "Incorrect. The correct answer was: {}",
            feedback.correct_answer
        )?;
    }
    writeln!(
        out,
        "Current Score: {} / {}",
        feedback.score, feedback.answered
    )?;
    writeln!(
        out,
        "{}",
        progress_bar(feedback.answered, session.round_length())
    )?;

    match feedback.outcome {
        Some(RoundOutcome::LevelUp { from, to }) => {
            writeln!(out, "\nPerfect round! Level {from} -> Level {to}")?;
            writeln!(out, "{}", LevelConfig::for_level(to).intro)?;
        }
        Some(RoundOutcome::Mastered) => {
            writeln!(
                out,
                "\nPerfect round at the top level! A new round begins."
            )?;
        }
        Some(RoundOutcome::Finished { .. }) | None => {}
    }
    Ok(())
}

fn print_missed<W: Write>(out: &mut W, session: &QuizSession) -> Result<()> {
    if session.missed().is_empty() {
        writeln!(out, "No missed questions.")?;
    } else {
        writeln!(out, "{}", missed_table(session.missed()))?;
    }
    Ok(())
}

fn progress_bar(done: usize, total: usize) -> String {
    let filled = (done * BAR_WIDTH).checked_div(total).unwrap_or(0).min(BAR_WIDTH);
    format!(
        "[{}{}] {done}/{total}",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}

/// Prompt and read one trimmed line; `None` on end of input.
fn read_line<I: BufRead, W: Write>(
    input: &mut I,
    out: &mut W,
    prompt: &str,
) -> Result<Option<String>> {
    loop {
        write!(out, "{prompt}")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(None);
        }
        let line = line.trim();
        if !line.is_empty() {
            return Ok(Some(line.to_string()));
        }
    }
}
