//! The `flashcourt review` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use flashcourt_core::report::SessionReport;
use flashcourt_core::session::MissedQuestion;

pub fn execute(report_path: PathBuf, format: String) -> Result<()> {
    let report = SessionReport::load_json(&report_path)?;

    match format.as_str() {
        "json" => {
            let missed: Vec<&MissedQuestion> = report.all_missed().collect();
            println!("{}", serde_json::to_string_pretty(&missed)?);
        }
        "text" => print_report(&report),
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}

fn print_report(report: &SessionReport) {
    println!(
        "Session {} ({} mode, started {})",
        report.session_id,
        report.mode,
        report.started_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!("Reached level {}", report.level);

    let mut rounds = Table::new();
    rounds.set_header(vec!["Round", "Level", "Score", "Missed", "Status"]);
    let closed = report.rounds.iter().map(|r| (r, "closed"));
    let open = report.in_progress.iter().map(|r| (r, "in progress"));
    for (i, (round, status)) in closed.chain(open).enumerate() {
        let status = if round.is_perfect() { "perfect" } else { status };
        rounds.add_row(vec![
            Cell::new(i + 1),
            Cell::new(round.level),
            Cell::new(format!("{}/{}", round.score, round.answered)),
            Cell::new(round.missed.len()),
            Cell::new(status),
        ]);
    }
    println!("\n{rounds}");
    println!("Total correct: {}", report.total_correct());

    let missed: Vec<&MissedQuestion> = report.all_missed().collect();
    if missed.is_empty() {
        println!("\nNo missed questions.");
    } else {
        println!("\n{}", missed_table(missed));
    }
}

/// Table of missed questions with the chosen and the correct answer.
pub fn missed_table<'a>(missed: impl IntoIterator<Item = &'a MissedQuestion>) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Your Answer", "Correct Answer"]);
    for (i, m) in missed.into_iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&m.question),
            Cell::new(&m.your_answer),
            Cell::new(&m.correct_answer),
        ]);
    }
    table
}
