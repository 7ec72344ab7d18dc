//! The `flashcourt inspect` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use flashcourt_core::model::{height_to_inches, Dataset, TextColumn};
use flashcourt_data::{source_for, try_load, validate_dataset};

const SAMPLE_ROWS: usize = 5;

pub async fn execute(source: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = super::resolve_config(config_path.as_deref(), source, None, None)?;
    let source = source_for(&config.source, config.request_timeout_secs)?;

    println!("Source: {}", source.describe());
    let (dataset, report) = try_load(source.as_ref()).await?;
    println!("{report}");

    println!("\n{}", column_table(&dataset));
    println!("\n{}", sample_table(&dataset));

    for warning in validate_dataset(&dataset) {
        println!("WARNING: {}", warning.message);
    }

    Ok(())
}

fn column_table(dataset: &Dataset) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Column", "Distinct Values"]);
    table.add_row(vec![Cell::new("Player"), Cell::new(dataset.len())]);
    table.add_row(vec![
        Cell::new("Age"),
        Cell::new(dataset.distinct_ages().len()),
    ]);
    let columns = [
        ("Team", TextColumn::Team),
        ("Height", TextColumn::Height),
        ("Experience", TextColumn::Experience),
        ("College", TextColumn::College),
        ("Position", TextColumn::Position),
        ("Draft Pick", TextColumn::DraftPick),
    ];
    for (name, column) in columns {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(dataset.distinct_text(column).len()),
        ]);
    }
    let unreadable = dataset
        .records()
        .iter()
        .filter(|r| height_to_inches(&r.height).is_none())
        .count();
    table.add_row(vec![Cell::new("Unreadable heights"), Cell::new(unreadable)]);
    table
}

fn sample_table(dataset: &Dataset) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Player",
        "Team",
        "Age",
        "Ht",
        "Exp",
        "College",
        "Pos",
        "Draft Pick",
    ]);
    for r in dataset.records().iter().take(SAMPLE_ROWS) {
        table.add_row(vec![
            Cell::new(&r.player),
            Cell::new(&r.team),
            Cell::new(r.age),
            Cell::new(&r.height),
            Cell::new(&r.experience),
            Cell::new(&r.college),
            Cell::new(&r.position),
            Cell::new(&r.draft_pick),
        ]);
    }
    table
}
