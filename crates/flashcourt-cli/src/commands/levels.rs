//! The `flashcourt levels` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use flashcourt_core::level::{LevelConfig, LEVELS};

pub fn execute() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Level", "Team", "Fixed", "Random", "Height", "Intro"]);

    for config in &LEVELS {
        table.add_row(vec![
            Cell::new(config.level),
            Cell::new(config.team_questions),
            Cell::new(fixed_summary(config)),
            Cell::new(config.random_slots),
            Cell::new(if config.height_unlocked { "yes" } else { "no" }),
            Cell::new(config.intro),
        ]);
    }

    println!("{table}");
    println!("A perfect round moves you up one level.");
    Ok(())
}

fn fixed_summary(config: &LevelConfig) -> String {
    if config.fixed.is_empty() {
        return "-".to_string();
    }
    config
        .fixed
        .iter()
        .map(|(category, count)| format!("{count} {category}"))
        .collect::<Vec<_>>()
        .join(", ")
}
