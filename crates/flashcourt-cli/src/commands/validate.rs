//! The `flashcourt validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use flashcourt_data::{parse_dataset, validate_dataset};

pub fn execute(path: PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let (dataset, report) = parse_dataset(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    println!("Dataset: {} ({} players)", path.display(), dataset.len());
    println!("  {report}");

    let warnings = validate_dataset(&dataset);
    for w in &warnings {
        println!("  WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Dataset valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
