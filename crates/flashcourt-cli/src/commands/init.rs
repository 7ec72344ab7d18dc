//! The `flashcourt init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("flashcourt.toml").exists() {
        println!("flashcourt.toml already exists, skipping.");
    } else {
        std::fs::write("flashcourt.toml", SAMPLE_CONFIG)?;
        println!("Created flashcourt.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point `source` at your roster CSV (URL or file path)");
    println!("  2. Run: flashcourt inspect");
    println!("  3. Run: flashcourt play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# flashcourt configuration

# Roster CSV: an http(s) URL or a local path. ${VAR} references are expanded.
source = "https://docs.google.com/spreadsheets/d/e/2PACX-1vSo78o_XcjeBYWvYnDBaSolSgf6JAGvBCBSNipn9iLe7KsZkfLI3XCGbVb90oT0wsD57K6h7lR1H5wo/pub?output=csv"

# "leveled" (ten-question rounds, perfect rounds level up) or "classic"
mode = "leveled"

# Uncomment for a reproducible quiz
# seed = 42

request_timeout_secs = 30
"#;
