//! flashcourt CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "flashcourt", version, about = "WNBA roster flashcard trainer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the quiz in the terminal
    Play {
        /// Roster CSV: an http(s) URL or a file path
        #[arg(long)]
        source: Option<String>,

        /// Quiz mode: leveled or classic
        #[arg(long)]
        mode: Option<String>,

        /// RNG seed for a reproducible quiz
        #[arg(long)]
        seed: Option<u64>,

        /// Write a JSON session report here on exit
        #[arg(long)]
        summary_out: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Load the roster and print statistics about it
    Inspect {
        /// Roster CSV: an http(s) URL or a file path
        #[arg(long)]
        source: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a local roster CSV
    Validate {
        /// Path to the CSV file
        #[arg(long)]
        file: PathBuf,
    },

    /// Show missed questions from a saved session report
    Review {
        /// Session report JSON written by `play --summary-out`
        #[arg(long)]
        report: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print the level table
    Levels,

    /// Create a starter config
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flashcourt=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            source,
            mode,
            seed,
            summary_out,
            config,
        } => commands::play::execute(source, mode, seed, summary_out, config).await,
        Commands::Inspect { source, config } => commands::inspect::execute(source, config).await,
        Commands::Validate { file } => commands::validate::execute(file),
        Commands::Review { report, format } => commands::review::execute(report, format),
        Commands::Levels => commands::levels::execute(),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
