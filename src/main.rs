use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tierboard::cli;
use tierboard::error::BoardResult;

#[derive(Parser)]
#[command(name = "tierboard")]
#[command(about = "Daily tier-board workbook: per-day metric columns, append-only logs.")]
#[command(long_about = "Tierboard - daily operations tier-board workbook engine

The 'Data' sheet grows one date column per day (row 1, columns C onward);
rows 2-18 hold the 17 fixed metrics. Missing calendar days are backfilled
automatically when a date is submitted.

COMMANDS:
  submit      - Write metric values into a date's column
  show        - Print the recorded metrics for a date
  recognize   - Append a row to the Recognitions sheet
  track-error - Append a row to the Error Tracker sheet
  counter     - Show or adjust the days-without-incident streak

EXAMPLES:
  tierboard submit board.xlsx --date 2024-01-08 --set 'Truck Fill %=24' --set 'Errors=0'
  tierboard show board.xlsx --date 2024-01-08
  tierboard recognize board.xlsx --first-name Ada --last-name Lovelace \\
      --recognition 'Caught a mislabeled pallet' --date 08-Jan
  tierboard counter --roll")]
#[command(version)]
struct Cli {
    /// Path to the JSON config document
    #[arg(long, global = true, env = "TIERBOARD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write metric values into the column for a date
    Submit {
        /// Path to the .xlsx workbook
        file: PathBuf,

        /// Target date (YYYY-MM-DD or MM/DD/YYYY); the column is created
        /// (with calendar backfill) if it does not exist yet
        #[arg(short, long)]
        date: String,

        /// Metric assignment, repeatable: --set 'Truck Fill %=24'
        #[arg(short, long = "set", value_name = "LABEL=VALUE")]
        sets: Vec<String>,

        /// Preview changes without writing the workbook
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Print the recorded metric values for a date
    Show {
        /// Path to the .xlsx workbook
        file: PathBuf,

        /// Date to display (YYYY-MM-DD or MM/DD/YYYY)
        #[arg(short, long)]
        date: String,
    },

    /// Append an employee recognition to the Recognitions sheet
    Recognize {
        /// Path to the .xlsx workbook
        file: PathBuf,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        /// What the person is being recognized for
        #[arg(long)]
        recognition: String,

        /// Date text recorded with the entry
        #[arg(long)]
        date: String,
    },

    /// Append an entry to the Error Tracker sheet
    TrackError {
        /// Path to the .xlsx workbook
        file: PathBuf,

        /// Date text recorded with the entry
        #[arg(long)]
        date: String,

        /// Error category (e.g. Mispick)
        #[arg(long)]
        category: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        entered_by: String,
    },

    /// Show or adjust the days-without-incident counter
    Counter {
        /// Add the calendar days elapsed since the last update
        #[arg(long)]
        roll: bool,

        /// Reset the streak to zero (an incident happened)
        #[arg(long, conflicts_with_all = ["roll", "set"])]
        reset: bool,

        /// Manually override the streak value
        #[arg(long, conflicts_with = "roll")]
        set: Option<i64>,
    },
}

fn run(cli: Cli) -> BoardResult<()> {
    match cli.command {
        Commands::Submit {
            file,
            date,
            sets,
            dry_run,
        } => cli::submit(file, date, sets, dry_run, cli.config),

        Commands::Show { file, date } => cli::show(file, date, cli.config),

        Commands::Recognize {
            file,
            first_name,
            last_name,
            recognition,
            date,
        } => cli::recognize(file, first_name, last_name, recognition, date, cli.config),

        Commands::TrackError {
            file,
            date,
            category,
            description,
            entered_by,
        } => cli::track_error(file, date, category, description, entered_by, cli.config),

        Commands::Counter { roll, reset, set } => cli::counter(roll, reset, set, cli.config),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // The single user-facing error boundary: every Validation, Resource, and
    // Configuration error ends up here as one message and a non-zero exit.
    if let Err(e) = run(Cli::parse()) {
        eprintln!("{} {}", "❌ Error:".red().bold(), e);
        std::process::exit(1);
    }
}
