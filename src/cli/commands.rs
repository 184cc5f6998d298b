use crate::config::AppConfig;
use crate::core::{normalize_truck_fill, ErrorEntry, Metric, RecognitionEntry};
use crate::error::{BoardError, BoardResult};
use crate::state::AppState;
use chrono::{Local, NaiveDate};
use colored::Colorize;
use std::path::PathBuf;

/// Resolve the config document path: explicit flag, or the platform default.
fn config_path(config: Option<PathBuf>) -> PathBuf {
    config.unwrap_or_else(AppConfig::config_file)
}

/// Parse a CLI date in ISO (2024-01-08) or US (01/08/2024) form.
pub fn parse_cli_date(input: &str) -> BoardResult<NaiveDate> {
    let s = input.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .map_err(|_| {
            BoardError::Validation(format!(
                "unparsable date '{}' (expected YYYY-MM-DD or MM/DD/YYYY)",
                input
            ))
        })
}

/// Parse one `--set "Label=value"` pair.
fn parse_set(pair: &str) -> BoardResult<(Metric, String)> {
    let (label, value) = pair.split_once('=').ok_or_else(|| {
        BoardError::Validation(format!("expected 'Metric Label=value', got '{}'", pair))
    })?;
    Ok((Metric::from_label(label)?, value.trim().to_string()))
}

/// Convert a 1-based column index to its spreadsheet letter (3 → C).
fn column_letter(column: u32) -> String {
    let mut result = String::new();
    let mut num = column as usize - 1;
    loop {
        let remainder = num % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if num < 26 {
            break;
        }
        num = num / 26 - 1;
    }
    result
}

/// Execute the submit command: write metric values into the date's column.
pub fn submit(
    file: PathBuf,
    date: String,
    sets: Vec<String>,
    dry_run: bool,
    config: Option<PathBuf>,
) -> BoardResult<()> {
    println!("{}", "📋 Tierboard - Submitting daily metrics".bold().green());
    println!("   File: {}", file.display());

    let date = parse_cli_date(&date)?;
    println!("   Date: {}", date.format("%d-%b-%Y").to_string().cyan());
    println!();

    let mut state = AppState::new(config_path(config));
    state.load(&file)?;
    state.select_date(date);

    for pair in &sets {
        let (metric, value) = parse_set(pair)?;
        state.edit_field(metric, value);
    }

    if state.pending().is_empty() {
        return Err(BoardError::Validation(
            "nothing to submit: pass at least one --set 'Metric Label=value'".to_string(),
        ));
    }

    if dry_run {
        println!("{}", "📋 DRY RUN MODE - No changes will be written\n".yellow());
        for (metric, value) in state.pending() {
            let shown = match metric {
                Metric::TruckFillPercent => normalize_truck_fill(value)?,
                _ => value.clone(),
            };
            println!("   {} (row {}) = {}", metric.label().bright_blue(), metric.row(), shown);
        }
        println!("\n{}", "📋 Dry run complete - no changes written".yellow());
        return Ok(());
    }

    let column = state.save()?;
    println!(
        "{} column {}",
        "✅ Metrics written to".bold().green(),
        column_letter(column).bold()
    );
    Ok(())
}

/// Execute the show command: print the recorded values for a date.
pub fn show(file: PathBuf, date: String, config: Option<PathBuf>) -> BoardResult<()> {
    let date = parse_cli_date(&date)?;

    let mut state = AppState::new(config_path(config));
    state.load(&file)?;
    let values = state.metrics_for(date)?;

    println!(
        "{} {}",
        "📊 Metrics for".bold().green(),
        date.format("%d-%b-%Y").to_string().cyan()
    );
    for (metric, value) in values {
        let shown = if value.is_empty() {
            "-".dimmed().to_string()
        } else {
            value.display().bold().to_string()
        };
        println!("   {:<24} {}", metric.label().bright_blue(), shown);
    }
    Ok(())
}

/// Execute the recognize command: append a row to the Recognitions sheet.
pub fn recognize(
    file: PathBuf,
    first_name: String,
    last_name: String,
    recognition: String,
    date: String,
    config: Option<PathBuf>,
) -> BoardResult<()> {
    let entry = RecognitionEntry {
        first_name,
        last_name,
        recognition,
        date,
    };

    let mut state = AppState::new(config_path(config));
    state.load(&file)?;
    let row = state.add_recognition(&entry)?;

    println!(
        "{} {} {} (row {})",
        "✅ Recognition recorded for".bold().green(),
        entry.first_name.bold(),
        entry.last_name.bold(),
        row
    );
    Ok(())
}

/// Execute the track-error command: append a row to the Error Tracker sheet.
pub fn track_error(
    file: PathBuf,
    date: String,
    category: String,
    description: String,
    entered_by: String,
    config: Option<PathBuf>,
) -> BoardResult<()> {
    let entry = ErrorEntry {
        date,
        category,
        description,
        entered_by,
    };

    let mut state = AppState::new(config_path(config));
    state.load(&file)?;
    let row = state.add_error(&entry)?;

    println!("{} (row {})", "✅ Error logged".bold().green(), row);
    Ok(())
}

/// Execute the counter command: show or adjust the days-without-incident
/// streak persisted in the config document.
pub fn counter(
    roll: bool,
    reset: bool,
    set: Option<i64>,
    config: Option<PathBuf>,
) -> BoardResult<()> {
    let mut state = AppState::new(config_path(config));
    let today = Local::now().date_naive();

    if reset {
        state.config.incident.reset(today);
        println!("{}", "🔁 Counter reset to 0".yellow());
    } else if let Some(value) = set {
        if value < 0 {
            return Err(BoardError::Validation(format!(
                "counter cannot be negative: {}",
                value
            )));
        }
        state.config.incident.set(value, today);
        println!("✏️  Counter set to {}", value.to_string().bold());
    } else if roll {
        let added = state.config.incident.roll_forward(today);
        println!("📆 {} day(s) added since last update", added.to_string().bold());
    }

    println!(
        "{} {} (as of {})",
        "🦺 Days without incident:".bold().green(),
        state.config.incident.counter.to_string().bold(),
        state.config.incident.last_date.format("%d-%b-%Y")
    );

    state.save_config()?;
    Ok(())
}
