//! Persisted application config: a small JSON document holding the last-used
//! workbook paths, window geometry, and the days-without-incident counter.
//!
//! Loading is forgiving on purpose: a missing or corrupt file is replaced by
//! defaults, and missing keys are filled in field by field, so old documents
//! keep working as the schema grows.

use crate::error::BoardResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Current document schema version, written on every save.
pub const CONFIG_VERSION: u32 = 1;

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_geometry() -> String {
    "400x300".to_string()
}

fn default_counter_date() -> NaiveDate {
    chrono::Local::now().date_naive()
}

//==============================================================================
// Days-without-incident counter
//==============================================================================

/// `{counter, last_date}` pair: the streak and the day it was last advanced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentCounter {
    #[serde(default)]
    pub counter: i64,
    #[serde(default = "default_counter_date")]
    pub last_date: NaiveDate,
}

impl Default for IncidentCounter {
    fn default() -> Self {
        Self {
            counter: 0,
            last_date: default_counter_date(),
        }
    }
}

impl IncidentCounter {
    /// Add the calendar days elapsed since the last advance. Returns the
    /// number of days added; a clock that moved backwards adds nothing.
    pub fn roll_forward(&mut self, today: NaiveDate) -> i64 {
        let elapsed = (today - self.last_date).num_days();
        if elapsed <= 0 {
            return 0;
        }
        self.counter += elapsed;
        self.last_date = today;
        elapsed
    }

    /// Reset the streak to zero as of `today` (an incident happened).
    pub fn reset(&mut self, today: NaiveDate) {
        self.counter = 0;
        self.last_date = today;
    }

    /// Manual override of the streak value.
    pub fn set(&mut self, value: i64, today: NaiveDate) {
        self.counter = value;
        self.last_date = today;
    }
}

//==============================================================================
// Application config document
//==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Most recently saved workbook.
    #[serde(default)]
    pub last_file: Option<PathBuf>,

    #[serde(default = "default_geometry")]
    pub window_geometry: String,

    /// Named workbook paths carried over from the old forms.
    #[serde(default)]
    pub boxing_tier_file: Option<PathBuf>,

    #[serde(default)]
    pub boxing_log_file: Option<PathBuf>,

    #[serde(default)]
    pub incident: IncidentCounter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            last_file: None,
            window_geometry: default_geometry(),
            boxing_tier_file: None,
            boxing_log_file: None,
            incident: IncidentCounter::default(),
        }
    }
}

impl AppConfig {
    /// Standard configuration directory for the platform.
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("tierboard")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".tierboard")
        }
    }

    /// Full path of the config document.
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("tierboard.json")
    }

    /// Load from `path`; a missing or unreadable document yields defaults.
    pub fn load(path: &Path) -> AppConfig {
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "corrupt config, using defaults");
                    AppConfig::default()
                }
            },
            Err(_) => AppConfig::default(),
        }
    }

    /// Write the document back, pretty-printed, stamping the current version.
    pub fn save(&self, path: &Path) -> BoardResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut doc = self.clone();
        doc.version = CONFIG_VERSION;
        fs::write(path, serde_json::to_string_pretty(&doc)?)?;
        Ok(())
    }
}
