// src/cli.rs

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// NORAD ID of the satellite
    #[arg(long)]
    pub norad_id: String,

    /// Output file, or `-` for standard output
    #[arg(long, default_value = "-")]
    pub output: String,

    /// Keep results from this day onwards. Example: 2025-08-01
    #[arg(long, value_parser = parse_date)]
    pub start: Option<NaiveDate>,

    /// Keep results up to and including this day. Example: 2025-08-01
    #[arg(long, value_parser = parse_date)]
    pub end: Option<NaiveDate>,

    /// Show a progress bar while scanning revisions
    #[arg(long = "progress-bar", overrides_with = "no_progress_bar")]
    progress_bar: bool,

    /// Hide the progress bar
    #[arg(long = "no-progress-bar", overrides_with = "progress_bar")]
    no_progress_bar: bool,

    /// Path inside the git repository holding the TLE data
    #[arg(long, env = "TLE_HISTORY_REPO", default_value = ".")]
    pub repo: PathBuf,

    /// Branch to scan
    #[arg(long, env = "TLE_HISTORY_BRANCH", default_value = "main")]
    pub branch: String,

    /// Tracked file, relative to the repository root
    #[arg(long, env = "TLE_HISTORY_PATH", default_value = "raw-data/tle-data.txt")]
    pub path: PathBuf,
}

impl Args {
    pub fn show_progress(&self) -> bool {
        self.progress_bar || !self.no_progress_bar
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got '{value}': {e}"))
}
