// src/output.rs

use crate::error::Result;
use crate::model::HistoryEntry;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Where the JSON result set goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// `-` means standard output, anything else is a file path
    pub fn parse(value: &str) -> Self {
        if value == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(PathBuf::from(value))
        }
    }
}

/// Writes `entries` as a pretty-printed JSON array (2-space indent).
pub fn write_json(entries: &[HistoryEntry], target: &OutputTarget) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            let stdout = io::stdout();
            write_entries(entries, stdout.lock())
        }
        OutputTarget::File(path) => {
            write_entries(entries, BufWriter::new(File::create(path)?))?;
            tracing::info!("Wrote {} entries to {}", entries.len(), path.display());
            Ok(())
        }
    }
}

pub fn write_entries<W: Write>(entries: &[HistoryEntry], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, entries)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
