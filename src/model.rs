// src/model.rs

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use git2::Oid;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::path::PathBuf;

/// Object identifier (the NORAD catalog number for TLE data)
pub type ObjectId = String;

/// Maps an object identifier to its 3-line record text
pub type RecordMap = HashMap<ObjectId, String>;

/// The tracked file's content as of one revision
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub timestamp: DateTime<FixedOffset>,
    pub revision: Oid,
    pub content: Vec<u8>,
}

/// One object's record at one revision; the unit flowing through the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    #[serde(rename = "date", serialize_with = "serialize_rfc3339")]
    pub timestamp: DateTime<FixedOffset>,
    #[serde(rename = "sha")]
    pub revision: String,
    #[serde(rename = "tle")]
    pub record: String,
}

fn serialize_rfc3339<S: Serializer>(
    timestamp: &DateTime<FixedOffset>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&timestamp.to_rfc3339())
}

/// Optional time window. Revisions strictly before `start` or strictly
/// after `end` are excluded; the boundary instants themselves are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeBounds {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TimeBounds {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    /// Builds bounds from calendar days: `start` opens at 00:00:00 UTC and
    /// `end` closes at the last nanosecond of its day, so both days are included.
    pub fn from_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let start = start
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Utc.from_utc_datetime(&dt));
        let end = end
            .and_then(|d| d.and_hms_nano_opt(23, 59, 59, 999_999_999))
            .map(|dt| Utc.from_utc_datetime(&dt));
        Self { start, end }
    }

    pub fn contains<Tz: TimeZone>(&self, timestamp: &DateTime<Tz>) -> bool {
        if let Some(start) = &self.start {
            if timestamp < start {
                return false;
            }
        }
        if let Some(end) = &self.end {
            if timestamp > end {
                return false;
            }
        }
        true
    }

    /// True when both bounds are set and no instant can satisfy them
    pub fn is_empty(&self) -> bool {
        matches!((&self.start, &self.end), (Some(s), Some(e)) if s > e)
    }
}

/// Everything one extraction run needs to know
#[derive(Debug, Clone)]
pub struct Query {
    pub branch: String,
    pub path: PathBuf,
    pub object_id: ObjectId,
    pub bounds: TimeBounds,
}
