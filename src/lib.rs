//! Reconstructs the history of one object's orbital element set (TLE) from
//! the successive versions of a data file committed to a git repository.
//!
//! The pipeline walks the commits that touched the file oldest first, parses
//! each snapshot into records, keeps the target object's record and drops
//! any record text already emitted earlier in the run.

pub mod dedup;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod walker;

pub use error::{Error, ParseError, Result};
pub use model::{HistoryEntry, Query, TimeBounds};
pub use pipeline::{collect_history, extract};
pub use walker::HistoryWalker;
