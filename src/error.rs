// src/error.rs

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fatal failures of an extraction run. An object missing from a snapshot
/// is not one of them; that case never surfaces as an error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("branch '{0}' not found")]
    BranchNotFound(String),

    #[error("malformed snapshot at revision {revision}: {source}")]
    Parse {
        revision: String,
        #[source]
        source: ParseError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ways a snapshot's content can fail to split into records
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("content is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("record {index} has {lines} line(s), expected 3")]
    IncompleteRecord { index: usize, lines: usize },

    #[error("record {index} has no identifier token on its last line")]
    MissingIdentifier { index: usize },
}
