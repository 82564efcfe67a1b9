// error.rs - Error types for the board and the pattern library

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("board must have at least one row and one column")]
    Empty,

    #[error("board {width}x{height} is too large")]
    TooLarge { width: usize, height: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    NotRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("expected {expected} cells, got {found}")]
    SizeMismatch { expected: usize, found: usize },

    #[error("invalid cell state {0} (expected 0 or 1)")]
    InvalidState(u8),
}

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("failed to read pattern file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed pattern data")]
    Json(#[from] serde_json::Error),

    #[error("pattern not found: {0}")]
    Unknown(String),

    #[error("pattern {0} spans more rows or columns than can be addressed")]
    TooWide(String),
}
