//! Error types for grid_search

use thiserror::Error;

/// grid_search error type
#[derive(Error, Debug)]
pub enum GridSearchError {
    #[error("Invalid grid: row {row} has {found} cells, expected {expected}")]
    InvalidGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid grid: unexpected character {found:?} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, found: char },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read grid file: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GridSearchError>;
