//! Error types for the tactix crate

use thiserror::Error;

/// Main error type for the tactix crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid input '{input}': expected a cell number in the declared range")]
    InvalidInput { input: String },

    #[error("position {position} is out of bounds (must be 0-8)")]
    OutOfBounds { position: usize },

    #[error("illegal move: position {position} is already occupied")]
    IllegalMove { position: usize },

    #[error("invalid board string length: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
