// src/error.rs

use thiserror::Error;

/// Errors raised by grid buffers and the operations that address them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("attempt to write an unmatching buffer into the swapchain: expected side {expected}, found {found}")]
    SizeMismatch { expected: usize, found: usize },

    #[error("coordinate ({x}, {y}) is outside a {size}x{size} grid")]
    OutOfBounds { x: i32, y: i32, size: usize },

    #[error("map size must be positive, got {0}")]
    InvalidSize(usize),
}

/// Errors raised while loading or validating generator settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Errors raised by an editing session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,
}
