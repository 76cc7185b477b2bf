use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A line-level edit that needs a caret was attempted on an unselected line.
    #[error("line has no selection")]
    NoSelection,
    #[error("invalid state fragment: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("invalid state payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("text too large for the clipboard ({bytes} bytes, limit {limit})")]
    TooLarge { bytes: usize, limit: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
