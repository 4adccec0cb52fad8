//! Centralized error types for the engine
//!
//! All engine errors are represented by the `ChatLogError` enum.
//! Use `Result<T>` as shorthand for `std::result::Result<T, ChatLogError>`.

use std::fmt;
use std::path::PathBuf;

/// All engine errors
#[derive(Debug)]
pub enum ChatLogError {
    // === IO ===
    /// File system operation failed
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // === File naming ===
    /// Every candidate suffix for a derived log file name was taken.
    /// Exceeding the counter implies an essentially impossible file volume.
    FileNameExhausted { directory: PathBuf, base: String },
}

impl std::error::Error for ChatLogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for ChatLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, .. } => write!(f, "IO error: {}", path.display()),
            Self::FileNameExhausted { directory, base } => write!(
                f,
                "No free file name for {} in {}",
                base,
                directory.display()
            ),
        }
    }
}

/// Alias for Result with ChatLogError
pub type Result<T> = std::result::Result<T, ChatLogError>;
