//! Error types for the shell.
//!
//! The orchestration core is synchronous in-memory decision logic, so the
//! recoverable error surface is small: configuration loading and little
//! else. Contract violations (see
//! [`crate::screen::ScreenController::handle_url_entered`]) panic instead —
//! they are programmer errors, not runtime conditions. Expected absences
//! (no mounted settings surface, no published snapshot yet) are plain
//! no-ops and never reach this type.

use std::path::PathBuf;

use thiserror::Error;

pub type ShellResult<T> = Result<T, ShellError>;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("failed to read config at {path}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
