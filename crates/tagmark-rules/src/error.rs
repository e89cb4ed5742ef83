//! Error types for rule loading and execution.

use std::path::PathBuf;

/// Error from executing a rule's transformation.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// Failed to spawn or communicate with the rule process.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The rule process exited with a failure status.
    #[error("exit status {status}: {stderr}")]
    Failed {
        /// Process exit code (`-1` when terminated by a signal).
        status: i32,
        /// Captured stderr, trimmed.
        stderr: String,
    },

    /// The rule produced output that is not valid UTF-8.
    #[error("output is not valid UTF-8")]
    InvalidUtf8,
}

/// Error from loading a rule-definition unit or scanning the rules directory.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// I/O error reading the rules directory or a unit.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The unit path is not a regular file.
    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    /// The unit is not executable and cannot serve as a transform.
    #[error("unit is not executable: {}", .0.display())]
    NotExecutable(PathBuf),

    /// The unit's filename stem is not a usable rule name.
    #[error("invalid rule name: {}", .0.display())]
    InvalidName(PathBuf),
}
