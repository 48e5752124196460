//! Engine error types
//!
//! Every failure crossing a task boundary is an [`EngineError`] carrying a
//! [`ErrorKind`] classification. Domain errors are user-meaningful and are
//! reported verbatim; generic errors are stack-level failures reported with
//! the run's configuration snapshot attached.

use std::path::PathBuf;
use thiserror::Error;

/// Classification used by the reporting path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Recognized, user-meaningful failure (bad configuration, strategy misuse)
    Domain,
    /// Everything else: I/O, task panics, consumer faults
    Generic,
}

/// Errors produced by the replay engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid or incomplete configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A tick source could not be opened or read
    #[error("tick source {path:?}: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A symbol directory is missing from the tick data folder
    #[error("no tick data directory for symbol {0}")]
    MissingSymbol(String),

    /// The consumer or its strategy failed
    #[error("consumer failed: {0}")]
    Consumer(String),

    /// A request with the same symbol + open date is already active
    #[error("duplicate trade request for key {0}")]
    DuplicateRequest(String),

    /// Illegal trade request state transition
    #[error("trade request {key}: {reason}")]
    RequestState { key: String, reason: String },

    /// A pipeline task panicked or was aborted
    #[error("pipeline task failed: {0}")]
    Task(String),
}

impl EngineError {
    /// Kind used to pick the reporting format
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Config(_)
            | EngineError::DuplicateRequest(_)
            | EngineError::RequestState { .. } => ErrorKind::Domain,
            EngineError::Source { .. }
            | EngineError::MissingSymbol(_)
            | EngineError::Consumer(_)
            | EngineError::Task(_) => ErrorKind::Generic,
        }
    }
}
