//! Error types shared across the game.

use thiserror::Error;

/// Result type alias for circuit operations.
pub type Result<T> = std::result::Result<T, CircuitError>;

/// Failures of the logic-gate circuit core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CircuitError {
    /// Bad slot or trail sizing at puzzle setup.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A slot or node index outside the valid range.
    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// The offending index
        index: usize,
        /// Length of the indexed collection
        len: usize,
    },

    /// Wiring topology does not fit the assembly or trail it is applied to.
    #[error("wiring mismatch: {0}")]
    WiringMismatch(String),
}

/// Failures reading or validating the persisted configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported time limit: {0} minutes")]
    TimeLimit(u32),
}

/// Failures of the chat assistant collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("assistant unavailable: {0}")]
    Unavailable(String),

    /// The backend dropped the reply channel without answering.
    #[error("assistant went away before replying")]
    Disconnected,
}
