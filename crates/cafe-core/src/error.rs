//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CafeError` where a
//! configuration or parse failure crosses a crate boundary.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `cafe-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CafeError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `cafe-core`.
pub type CafeResult<T> = Result<T, CafeError>;
