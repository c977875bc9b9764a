//! Error types for each collaborator.

use thiserror::Error;

/// Conductor errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConductorError {
    /// The conductor's upstream source failed while producing work.
    #[error("source failed: {0}")]
    Source(String),

    /// The conductor could not accept the result of a completed electron.
    #[error("completion rejected: {0}")]
    Completion(String),

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Atom execution errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AtomError {
    /// The payload could not be understood by the atom.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The atom ran and failed.
    #[error("execution failed: {0}")]
    Failed(String),

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Registration source errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The source could not produce its registrations.
    #[error("registrations unavailable: {0}")]
    Unavailable(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
