//! Work units and the results recorded for them.

use crate::id::{AtomId, ConductorId, ElectronId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unit of work: an opaque payload addressed to a handler type.
///
/// Electrons are immutable once built. Ownership moves from the conductor
/// that produced it, through the engine, to the atom that executes it.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Electron {
    /// Identifier of this unit, echoed back in [`Properties`].
    pub id: ElectronId,
    /// The handler type that must process this unit.
    pub atom: AtomId,
    /// Opaque payload. The engine never inspects it.
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl Electron {
    /// Create a new electron.
    pub fn new(
        id: impl Into<ElectronId>,
        atom: impl Into<AtomId>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            id: id.into(),
            atom: atom.into(),
            payload,
        }
    }
}

/// The outcome of executing one electron.
///
/// Built by the engine after the atom returns, published on the
/// properties channel and handed back to the originating conductor.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    /// The electron that was executed.
    pub electron: ElectronId,
    /// The atom type that executed it.
    pub atom: AtomId,
    /// The conductor that produced it.
    pub conductor: ConductorId,
    /// When the atom started processing.
    pub start: DateTime<Utc>,
    /// When the atom returned.
    pub end: DateTime<Utc>,
    /// Failure message, if the atom failed.
    pub error: Option<String>,
    /// Value produced by the atom, if it succeeded.
    pub result: Option<serde_json::Value>,
}

impl Properties {
    /// Create a new properties record. Exactly one of `result` and `error`
    /// is expected to be set.
    pub fn new(
        electron: ElectronId,
        atom: AtomId,
        conductor: ConductorId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        outcome: Result<serde_json::Value, String>,
    ) -> Self {
        let (result, error) = match outcome {
            Ok(value) => (Some(value), None),
            Err(message) => (None, Some(message)),
        };
        Self {
            electron,
            atom,
            conductor,
            start,
            end,
            error,
            result,
        }
    }

    /// Whether the atom reported a failure.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
