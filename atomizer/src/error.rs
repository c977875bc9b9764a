//! Engine error type.

use atomizer_core::{AtomId, ConductorId, ElectronId};
use thiserror::Error;

/// Errors returned by engine methods or reported on its errors channel.
///
/// `Invalid`, `Closed` and `Registry` are returned synchronously to the
/// caller. Everything else happens inside an engine loop and is reported
/// on the errors channel while the loop carries on. Cancellation is never
/// an error.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The engine failed its validity check; nothing was done.
    #[error("invalid engine: {0}")]
    Invalid(String),

    /// An internal channel closed while the engine was still live.
    #[error("engine channel closed: {0}")]
    Closed(&'static str),

    /// The registration source failed during startup.
    #[error("registration source failed: {0}")]
    Registry(String),

    /// An atom type was registered twice. The first registration is kept.
    #[error("duplicate atom registration: {0}")]
    DuplicateAtom(AtomId),

    /// A registered value was neither a conductor nor an atom.
    #[error("registrant has no capability: {0}")]
    Unclassified(String),

    /// No atom is registered for the electron's handler type. The electron
    /// was dropped.
    #[error("no atom registered for {atom} (electron {electron})")]
    Unroutable {
        /// Handler type the electron was addressed to.
        atom: AtomId,
        /// The dropped electron.
        electron: ElectronId,
    },

    /// A conductor failed to produce work or to accept a result.
    #[error("conductor {conductor} failed: {message}")]
    Conductor {
        /// The failing conductor.
        conductor: ConductorId,
        /// Error message.
        message: String,
    },

    /// An atom failed to process an electron.
    #[error("atom {atom} failed on electron {electron}: {message}")]
    Atom {
        /// The failing atom type.
        atom: AtomId,
        /// The electron being processed.
        electron: ElectronId,
        /// Error message.
        message: String,
    },
}
