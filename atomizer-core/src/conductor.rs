//! The Conductor capability: where electrons come from.

use crate::{electron::Electron, electron::Properties, error::ConductorError, id::ConductorId};
use async_trait::async_trait;

/// A source of electrons.
///
/// The engine runs one receive loop per registered conductor. Each
/// iteration awaits [`Conductor::receive`]; when the engine shuts down the
/// pending future is dropped, so implementations must be cancel-safe at
/// their await points (a message queue consumer, a channel receiver, a
/// polling client).
///
/// Electrons from one conductor reach the engine in the order `receive`
/// returned them. Nothing is promised across conductors.
#[async_trait]
pub trait Conductor: Send + Sync {
    /// Identifier used in events, errors and [`Properties::conductor`].
    fn id(&self) -> ConductorId;

    /// Produce the next electron.
    ///
    /// `Ok(None)` means the conductor is exhausted and its receive loop
    /// ends. An error is reported on the engine's errors channel and also
    /// ends this conductor's loop; other conductors are unaffected.
    async fn receive(&self) -> Result<Option<Electron>, ConductorError>;

    /// Accept the result of an electron this conductor produced.
    ///
    /// Called by the engine after the atom returns, successful or not.
    /// The default discards it.
    async fn complete(&self, properties: &Properties) -> Result<(), ConductorError> {
        let _ = properties;
        Ok(())
    }
}
