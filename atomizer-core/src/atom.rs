//! The Atom capability: what executes electrons.

use crate::{electron::Electron, error::AtomError, id::AtomId};
use async_trait::async_trait;

/// A handler for one type of electron.
///
/// The engine keeps one delivery channel per [`Atom::id`] and executes the
/// electrons routed there one at a time, in arrival order. Whatever
/// `process` returns is recorded as [`crate::Properties`]: `Ok` becomes the
/// result, `Err` becomes the error message.
#[async_trait]
pub trait Atom: Send + Sync {
    /// The handler-type identifier electrons are addressed to.
    fn id(&self) -> AtomId;

    /// Execute one electron.
    async fn process(&self, electron: &Electron) -> Result<serde_json::Value, AtomError>;
}
