//! In-memory collaborators for testing.
//!
//! Available behind the `test-utils` feature flag. These are minimal
//! implementations that exercise the engine without any real work source.

mod atoms;
mod conductors;

pub use atoms::{FailingAtom, RecordingAtom};
pub use conductors::{ChannelConductor, FailingConductor, VecConductor};

use crate::{Atom, Conductor, Registrant};
use std::sync::Arc;

/// A registrant with no capabilities. The engine rejects it.
pub struct Inert;

impl Registrant for Inert {}

/// A single value that is both a conductor and an atom.
pub struct Both {
    /// Conductor half.
    pub conductor: VecConductor,
    /// Atom half.
    pub atom: RecordingAtom,
}

impl Registrant for Both {
    fn conductor(self: Arc<Self>) -> Option<Arc<dyn Conductor>> {
        Some(Arc::new(Delegate(self)))
    }

    fn atom(self: Arc<Self>) -> Option<Arc<dyn Atom>> {
        Some(Arc::new(Delegate(self)))
    }
}

struct Delegate(Arc<Both>);

#[async_trait::async_trait]
impl Conductor for Delegate {
    fn id(&self) -> crate::ConductorId {
        self.0.conductor.id()
    }

    async fn receive(&self) -> Result<Option<crate::Electron>, crate::ConductorError> {
        self.0.conductor.receive().await
    }

    async fn complete(&self, properties: &crate::Properties) -> Result<(), crate::ConductorError> {
        self.0.conductor.complete(properties).await
    }
}

#[async_trait::async_trait]
impl Atom for Delegate {
    fn id(&self) -> crate::AtomId {
        self.0.atom.id()
    }

    async fn process(
        &self,
        electron: &crate::Electron,
    ) -> Result<serde_json::Value, crate::AtomError> {
        self.0.atom.process(electron).await
    }
}
