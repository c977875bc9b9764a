//! RecordingAtom and FailingAtom.

use crate::error::AtomError;
use crate::{Atom, AtomId, Electron, Registrant};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// An atom that records every electron it processes and echoes the payload
/// back as its result.
///
/// Each processed electron is also forwarded to the receiver returned by
/// [`RecordingAtom::channel`], so tests can await deliveries.
pub struct RecordingAtom {
    id: AtomId,
    received: Mutex<Vec<Electron>>,
    notify: Option<mpsc::UnboundedSender<Electron>>,
}

impl RecordingAtom {
    /// Create a recording atom for the given handler type.
    pub fn new(id: impl Into<AtomId>) -> Self {
        Self {
            id: id.into(),
            received: Mutex::new(Vec::new()),
            notify: None,
        }
    }

    /// Create a recording atom plus a receiver that sees every electron it
    /// processes.
    pub fn channel(id: impl Into<AtomId>) -> (Arc<Self>, mpsc::UnboundedReceiver<Electron>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let atom = Self {
            notify: Some(tx),
            ..Self::new(id)
        };
        (Arc::new(atom), rx)
    }

    /// Return a snapshot of all processed electrons.
    pub fn received(&self) -> Vec<Electron> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl Atom for RecordingAtom {
    fn id(&self) -> AtomId {
        self.id.clone()
    }

    async fn process(&self, electron: &Electron) -> Result<serde_json::Value, AtomError> {
        self.received.lock().unwrap().push(electron.clone());
        if let Some(tx) = &self.notify {
            let _ = tx.send(electron.clone());
        }
        Ok(electron.payload.clone())
    }
}

impl Registrant for RecordingAtom {
    fn atom(self: Arc<Self>) -> Option<Arc<dyn Atom>> {
        Some(self)
    }
}

/// An atom that fails every electron with [`AtomError::Failed`].
pub struct FailingAtom {
    id: AtomId,
    message: String,
}

impl FailingAtom {
    /// Create a failing atom for the given handler type.
    pub fn new(id: impl Into<AtomId>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl Atom for FailingAtom {
    fn id(&self) -> AtomId {
        self.id.clone()
    }

    async fn process(&self, _electron: &Electron) -> Result<serde_json::Value, AtomError> {
        Err(AtomError::Failed(self.message.clone()))
    }
}

impl Registrant for FailingAtom {
    fn atom(self: Arc<Self>) -> Option<Arc<dyn Atom>> {
        Some(self)
    }
}
