//! VecConductor, ChannelConductor and FailingConductor.

use crate::error::ConductorError;
use crate::{Conductor, ConductorId, Electron, Properties, Registrant};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// A conductor that emits a fixed list of electrons in order.
///
/// Once the list is drained it reports exhaustion, unless built with
/// [`VecConductor::held_open`], in which case it parks until the engine
/// shuts down. Completed properties are recorded for inspection.
pub struct VecConductor {
    id: ConductorId,
    pending: Mutex<VecDeque<Electron>>,
    completed: Mutex<Vec<Properties>>,
    hold_open: bool,
}

impl VecConductor {
    /// Create a conductor that emits `electrons` then reports exhaustion.
    pub fn new(id: impl Into<ConductorId>, electrons: Vec<Electron>) -> Self {
        Self {
            id: id.into(),
            pending: Mutex::new(electrons.into()),
            completed: Mutex::new(Vec::new()),
            hold_open: false,
        }
    }

    /// Keep the conductor alive after its list is drained.
    pub fn held_open(mut self) -> Self {
        self.hold_open = true;
        self
    }

    /// Return a snapshot of all properties handed back by the engine.
    pub fn completed(&self) -> Vec<Properties> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Conductor for VecConductor {
    fn id(&self) -> ConductorId {
        self.id.clone()
    }

    async fn receive(&self) -> Result<Option<Electron>, ConductorError> {
        let next = self.pending.lock().unwrap().pop_front();
        match next {
            Some(electron) => Ok(Some(electron)),
            None if self.hold_open => std::future::pending().await,
            None => Ok(None),
        }
    }

    async fn complete(&self, properties: &Properties) -> Result<(), ConductorError> {
        self.completed.lock().unwrap().push(properties.clone());
        Ok(())
    }
}

impl Registrant for VecConductor {
    fn conductor(self: Arc<Self>) -> Option<Arc<dyn Conductor>> {
        Some(self)
    }
}

/// A conductor fed by an unbounded channel the test holds the sender of.
///
/// Reports exhaustion once every sender is dropped and the channel drained.
pub struct ChannelConductor {
    id: ConductorId,
    rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<Electron>>,
}

impl ChannelConductor {
    /// Create a conductor and the sender that feeds it.
    pub fn new(id: impl Into<ConductorId>) -> (Arc<Self>, mpsc::UnboundedSender<Electron>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let conductor = Self {
            id: id.into(),
            rx: tokio::sync::Mutex::new(rx),
        };
        (Arc::new(conductor), tx)
    }
}

#[async_trait]
impl Conductor for ChannelConductor {
    fn id(&self) -> ConductorId {
        self.id.clone()
    }

    async fn receive(&self) -> Result<Option<Electron>, ConductorError> {
        Ok(self.rx.lock().await.recv().await)
    }
}

impl Registrant for ChannelConductor {
    fn conductor(self: Arc<Self>) -> Option<Arc<dyn Conductor>> {
        Some(self)
    }
}

/// A conductor whose source always fails.
pub struct FailingConductor {
    id: ConductorId,
    message: String,
}

impl FailingConductor {
    /// Create a conductor that fails its first `receive` with `message`.
    pub fn new(id: impl Into<ConductorId>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl Conductor for FailingConductor {
    fn id(&self) -> ConductorId {
        self.id.clone()
    }

    async fn receive(&self) -> Result<Option<Electron>, ConductorError> {
        Err(ConductorError::Source(self.message.clone()))
    }
}

impl Registrant for FailingConductor {
    fn conductor(self: Arc<Self>) -> Option<Arc<dyn Conductor>> {
        Some(self)
    }
}
