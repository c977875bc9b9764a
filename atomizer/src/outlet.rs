//! Output channels: errors, events and properties.
//!
//! Each channel is created on first request and lives as long as the
//! engine. The first caller picks the buffer size; later callers get the
//! same channel. Until a channel is requested, anything the engine would
//! have published on it is dropped and only traced.

use crate::config::{MAX_BUFFER, capacity};
use crate::engine::Engine;
use crate::error::EngineError;
use atomizer_core::Properties;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{trace, warn};

/// Read side of an output channel.
///
/// Clones share one underlying channel: every item is delivered to exactly
/// one reader, whichever asks first.
pub struct Outlet<T> {
    rx: Arc<Mutex<mpsc::Receiver<T>>>,
    capacity: usize,
}

impl<T> Outlet<T> {
    /// Receive the next item. Returns `None` once the engine is gone and
    /// the channel is drained.
    pub async fn recv(&self) -> Option<T> {
        self.rx.lock().await.recv().await
    }

    /// Receive an item if one is ready right now.
    pub fn try_recv(&self) -> Option<T> {
        self.rx.try_lock().ok()?.try_recv().ok()
    }

    /// The buffer size the channel was created with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether two outlets read from the same channel.
    pub fn same_channel(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.rx, &other.rx)
    }
}

impl<T> Clone for Outlet<T> {
    fn clone(&self) -> Self {
        Self {
            rx: Arc::clone(&self.rx),
            capacity: self.capacity,
        }
    }
}

impl<T> std::fmt::Debug for Outlet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Outlet")
            .field("capacity", &self.capacity)
            .finish()
    }
}

pub(crate) struct Output<T> {
    tx: mpsc::Sender<T>,
    outlet: Outlet<T>,
}

impl<T> Output<T> {
    /// Negative buffers count as zero. Zero becomes one: tokio has no
    /// rendezvous channel, so one slot is the closest bounded equivalent.
    /// Buffers past [`MAX_BUFFER`] are capped there.
    fn open(buffer: isize) -> Self {
        let capacity = capacity(usize::try_from(buffer).unwrap_or(0));
        let (tx, rx) = mpsc::channel(capacity);
        Self {
            tx,
            outlet: Outlet {
                rx: Arc::new(Mutex::new(rx)),
                capacity,
            },
        }
    }
}

#[derive(Default)]
pub(crate) struct Outputs {
    errors: Option<Output<EngineError>>,
    events: Option<Output<String>>,
    properties: Option<Output<Properties>>,
}

impl Engine {
    /// The errors channel, created with `buffer` on first request.
    ///
    /// Carries everything that goes wrong inside the engine's loops:
    /// rejected registrations, unroutable electrons, conductor and atom
    /// failures.
    ///
    /// # Buffer
    ///
    /// A negative `buffer` counts as zero. Zero is raised to one slot
    /// since tokio has no unbuffered channel: [`Outlet::capacity`] then
    /// reports 1, and a publisher can run one item ahead of the reader.
    /// Anything above the largest capacity tokio accepts is capped there.
    /// [`Engine::events`] and [`Engine::properties`] size the same way.
    pub fn errors(&self, buffer: isize) -> Result<Outlet<EngineError>, EngineError> {
        self.outlet(buffer, |o| &mut o.errors)
    }

    /// The events channel, created with `buffer` on first request.
    /// A `buffer` of zero or less yields a one-slot channel.
    ///
    /// Carries human-readable lifecycle messages: startup, registrations,
    /// conductors running dry.
    pub fn events(&self, buffer: isize) -> Result<Outlet<String>, EngineError> {
        self.outlet(buffer, |o| &mut o.events)
    }

    /// The properties channel, created with `buffer` on first request.
    /// A `buffer` of zero or less yields a one-slot channel.
    ///
    /// Carries one [`Properties`] per electron an atom has processed.
    pub fn properties(&self, buffer: isize) -> Result<Outlet<Properties>, EngineError> {
        self.outlet(buffer, |o| &mut o.properties)
    }

    fn outlet<T>(
        &self,
        buffer: isize,
        slot: impl FnOnce(&mut Outputs) -> &mut Option<Output<T>>,
    ) -> Result<Outlet<T>, EngineError> {
        self.gate()?;
        let mut outputs = self
            .shared
            .outputs
            .lock()
            .map_err(|_| EngineError::Invalid("output lock poisoned".to_string()))?;
        let output = slot(&mut *outputs).get_or_insert_with(|| Output::open(buffer));
        Ok(output.outlet.clone())
    }

    /// Report an error from inside a loop.
    pub(crate) async fn report(&self, err: EngineError) {
        warn!(error = %err, "atomizer.error");
        let tx = self.sender(|o| &o.errors);
        self.publish(tx, err, "errors").await;
    }

    /// Publish a lifecycle event.
    pub(crate) async fn event(&self, message: String) {
        trace!(event = %message, "atomizer.event");
        let tx = self.sender(|o| &o.events);
        self.publish(tx, message, "events").await;
    }

    /// Publish the result of one processed electron.
    pub(crate) async fn result(&self, properties: Properties) {
        let tx = self.sender(|o| &o.properties);
        self.publish(tx, properties, "properties").await;
    }

    fn sender<T>(
        &self,
        slot: impl FnOnce(&Outputs) -> &Option<Output<T>>,
    ) -> Option<mpsc::Sender<T>> {
        let outputs = self.shared.outputs.lock().ok()?;
        slot(&*outputs).as_ref().map(|o| o.tx.clone())
    }

    async fn publish<T>(&self, tx: Option<mpsc::Sender<T>>, item: T, channel: &'static str) {
        let Some(tx) = tx else {
            trace!(channel, "atomizer.output.unrequested");
            return;
        };
        tokio::select! {
            biased;
            _ = self.shared.token.cancelled() => {}
            _ = tx.send(item) => {}
        }
    }
}
