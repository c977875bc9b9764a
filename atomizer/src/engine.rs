//! The engine handle and its lifecycle: construction, startup, shutdown.

use crate::config::EngineConfig;
use crate::distribute::Bonded;
use crate::error::EngineError;
use crate::outlet::Outputs;
use crate::receive::Instance;
use atomizer_core::{AtomId, RegistrationSource, Registrant, Validate, is_valid};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::{OnceCell, mpsc};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{error, info};

/// Routing table: handler type to the delivery channel of its bond worker.
pub(crate) type Routes = HashMap<AtomId, mpsc::Sender<Bonded>>;

pub(crate) struct Shared {
    pub(crate) config: EngineConfig,
    pub(crate) token: CancellationToken,
    pub(crate) tracker: TaskTracker,
    pub(crate) inbound_tx: mpsc::Sender<Instance>,
    inbound_rx: Mutex<Option<mpsc::Receiver<Instance>>>,
    registrations_tx: mpsc::Sender<Arc<dyn Registrant>>,
    registrations_rx: Mutex<Option<mpsc::Receiver<Arc<dyn Registrant>>>>,
    pub(crate) routes: RwLock<Routes>,
    pub(crate) outputs: Mutex<Outputs>,
    source: Option<Arc<dyn RegistrationSource>>,
    started: OnceCell<Result<(), EngineError>>,
}

/// The work-distribution engine.
///
/// A cheap, clonable handle: every clone drives the same engine. Nothing
/// runs until [`Engine::exec`]; after that the engine keeps routing until
/// its cancellation token fires, either through [`Engine::cancel`], through
/// the parent token it was built with, or after a failed startup.
///
/// Spawned loops hold a handle of their own, so dropping every handle does
/// not stop a started engine. Cancel it.
#[derive(Clone)]
pub struct Engine {
    pub(crate) shared: Arc<Shared>,
}

impl Engine {
    /// Create an engine with the default configuration and no
    /// pre-registrations.
    ///
    /// With a parent token, cancelling the parent cancels the engine.
    /// Without one, the engine only stops through [`Engine::cancel`].
    /// Construction never fails; problems surface from the methods.
    pub fn new(parent: Option<CancellationToken>) -> Self {
        let builder = Self::builder();
        match parent {
            Some(parent) => builder.parent(parent).build(),
            None => builder.build(),
        }
    }

    /// Start building an engine.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Start the engine.
    ///
    /// Pulls the pre-registrations and classifies them, then starts the
    /// registration loop and the distribution loop. Runs exactly once per
    /// engine no matter how many callers race here; every call returns the
    /// result of that single run.
    ///
    /// A startup failure cancels the engine.
    ///
    /// Startup runs on a tracked task, so dropping the returned future
    /// does not interrupt it; a later call picks up the same run.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn exec(&self) -> Result<(), EngineError> {
        self.gate()?;
        let engine = self.clone();
        let startup = self.shared.tracker.spawn(async move {
            engine
                .shared
                .started
                .get_or_init(|| async {
                    let started = engine.start().await;
                    if let Err(e) = &started {
                        error!(error = %e, "atomizer.exec.failed");
                        engine.shared.token.cancel();
                    }
                    started
                })
                .await
                .clone()
        });
        startup
            .await
            .map_err(|e| EngineError::Invalid(format!("startup task failed: {e}")))?
    }

    async fn start(&self) -> Result<(), EngineError> {
        info!("atomizer.exec.start");
        let entries = match &self.shared.source {
            Some(source) => source
                .registrations()
                .await
                .map_err(|e| EngineError::Registry(e.to_string()))?,
            None => Vec::new(),
        };
        let registrations = take(&self.shared.registrations_rx, "registrations")?;
        let inbound = take(&self.shared.inbound_rx, "inbound")?;

        info!(count = entries.len(), "atomizer.exec.preregistered");
        for entry in entries {
            self.classify(entry).await;
        }

        self.spawn(self.clone().registration_loop(registrations));
        self.spawn(self.clone().distribution_loop(inbound));
        self.event("engine started".to_string()).await;
        Ok(())
    }

    /// Queue a conductor, an atom, or a value that is both.
    ///
    /// Classification happens asynchronously in the registration loop;
    /// problems with the value itself are reported on the errors channel.
    /// Blocks while the registration channel is full. If the engine is
    /// cancelled first the value is discarded and `Ok(())` returned.
    pub async fn register(&self, value: Arc<dyn Registrant>) -> Result<(), EngineError> {
        self.gate()?;
        tokio::select! {
            biased;
            _ = self.shared.token.cancelled() => Ok(()),
            sent = self.shared.registrations_tx.send(value) => {
                sent.map_err(|_| EngineError::Closed("registrations"))
            }
        }
    }

    /// Resolve once the engine has been cancelled.
    pub async fn wait(&self) {
        self.shared.token.cancelled().await;
    }

    /// Cancel the engine. Every loop unwinds at its next suspension point.
    pub fn cancel(&self) {
        self.shared.token.cancel();
    }

    /// Cancel the engine and wait until every loop it spawned has exited.
    pub async fn shutdown(&self) {
        self.cancel();
        self.shared.tracker.close();
        self.shared.tracker.wait().await;
        info!("atomizer.shutdown.complete");
    }

    /// A clone of the engine's cancellation token, for deriving child work.
    pub fn token(&self) -> CancellationToken {
        self.shared.token.clone()
    }

    pub(crate) fn gate(&self) -> Result<(), EngineError> {
        if is_valid(Some(self)) {
            Ok(())
        } else {
            Err(EngineError::Invalid(
                "engine channels or locks are unusable".to_string(),
            ))
        }
    }

    pub(crate) fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.shared.tracker.spawn(task);
    }
}

impl Validate for Engine {
    fn validate(&self) -> bool {
        let shared = &self.shared;
        if shared.routes.is_poisoned()
            || shared.outputs.is_poisoned()
            || shared.inbound_rx.is_poisoned()
            || shared.registrations_rx.is_poisoned()
        {
            return false;
        }
        // Loops drop their receivers when cancelled; that is teardown.
        shared.token.is_cancelled()
            || (!shared.inbound_tx.is_closed() && !shared.registrations_tx.is_closed())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.shared.config)
            .field("started", &self.shared.started.initialized())
            .field("cancelled", &self.shared.token.is_cancelled())
            .finish()
    }
}

fn take<T>(slot: &Mutex<Option<T>>, name: &'static str) -> Result<T, EngineError> {
    slot.lock()
        .map_err(|_| EngineError::Invalid(format!("{name} receiver lock poisoned")))?
        .take()
        .ok_or(EngineError::Closed(name))
}

/// Builder for [`Engine`].
#[derive(Default)]
pub struct EngineBuilder {
    parent: Option<CancellationToken>,
    config: EngineConfig,
    source: Option<Arc<dyn RegistrationSource>>,
}

impl EngineBuilder {
    /// Derive the engine's token from `parent`.
    pub fn parent(mut self, parent: CancellationToken) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the channel configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the source of registrations classified at startup.
    pub fn registry(mut self, source: Arc<dyn RegistrationSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Build the engine. Nothing is spawned until [`Engine::exec`].
    pub fn build(self) -> Engine {
        let config = self.config.clamped();
        let token = match self.parent {
            Some(parent) => parent.child_token(),
            None => CancellationToken::new(),
        };
        let (inbound_tx, inbound_rx) = mpsc::channel(config.inbound_buffer);
        let (registrations_tx, registrations_rx) = mpsc::channel(config.registration_buffer);

        Engine {
            shared: Arc::new(Shared {
                config,
                token,
                tracker: TaskTracker::new(),
                inbound_tx,
                inbound_rx: Mutex::new(Some(inbound_rx)),
                registrations_tx,
                registrations_rx: Mutex::new(Some(registrations_rx)),
                routes: RwLock::new(HashMap::new()),
                outputs: Mutex::new(Outputs::default()),
                source: self.source,
                started: OnceCell::new(),
            }),
        }
    }
}
