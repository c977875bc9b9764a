//! Registration pipeline: classify registrants, grow the routing table,
//! start conductors.

use crate::distribute::Bonded;
use crate::engine::Engine;
use crate::error::EngineError;
use atomizer_core::{Atom, Conductor, Registrant};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

enum Insert {
    Added(mpsc::Receiver<Bonded>),
    Duplicate,
    Poisoned,
}

impl Engine {
    /// Drain the registration channel until cancelled.
    pub(crate) async fn registration_loop(self, mut rx: mpsc::Receiver<Arc<dyn Registrant>>) {
        debug!("atomizer.registration.start");
        loop {
            let entry = tokio::select! {
                biased;
                _ = self.shared.token.cancelled() => break,
                next = rx.recv() => match next {
                    Some(entry) => entry,
                    None => break,
                },
            };
            self.classify(entry).await;
        }
        debug!("atomizer.registration.stop");
    }

    /// Probe a registrant for its capabilities and act on each one.
    pub(crate) async fn classify(&self, entry: Arc<dyn Registrant>) {
        let name = entry.name();
        let atom = Arc::clone(&entry).atom();
        let conductor = entry.conductor();

        if atom.is_none() && conductor.is_none() {
            self.report(EngineError::Unclassified(name)).await;
            return;
        }
        debug!(
            registrant = %name,
            atom = atom.is_some(),
            conductor = conductor.is_some(),
            "atomizer.registration.classified"
        );
        if let Some(atom) = atom {
            self.bond(atom).await;
        }
        if let Some(conductor) = conductor {
            self.conduct(conductor).await;
        }
    }

    /// Give an atom type a delivery channel and a bond worker. The first
    /// registration of a type wins.
    async fn bond(&self, atom: Arc<dyn Atom>) {
        let id = atom.id();
        let inserted = match self.shared.routes.write() {
            Ok(mut routes) => {
                if routes.contains_key(&id) {
                    Insert::Duplicate
                } else {
                    let (tx, rx) = mpsc::channel(self.shared.config.delivery_buffer);
                    routes.insert(id.clone(), tx);
                    Insert::Added(rx)
                }
            }
            Err(_) => Insert::Poisoned,
        };

        match inserted {
            Insert::Added(rx) => {
                self.spawn(self.clone().bond_loop(atom, rx));
                info!(atom = %id, "atomizer.registration.atom");
                self.event(format!("atom registered: {id}")).await;
            }
            Insert::Duplicate => {
                self.report(EngineError::DuplicateAtom(id)).await;
            }
            Insert::Poisoned => {
                let reason = "routing table lock poisoned".to_string();
                self.report(EngineError::Invalid(reason)).await;
            }
        }
    }

    /// Start a receive loop for a conductor.
    async fn conduct(&self, conductor: Arc<dyn Conductor>) {
        let id = conductor.id();
        self.spawn(self.clone().receive_loop(conductor));
        info!(conductor = %id, "atomizer.registration.conductor");
        self.event(format!("conductor registered: {id}")).await;
    }
}
