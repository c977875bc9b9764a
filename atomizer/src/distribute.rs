//! Fan-out: the single loop routing inbound electrons to atom types.

use crate::engine::Engine;
use crate::error::EngineError;
use crate::receive::Instance;
use atomizer_core::AtomId;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::debug;

/// An instance committed to one atom type's delivery channel.
pub(crate) struct Bonded {
    pub(crate) instance: Instance,
    pub(crate) atom: AtomId,
    pub(crate) bonded_at: DateTime<Utc>,
}

impl Engine {
    /// Route every inbound instance until cancelled. There is exactly one
    /// of these per engine, so it is the only writer to delivery channels.
    pub(crate) async fn distribution_loop(self, mut inbound: mpsc::Receiver<Instance>) {
        debug!("atomizer.distribute.start");
        loop {
            let instance = tokio::select! {
                biased;
                _ = self.shared.token.cancelled() => break,
                next = inbound.recv() => match next {
                    Some(instance) => instance,
                    None => break,
                },
            };
            self.distribute(instance).await;
        }
        debug!("atomizer.distribute.stop");
    }

    async fn distribute(&self, instance: Instance) {
        let atom = instance.electron.atom.clone();
        let Some(delivery) = self.route(&atom) else {
            self.report(EngineError::Unroutable {
                atom,
                electron: instance.electron.id,
            })
            .await;
            return;
        };

        debug!(atom = %atom, electron = %instance.electron.id, "atomizer.distribute.bonded");
        let bonded = Bonded {
            instance,
            atom,
            bonded_at: Utc::now(),
        };
        tokio::select! {
            biased;
            _ = self.shared.token.cancelled() => {}
            // A closed delivery channel means its bond worker already
            // unwound for shutdown.
            _ = delivery.send(bonded) => {}
        }
    }

    /// Look up the delivery channel for an atom type. The read guard never
    /// outlives this call.
    fn route(&self, atom: &AtomId) -> Option<mpsc::Sender<Bonded>> {
        let routes = self.shared.routes.read().ok()?;
        routes.get(atom).cloned()
    }
}
