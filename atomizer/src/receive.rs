//! Fan-in: one loop per conductor feeding the shared inbound channel.

use crate::engine::Engine;
use crate::error::EngineError;
use atomizer_core::{Conductor, Electron};
use std::sync::Arc;
use tracing::{debug, info};

/// An electron together with the conductor that produced it.
pub(crate) struct Instance {
    pub(crate) electron: Electron,
    pub(crate) conductor: Arc<dyn Conductor>,
}

impl Engine {
    /// Pull electrons from one conductor until it is exhausted, fails, or
    /// the engine is cancelled.
    pub(crate) async fn receive_loop(self, conductor: Arc<dyn Conductor>) {
        let id = conductor.id();
        debug!(conductor = %id, "atomizer.receive.start");
        loop {
            let next = tokio::select! {
                biased;
                _ = self.shared.token.cancelled() => break,
                next = conductor.receive() => next,
            };

            match next {
                Ok(Some(electron)) => {
                    debug!(
                        conductor = %id,
                        electron = %electron.id,
                        atom = %electron.atom,
                        "atomizer.receive.electron"
                    );
                    let instance = Instance {
                        electron,
                        conductor: Arc::clone(&conductor),
                    };
                    tokio::select! {
                        biased;
                        _ = self.shared.token.cancelled() => break,
                        sent = self.shared.inbound_tx.send(instance) => {
                            if sent.is_err() {
                                break;
                            }
                        }
                    }
                }
                Ok(None) => {
                    info!(conductor = %id, "atomizer.receive.exhausted");
                    self.event(format!("conductor exhausted: {id}")).await;
                    break;
                }
                Err(e) => {
                    self.report(EngineError::Conductor {
                        conductor: id.clone(),
                        message: e.to_string(),
                    })
                    .await;
                    break;
                }
            }
        }
        debug!(conductor = %id, "atomizer.receive.stop");
    }
}
