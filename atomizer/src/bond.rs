//! Bond workers: one per atom type, executing delivered electrons in order.

use crate::distribute::Bonded;
use crate::engine::Engine;
use crate::error::EngineError;
use atomizer_core::{Atom, Properties};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

impl Engine {
    pub(crate) async fn bond_loop(
        self,
        atom: Arc<dyn Atom>,
        mut delivery: mpsc::Receiver<Bonded>,
    ) {
        let id = atom.id();
        debug!(atom = %id, "atomizer.bond.start");
        loop {
            let bonded = tokio::select! {
                biased;
                _ = self.shared.token.cancelled() => break,
                next = delivery.recv() => match next {
                    Some(bonded) => bonded,
                    None => break,
                },
            };
            if !self.execute(atom.as_ref(), bonded).await {
                break;
            }
        }
        debug!(atom = %id, "atomizer.bond.stop");
    }

    /// Run one electron through its atom and hand the result back.
    /// Returns `false` if cancellation interrupted it.
    async fn execute(&self, atom: &dyn Atom, bonded: Bonded) -> bool {
        let Bonded {
            instance,
            atom: atom_id,
            bonded_at,
        } = bonded;
        let electron = instance.electron;
        let conductor = instance.conductor;

        let start = Utc::now();
        let outcome = tokio::select! {
            biased;
            _ = self.shared.token.cancelled() => return false,
            outcome = atom.process(&electron) => outcome,
        };
        let end = Utc::now();
        debug!(
            atom = %atom_id,
            electron = %electron.id,
            queued_ms = (start - bonded_at).num_milliseconds(),
            run_ms = (end - start).num_milliseconds(),
            ok = outcome.is_ok(),
            "atomizer.bond.processed"
        );

        let outcome = match outcome {
            Ok(value) => Ok(value),
            Err(e) => {
                let message = e.to_string();
                self.report(EngineError::Atom {
                    atom: atom_id.clone(),
                    electron: electron.id.clone(),
                    message: message.clone(),
                })
                .await;
                Err(message)
            }
        };
        let properties =
            Properties::new(electron.id, atom_id, conductor.id(), start, end, outcome);

        let completed = tokio::select! {
            biased;
            _ = self.shared.token.cancelled() => return false,
            completed = conductor.complete(&properties) => completed,
        };
        if let Err(e) = completed {
            self.report(EngineError::Conductor {
                conductor: conductor.id(),
                message: e.to_string(),
            })
            .await;
        }

        self.result(properties).await;
        true
    }
}
