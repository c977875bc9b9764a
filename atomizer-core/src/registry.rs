//! Registrations collected before the engine starts.

use crate::{error::RegistryError, registrant::Registrant};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// A source of registrations the engine pulls once, at startup.
///
/// Everything a source returns is classified before the engine accepts
/// ad-hoc registrations and before any electron is routed, so built-in
/// atoms are always routable by the time work arrives.
#[async_trait]
pub trait RegistrationSource: Send + Sync {
    /// Return the registrations to seed the engine with.
    async fn registrations(&self) -> Result<Vec<Arc<dyn Registrant>>, RegistryError>;
}

/// In-memory registration source.
///
/// The host program adds its built-in conductors and atoms here and hands
/// the registry to the engine builder. Entries are returned in insertion
/// order.
#[derive(Default)]
pub struct Registry {
    entries: Mutex<Vec<Arc<dyn Registrant>>>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a registration. Returns `self` for chaining.
    pub fn add(&self, entry: Arc<dyn Registrant>) -> &Self {
        match self.entries.lock() {
            Ok(mut entries) => entries.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
        self
    }

    /// Number of registrations held.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RegistrationSource for Registry {
    async fn registrations(&self) -> Result<Vec<Arc<dyn Registrant>>, RegistryError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| RegistryError::Unavailable(e.to_string()))?;
        Ok(entries.clone())
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry").field("len", &self.len()).finish()
    }
}
