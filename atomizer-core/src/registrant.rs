//! Capability probing for registered values.

use crate::{atom::Atom, conductor::Conductor};
use std::sync::Arc;

/// A value handed to the engine for registration.
///
/// The engine classifies a registrant by asking which capabilities it has,
/// never by its concrete type. Both probes default to `None`; a type opts
/// into a capability by returning itself:
///
/// ```
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use atomizer_core::{Atom, AtomError, AtomId, Electron, Registrant};
///
/// struct Upper;
///
/// #[async_trait]
/// impl Atom for Upper {
///     fn id(&self) -> AtomId {
///         AtomId::new("upper")
///     }
///
///     async fn process(&self, e: &Electron) -> Result<serde_json::Value, AtomError> {
///         let text = e.payload.as_str().unwrap_or_default();
///         Ok(serde_json::Value::String(text.to_uppercase()))
///     }
/// }
///
/// impl Registrant for Upper {
///     fn atom(self: Arc<Self>) -> Option<Arc<dyn Atom>> {
///         Some(self)
///     }
/// }
/// ```
///
/// A value that returns `None` from both probes is rejected by the engine
/// with an error on its errors channel.
pub trait Registrant: Send + Sync + 'static {
    /// The conductor view of this value, if it is one.
    fn conductor(self: Arc<Self>) -> Option<Arc<dyn Conductor>> {
        None
    }

    /// The atom view of this value, if it is one.
    fn atom(self: Arc<Self>) -> Option<Arc<dyn Atom>> {
        None
    }

    /// Human-readable name used in diagnostics.
    fn name(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}
