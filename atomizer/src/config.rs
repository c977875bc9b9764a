//! Configuration for the engine's internal channels.

/// Buffer sizes for the channels the engine allocates itself.
///
/// Output channel buffers are not configured here; each is sized by the
/// first caller of [`crate::Engine::errors`], [`crate::Engine::events`] or
/// [`crate::Engine::properties`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Capacity of the shared inbound channel every receive loop feeds.
    pub inbound_buffer: usize,
    /// Capacity of each atom type's delivery channel.
    pub delivery_buffer: usize,
    /// Capacity of the registration channel.
    pub registration_buffer: usize,
}

impl EngineConfig {
    /// Copy of this config with every buffer inside [`capacity`]'s range.
    pub(crate) fn clamped(&self) -> Self {
        Self {
            inbound_buffer: capacity(self.inbound_buffer),
            delivery_buffer: capacity(self.delivery_buffer),
            registration_buffer: capacity(self.registration_buffer),
        }
    }
}

/// Largest capacity a tokio bounded channel accepts.
pub(crate) const MAX_BUFFER: usize = tokio::sync::Semaphore::MAX_PERMITS;

/// Clamp a requested buffer to what a bounded channel accepts: at least
/// one slot, at most [`MAX_BUFFER`].
pub(crate) fn capacity(requested: usize) -> usize {
    requested.clamp(1, MAX_BUFFER)
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            inbound_buffer: 64,
            delivery_buffer: 64,
            registration_buffer: 64,
        }
    }
}
