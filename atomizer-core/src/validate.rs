//! The validity gate consulted by every engine entry point.

/// Reports whether a value is in a usable state.
///
/// The engine implements this over its internal channels and locks; every
/// public engine method checks it first and refuses to act on an invalid
/// engine.
pub trait Validate {
    /// `true` when every mandatory part of the value is usable.
    fn validate(&self) -> bool;
}

/// Validity predicate over anything that can validate itself.
///
/// Accepts `None` so callers holding an optional handle can gate on it
/// directly.
pub fn is_valid<V: Validate + ?Sized>(value: Option<&V>) -> bool {
    value.is_some_and(|v| v.validate())
}
