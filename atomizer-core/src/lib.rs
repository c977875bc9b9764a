//! # atomizer-core: protocol traits for the atomizer engine
//!
//! This crate defines the collaborator boundaries of the atomizer
//! work-distribution engine. The engine itself lives in the `atomizer`
//! crate; everything here is what a host program implements to plug into it.
//!
//! ## The Capabilities
//!
//! | Capability | Trait | What it does |
//! |------------|-------|-------------|
//! | Conductor | [`Conductor`] | Produces electrons from some external source |
//! | Atom | [`Atom`] | Executes electrons addressed to its handler type |
//! | Registrant | [`Registrant`] | Anything handed to the engine for classification |
//!
//! ## The Supporting Contracts
//!
//! | Contract | Types | What it does |
//! |----------|-------|-------------|
//! | Work units | [`Electron`], [`Properties`] | What flows in, what comes out |
//! | Seeding | [`RegistrationSource`], [`Registry`] | Registrations collected before startup |
//! | Validity | [`Validate`], [`is_valid`] | Gate checked by every engine entry point |
//!
//! ## Classification
//!
//! A registered value is not tagged as "conductor" or "atom". The engine
//! asks it: [`Registrant::conductor`] and [`Registrant::atom`] each return
//! `Some` when the value has that capability. One value may have both.
//!
//! ## Payloads
//!
//! Electron payloads and atom results are `serde_json::Value`. The engine
//! never looks inside them; JSON keeps conductors and atoms written by
//! different teams interchangeable without a shared generic parameter
//! leaking into every trait object.

#![deny(missing_docs)]

pub mod atom;
pub mod conductor;
pub mod electron;
pub mod error;
pub mod id;
pub mod registrant;
pub mod registry;
pub mod validate;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-exports for convenience
pub use atom::Atom;
pub use conductor::Conductor;
pub use electron::{Electron, Properties};
pub use error::{AtomError, ConductorError, RegistryError};
pub use id::{AtomId, ConductorId, ElectronId};
pub use registrant::Registrant;
pub use registry::{RegistrationSource, Registry};
pub use validate::{Validate, is_valid};
