#![deny(missing_docs)]
//! Concurrent work-distribution engine.
//!
//! Conductors produce electrons; atoms execute them. The [`Engine`] sits in
//! between: it classifies whatever is registered, runs one receive loop per
//! conductor, and routes every electron to the delivery channel of the atom
//! type it names.
//!
//! ```text
//! conductor ─┐                          ┌─> delivery "a" ─> bond worker ─> atom "a"
//! conductor ─┼─> inbound ─> distribute ─┤
//! conductor ─┘                          └─> delivery "b" ─> bond worker ─> atom "b"
//! ```
//!
//! Every loop is a tokio task tracked by the engine. Every await inside a
//! loop races the engine's `CancellationToken`, so cancelling the engine
//! unwinds all of them. Failures inside loops never stop the engine; they
//! are published on the errors channel. Results are published on the
//! properties channel and handed back to the conductor that produced the
//! electron.
//!
//! ```no_run
//! use std::sync::Arc;
//! use atomizer::{Engine, EngineError};
//! use atomizer_core::Registrant;
//!
//! async fn run(
//!     atom: Arc<dyn Registrant>,
//!     conductor: Arc<dyn Registrant>,
//! ) -> Result<(), EngineError> {
//!     let engine = Engine::new(None);
//!     let errors = engine.errors(16)?;
//!     let results = engine.properties(16)?;
//!
//!     engine.exec().await?;
//!     engine.register(atom).await?;
//!     engine.register(conductor).await?;
//!
//!     tokio::spawn(async move {
//!         while let Some(err) = errors.recv().await {
//!             eprintln!("atomizer: {err}");
//!         }
//!     });
//!     while let Some(properties) = results.recv().await {
//!         println!("{} -> {:?}", properties.electron, properties.result);
//!     }
//!     Ok(())
//! }
//! ```

mod bond;
mod config;
mod distribute;
mod engine;
mod error;
mod outlet;
mod receive;
mod registration;

pub use config::EngineConfig;
pub use engine::{Engine, EngineBuilder};
pub use error::EngineError;
pub use outlet::Outlet;
pub use tokio_util::sync::CancellationToken;
