//! Provider runtime.
//!
//! [`bootstrap`] performs the one-shot startup wiring (plugin lookup,
//! configuration, manifest) and yields a [`Runtime`], which translates
//! invocation events into calls against the provider.

#![warn(missing_docs, clippy::pedantic)]

mod bootstrap;
mod error;
mod event;
mod runtime;

pub use bootstrap::{bootstrap, bootstrap_linked};
pub use error::{BootstrapError, BootstrapResult, RuntimeError, RuntimeResult};
pub use event::{InvocationContext, ProviderEvent};
pub use runtime::Runtime;
