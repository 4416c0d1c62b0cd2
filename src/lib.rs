//! # Rust Emitter Crate
//!
//! An in-process publish/subscribe primitive built around named listeners.
//!
//! - **Listener**: A named callback registered against one event.
//! - **EventEmitter**: Manages registration and emission; cheap to clone and share.
//! - **EventHandler**: Trait defining the event API.
//! - **PendingEmission**: Completion handle returned by asynchronous emission.
//!
//! Registration and removal are serialized under one writer lock and publish a fresh,
//! immutable snapshot of the registry after every change. Emission reads only the current
//! snapshot, so it never contends with writers and listeners may register, remove or emit
//! from inside their own callbacks.
//!
//! Emitters run in exact-match mode by default. Constructed with a matcher (see
//! [`wildcard`]) they treat registered event names as patterns.
//!
//! A process-wide default instance is available in [`global`].

mod config;
mod constants;
mod error;
mod event_emitter;
mod event_handler;
mod listener;
mod matcher;
mod pending;
mod snapshot;

pub mod global;

pub use config::{EmitterBuilder, EmitterConfig};
pub use constants::{AnyPayload, Callback, EventArgs, MatchFn};
pub use error::EventError;
pub use event_emitter::EventEmitter;
pub use event_handler::EventHandler;
pub use listener::Listener;
pub use matcher::{wildcard, wildcard_match};
pub use pending::PendingEmission;

#[cfg(test)]
mod tests;
