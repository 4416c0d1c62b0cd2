//! Process-wide default emitter.
//!
//! Thin wrappers around a lazily created [`EventEmitter<AnyPayload>`]. Applications that
//! need isolation or a pattern matcher should construct their own emitter instead.
//!
//! ```
//! use std::sync::Arc;
//! use rs_emitter::{global, AnyPayload};
//!
//! global::on("doc.global", "printer", Arc::new(|event: &str, args: &[AnyPayload]| {
//!     if let Some(value) = args.first().and_then(|a| a.downcast_ref::<u32>()) {
//!         println!("{event}: {value}");
//!     }
//! })).unwrap();
//!
//! assert_eq!(global::emit("doc.global", vec![Arc::new(7_u32) as AnyPayload]), 1);
//! global::off("doc.global", "");
//! ```

use std::sync::OnceLock;

use crate::{AnyPayload, Callback, EventError, EventEmitter, EventHandler, Listener, PendingEmission};

static DEFAULT_EMITTER: OnceLock<EventEmitter<AnyPayload>> = OnceLock::new();

/// The shared default emitter, created on first use.
pub fn default_emitter() -> &'static EventEmitter<AnyPayload> {
    DEFAULT_EMITTER.get_or_init(EventEmitter::new)
}

/// Equal to `default_emitter().event_names()`.
pub fn event_names() -> Vec<String> {
    default_emitter().event_names()
}

/// Equal to `default_emitter().listeners(event)`.
pub fn listeners(event: &str) -> Vec<Listener<AnyPayload>> {
    default_emitter().listeners(event)
}

/// Equal to `default_emitter().on(event, name, callback)`.
pub fn on(
    event: &str,
    name: &str,
    callback: Callback<AnyPayload>,
) -> Result<Listener<AnyPayload>, EventError> {
    default_emitter().on(event, name, callback)
}

/// Equal to `default_emitter().once(event, name, callback)`.
pub fn once(
    event: &str,
    name: &str,
    callback: Callback<AnyPayload>,
) -> Result<Listener<AnyPayload>, EventError> {
    default_emitter().once(event, name, callback)
}

/// Equal to `default_emitter().off(event, name)`.
pub fn off(event: &str, name: &str) -> usize {
    default_emitter().off(event, name)
}

/// Equal to `default_emitter().emit(event, args)`.
pub fn emit(event: &str, args: Vec<AnyPayload>) -> usize {
    default_emitter().emit(event, args)
}

/// Equal to `default_emitter().emit_async(event, args)`.
pub fn emit_async(event: &str, args: Vec<AnyPayload>) -> PendingEmission {
    default_emitter().emit_async(event, args)
}
