use crate::{Callback, EventError, Listener, PendingEmission};

/// Defines the contract for types that manage named listeners and emit events.
///
/// Every method takes `&self`: implementors are shared across threads and must allow
/// listeners to call back into the handler (register, remove, emit) while an emission is
/// in progress.
///
/// # Type Parameters
/// * `T`: The argument type passed to listeners. Must be `Send + Sync + 'static`.
pub trait EventHandler<T: Send + Sync + 'static>: Send + Sync {
    /// Gets the names of events that currently have one or more listeners, in no particular order.
    fn event_names(&self) -> Vec<String>;

    /// Gets the listeners registered to `event_name`, in registration order.
    fn listeners(&self, event_name: &str) -> Vec<Listener<T>>;

    /// Gets the number of listeners registered to `event_name` (0 when unknown).
    fn listener_count(&self, event_name: &str) -> usize;

    /// Returns `true` if `event_name` has at least one listener.
    fn has_listener(&self, event_name: &str) -> bool {
        self.listener_count(event_name) > 0
    }

    /// Sets the maximum number of listeners allowed per event; `0` means unlimited.
    fn set_max_listeners(&self, max: usize);

    /// Gets the current maximum number of listeners allowed per event.
    fn max_listeners(&self) -> usize;

    /// Registers `callback` under `listener_name` for `event_name`.
    ///
    /// An existing listener with the same name is replaced and moves to the end of the
    /// emission order.
    ///
    /// # Returns
    /// * `Ok(Listener<T>)` with the stored listener.
    /// * `Err(EventError::EmptyEventName)` / `Err(EventError::EmptyListenerName)` on empty names.
    /// * `Err(EventError::OverloadedEvent)` if the listener cap would be exceeded.
    fn on(
        &self,
        event_name: &str,
        listener_name: &str,
        callback: Callback<T>,
    ) -> Result<Listener<T>, EventError>;

    /// Same as [`EventHandler::on`], but the callback runs at most once and the listener then
    /// removes itself, even when emissions race.
    fn once(
        &self,
        event_name: &str,
        listener_name: &str,
        callback: Callback<T>,
    ) -> Result<Listener<T>, EventError>;

    /// Removes listeners.
    ///
    /// * `event_name` empty: removes every event and listener.
    /// * `listener_name` empty: removes `event_name` and all its listeners.
    /// * otherwise: removes the one listener, dropping the event once it has none left.
    ///
    /// # Returns
    /// The number of listeners removed; missing targets are a no-op.
    fn off(&self, event_name: &str, listener_name: &str) -> usize;

    /// Synchronously invokes every listener resolved for `event_name`, in order.
    ///
    /// A panicking listener unwinds through this call and the remaining listeners are skipped.
    ///
    /// # Returns
    /// The number of listeners invoked.
    fn emit(&self, event_name: &str, args: Vec<T>) -> usize;

    /// Invokes every listener resolved for `event_name` concurrently, one task each.
    ///
    /// Tasks go to the current Tokio runtime's blocking pool when there is one, and to
    /// dedicated threads otherwise. A panicking listener is logged and does not affect the
    /// others.
    ///
    /// # Returns
    /// A [`PendingEmission`] tracking the dispatched invocations.
    fn emit_async(&self, event_name: &str, args: Vec<T>) -> PendingEmission;
}
