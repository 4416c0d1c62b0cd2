use thiserror::Error;

/// Errors that can occur in the event system.
///
/// - `EmptyEventName`: Tried to register a listener without an event name.
/// - `EmptyListenerName`: Tried to register a listener without a name.
/// - `OverloadedEvent`: Too many listeners for an event.
///
/// Removing or emitting a missing event is never an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// Adding Listener:
    /// - The event name was empty.
    #[error("the event name is empty")]
    EmptyEventName,

    /// Adding Listener:
    /// - The listener name was empty.
    #[error("the listener name is empty")]
    EmptyListenerName,

    /// Adding Listener:
    /// - Trying to add more than `max_listeners` to an Event.
    #[error("too many listeners for event '{event}' (max {max})")]
    OverloadedEvent { event: String, max: usize },
}
