use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::Callback;

/// A named callback registered against one event.
///
/// `Listener<T>` pairs a callback with the name it is keyed by inside its event and the
/// registration sequence number that fixes its position in emission order.
///
/// Cloning is cheap: the name and callback are reference counted, so snapshots and
/// asynchronous dispatch share them without copying callback state.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use rs_emitter::{EventEmitter, EventHandler};
///
/// let emitter = EventEmitter::<String>::new();
/// let listener = emitter
///     .on("connected", "logger", Arc::new(|_event: &str, _args: &[String]| {}))
///     .unwrap();
///
/// assert_eq!(listener.name(), "logger");
/// assert!(!listener.is_once());
/// ```
pub struct Listener<T> {
    name: Arc<str>,
    callback: Callback<T>,
    sequence: u64,
    once: bool,
}

impl<T> Listener<T> {
    pub(crate) fn new(name: &str, callback: Callback<T>, sequence: u64, once: bool) -> Self {
        Self {
            name: Arc::from(name),
            callback,
            sequence,
            once,
        }
    }

    /// The name the listener is keyed by within its event.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registration sequence number; strictly increasing across an emitter's lifetime.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Whether the listener was registered through `once`.
    pub fn is_once(&self) -> bool {
        self.once
    }

    /// The registered callback. For once-listeners this is the guarded wrapper.
    pub fn callback(&self) -> &Callback<T> {
        &self.callback
    }

    /// Synchronously invoke the callback with an emitted event name and its arguments.
    ///
    /// Panics raised by the callback are not caught.
    #[inline]
    pub fn call(&self, event: &str, args: &[T]) {
        (self.callback)(event, args);
    }
}

/// Wraps `callback` so that it runs at most once.
///
/// The first caller to win the compare-and-set runs `detach` and then the wrapped callback;
/// every later or concurrent caller is a no-op.
pub(crate) fn once<T, D>(callback: Callback<T>, detach: D) -> Callback<T>
where
    T: 'static,
    D: Fn() + Send + Sync + 'static,
{
    let fired = AtomicBool::new(false);
    Arc::new(move |event: &str, args: &[T]| {
        if fired
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            detach();
            callback(event, args);
        }
    })
}

impl<T> Clone for Listener<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            callback: Arc::clone(&self.callback),
            sequence: self.sequence,
            once: self.once,
        }
    }
}

impl<T> Debug for Listener<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener")
            .field("name", &self.name)
            .field("sequence", &self.sequence)
            .field("once", &self.once)
            .finish()
    }
}

impl<T> PartialEq for Listener<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
            && self.name == other.name
            && self.sequence == other.sequence
    }
}
impl<T> Eq for Listener<T> {}
