use std::any::Any;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use tracing::{debug, dispatcher, trace, warn, Dispatch};

use crate::listener;
use crate::pending::Task;
use crate::snapshot::{Entries, Snapshot};
use crate::{
    AnyPayload, Callback, EmitterBuilder, EmitterConfig, EventArgs, EventError, EventHandler,
    Listener, MatchFn, PendingEmission,
};

/// An event emitter keyed by event name and listener name.
///
/// Mutations (`on`, `once`, `off`) are serialized under a single writer lock. Each one
/// rebuilds an immutable snapshot of the whole registry and publishes it with an atomic
/// swap; emissions only load the current snapshot, so they never wait on registration and
/// observe either the state before or after a mutation, never a mix.
///
/// Clones share the same registry.
///
/// # Type Parameters
/// * `T` - The argument type passed to listeners. Defaults to the opaque [`AnyPayload`].
///
/// # Example
/// ```
/// use std::sync::{Arc, Mutex};
/// use rs_emitter::{EventEmitter, EventHandler};
///
/// let emitter = EventEmitter::<String>::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let log = Arc::clone(&seen);
/// emitter.on("e1", "ln1", Arc::new(move |event: &str, args: &[String]| {
///     log.lock().unwrap().push(format!("ln1 {event} {args:?}"));
/// })).unwrap();
///
/// assert_eq!(emitter.emit("e1", vec!["x".to_string()]), 1);
/// assert_eq!(*seen.lock().unwrap(), vec![r#"ln1 e1 ["x"]"#]);
/// ```
pub struct EventEmitter<T = AnyPayload> {
    inner: Arc<Registry<T>>,
}

struct Registry<T> {
    entries: Mutex<Entries<T>>,
    snapshot: ArcSwap<Snapshot<T>>,
    sequence: AtomicU64,
    max_listeners: AtomicUsize,
    matcher: Option<MatchFn>,
}

impl<T> Registry<T> {
    /// Rebuilds the read view from `entries` and swaps it in. Callers hold the writer lock.
    ///
    /// Returns the retired snapshot so the caller can drop it after releasing the lock;
    /// dropping it may run user `Drop` code captured by listener callbacks.
    fn publish(&self, entries: &Entries<T>) -> Arc<Snapshot<T>> {
        self.snapshot.swap(Arc::new(Snapshot::build(entries)))
    }

    fn insert(&self, event: &str, listener: Listener<T>) -> Result<(), EventError> {
        let mut entries = self.entries.lock();

        let max = self.max_listeners.load(Ordering::Acquire);
        if max > 0 {
            let (count, replacing) = entries.get(event).map_or((0, false), |listeners| {
                (listeners.len(), listeners.contains_key(listener.name()))
            });
            if !replacing && count >= max {
                drop(entries);
                warn!(event, listener = listener.name(), max, "listener limit reached");
                return Err(EventError::OverloadedEvent {
                    event: event.to_string(),
                    max,
                });
            }
        }

        let replaced = entries
            .entry(event.to_string())
            .or_default()
            .insert(listener.name().to_string(), listener);
        let retired = self.publish(&entries);
        drop(entries);

        drop((replaced, retired));
        Ok(())
    }

    fn remove(&self, event: &str, name: &str) -> usize {
        let mut entries = self.entries.lock();

        if event.is_empty() {
            let cleared = std::mem::take(&mut *entries);
            let retired = self.snapshot.swap(Arc::new(Snapshot::empty()));
            drop(entries);

            let total = cleared.values().map(HashMap::len).sum();
            drop((cleared, retired));
            return total;
        }

        let removed: Vec<Listener<T>> = if name.is_empty() {
            entries
                .remove(event)
                .map(|listeners| listeners.into_values().collect())
                .unwrap_or_default()
        } else {
            match entries.get_mut(event) {
                Some(listeners) => {
                    let taken: Vec<_> = listeners.remove(name).into_iter().collect();
                    if listeners.is_empty() {
                        entries.remove(event);
                    }
                    taken
                }
                None => Vec::new(),
            }
        };

        let retired = (!removed.is_empty()).then(|| self.publish(&entries));
        drop(entries);

        let count = removed.len();
        drop((removed, retired));
        count
    }

    /// Removes `name` from `event` only while it is still the registration `sequence`.
    fn remove_registration(&self, event: &str, name: &str, sequence: u64) -> bool {
        let mut entries = self.entries.lock();

        let Some(listeners) = entries.get_mut(event) else {
            return false;
        };
        if !listeners.get(name).is_some_and(|l| l.sequence() == sequence) {
            return false;
        }
        let taken = listeners.remove(name);
        if listeners.is_empty() {
            entries.remove(event);
        }
        let retired = self.publish(&entries);
        drop(entries);

        drop((taken, retired));
        true
    }
}

impl<T: Send + Sync + 'static> EventEmitter<T> {
    /// Creates an exact-match emitter with no listener cap.
    ///
    /// # Example
    /// ```
    /// use rs_emitter::{EventEmitter, EventHandler};
    ///
    /// let emitter = EventEmitter::<String>::new();
    /// assert!(emitter.event_names().is_empty());
    /// assert_eq!(emitter.max_listeners(), 0);
    /// ```
    pub fn new() -> Self {
        Self::from_parts(EmitterConfig::default(), None)
    }

    /// Creates a pattern-matching emitter.
    ///
    /// Registered event names are treated as patterns and `matcher(pattern, emitted)` decides
    /// which of them an emission reaches.
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use rs_emitter::{wildcard, EventEmitter, EventHandler};
    ///
    /// let emitter = EventEmitter::<u8>::with_matcher(wildcard());
    /// emitter.on("user.*", "audit", Arc::new(|_event: &str, _args: &[u8]| {})).unwrap();
    /// assert_eq!(emitter.emit("user.created", vec![]), 1);
    /// assert_eq!(emitter.emit("order.created", vec![]), 0);
    /// ```
    pub fn with_matcher(matcher: MatchFn) -> Self {
        Self::from_parts(EmitterConfig::default(), Some(matcher))
    }

    /// Starts an [`EmitterBuilder`].
    pub fn builder() -> EmitterBuilder<T> {
        EmitterBuilder::new()
    }

    pub(crate) fn from_parts(config: EmitterConfig, matcher: Option<MatchFn>) -> Self {
        Self {
            inner: Arc::new(Registry {
                entries: Mutex::new(Entries::new()),
                snapshot: ArcSwap::from_pointee(Snapshot::empty()),
                sequence: AtomicU64::new(0),
                max_listeners: AtomicUsize::new(config.max_listeners),
                matcher,
            }),
        }
    }

    /// Whether emissions resolve listeners through a pattern matcher.
    pub fn is_pattern_mode(&self) -> bool {
        self.inner.matcher.is_some()
    }

    /// Number of events that currently have listeners.
    pub fn event_count(&self) -> usize {
        self.inner.snapshot.load().event_count()
    }

    /// Removes every event and listener. Same as `off("", "")`.
    pub fn clear(&self) -> usize {
        self.off("", "")
    }

    fn next_sequence(&self) -> u64 {
        self.inner.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn resolve(&self, event: &str) -> Arc<[Listener<T>]> {
        let listeners = self
            .inner
            .snapshot
            .load()
            .resolve(event, self.inner.matcher.as_ref());
        if listeners.is_empty() {
            trace!(event, "no listeners resolved");
        }
        listeners
    }
}

fn validate(event: &str, name: &str) -> Result<(), EventError> {
    if event.is_empty() {
        return Err(EventError::EmptyEventName);
    }
    if name.is_empty() {
        return Err(EventError::EmptyListenerName);
    }
    Ok(())
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

/// Runs one listener inside an asynchronous emission, turning a panic into a log line.
fn dispatch_isolated<T>(listener: &Listener<T>, event: &str, args: &[T]) {
    if let Err(panic) = catch_unwind(AssertUnwindSafe(|| listener.call(event, args))) {
        warn!(
            event,
            listener = listener.name(),
            reason = panic_message(&*panic),
            "listener panicked during asynchronous emission"
        );
    }
}

impl<T: Send + Sync + 'static> EventHandler<T> for EventEmitter<T> {
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use rs_emitter::{EventEmitter, EventHandler};
    ///
    /// let emitter = EventEmitter::<String>::new();
    /// emitter.on("event_one", "a", Arc::new(|_: &str, _: &[String]| {})).unwrap();
    /// emitter.on("event_two", "a", Arc::new(|_: &str, _: &[String]| {})).unwrap();
    ///
    /// let mut names = emitter.event_names();
    /// names.sort();
    /// assert_eq!(names, vec!["event_one", "event_two"]);
    /// ```
    fn event_names(&self) -> Vec<String> {
        self.inner.snapshot.load().event_names()
    }

    fn listeners(&self, event_name: &str) -> Vec<Listener<T>> {
        self.inner
            .snapshot
            .load()
            .listeners(event_name)
            .map(|listeners| listeners.to_vec())
            .unwrap_or_default()
    }

    fn listener_count(&self, event_name: &str) -> usize {
        self.inner
            .snapshot
            .load()
            .listeners(event_name)
            .map_or(0, |listeners| listeners.len())
    }

    fn set_max_listeners(&self, max: usize) {
        self.inner.max_listeners.store(max, Ordering::Release);
    }

    fn max_listeners(&self) -> usize {
        self.inner.max_listeners.load(Ordering::Acquire)
    }

    fn on(
        &self,
        event_name: &str,
        listener_name: &str,
        callback: Callback<T>,
    ) -> Result<Listener<T>, EventError> {
        validate(event_name, listener_name)?;

        let listener = Listener::new(listener_name, callback, self.next_sequence(), false);
        self.inner.insert(event_name, listener.clone())?;
        debug!(
            event = event_name,
            listener = listener_name,
            sequence = listener.sequence(),
            "listener registered"
        );
        Ok(listener)
    }

    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicU64, Ordering};
    /// use rs_emitter::{EventEmitter, EventHandler};
    ///
    /// let emitter = EventEmitter::<String>::new();
    /// let calls = Arc::new(AtomicU64::new(0));
    /// let counter = Arc::clone(&calls);
    /// emitter.once("ready", "boot", Arc::new(move |_: &str, _: &[String]| {
    ///     counter.fetch_add(1, Ordering::SeqCst);
    /// })).unwrap();
    ///
    /// emitter.emit("ready", vec![]);
    /// emitter.emit("ready", vec![]);
    /// assert_eq!(calls.load(Ordering::SeqCst), 1);
    /// assert!(!emitter.has_listener("ready"));
    /// ```
    fn once(
        &self,
        event_name: &str,
        listener_name: &str,
        callback: Callback<T>,
    ) -> Result<Listener<T>, EventError> {
        validate(event_name, listener_name)?;

        let sequence = self.next_sequence();
        let registry = Arc::downgrade(&self.inner);
        let event = event_name.to_string();
        let name = listener_name.to_string();
        let guarded = listener::once(callback, move || {
            if let Some(registry) = registry.upgrade() {
                if registry.remove_registration(&event, &name, sequence) {
                    debug!(event = %event, listener = %name, "once listener detached");
                }
            }
        });

        let listener = Listener::new(listener_name, guarded, sequence, true);
        self.inner.insert(event_name, listener.clone())?;
        debug!(
            event = event_name,
            listener = listener_name,
            sequence,
            "once listener registered"
        );
        Ok(listener)
    }

    fn off(&self, event_name: &str, listener_name: &str) -> usize {
        let removed = self.inner.remove(event_name, listener_name);
        debug!(
            event = event_name,
            listener = listener_name,
            removed,
            "listeners removed"
        );
        removed
    }

    /// # Example
    /// ```
    /// use std::sync::{Arc, Mutex};
    /// use rs_emitter::{EventEmitter, EventHandler};
    ///
    /// let emitter = EventEmitter::<u32>::new();
    /// let order = Arc::new(Mutex::new(Vec::new()));
    /// for name in ["a", "b"] {
    ///     let order = Arc::clone(&order);
    ///     emitter.on("e", name, Arc::new(move |_: &str, _: &[u32]| {
    ///         order.lock().unwrap().push(name);
    ///     })).unwrap();
    /// }
    ///
    /// assert_eq!(emitter.emit("e", vec![7]), 2);
    /// assert_eq!(*order.lock().unwrap(), vec!["a", "b"]);
    /// assert_eq!(emitter.emit("missing", vec![]), 0);
    /// ```
    fn emit(&self, event_name: &str, args: Vec<T>) -> usize {
        let listeners = self.resolve(event_name);
        for listener in listeners.iter() {
            listener.call(event_name, &args);
        }
        listeners.len()
    }

    fn emit_async(&self, event_name: &str, args: Vec<T>) -> PendingEmission {
        let runtime = tokio::runtime::Handle::try_current().ok();
        if runtime.is_none() {
            trace!(event = event_name, "no runtime, dispatching on dedicated threads");
        }

        let listeners = self.resolve(event_name);
        let args: EventArgs<T> = Arc::from(args);
        let event: Arc<str> = Arc::from(event_name);
        // listener tasks log through the caller's subscriber, wherever they run
        let dispatch = dispatcher::get_default(Dispatch::clone);

        let tasks = listeners
            .iter()
            .map(|listener| {
                let listener = listener.clone();
                let args = Arc::clone(&args);
                let event = Arc::clone(&event);
                let dispatch = dispatch.clone();
                let job = move || {
                    dispatcher::with_default(&dispatch, || {
                        dispatch_isolated(&listener, &event, &args)
                    })
                };
                match &runtime {
                    Some(runtime) => Task::Runtime(runtime.spawn_blocking(job)),
                    None => Task::spawn_thread(job),
                }
            })
            .collect();
        PendingEmission::new(tasks)
    }
}

impl<T> Clone for EventEmitter<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Send + Sync + 'static> Default for EventEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debug for EventEmitter<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("events", &self.inner.snapshot.load().event_count())
            .field("max_listeners", &self.inner.max_listeners.load(Ordering::Relaxed))
            .field("pattern_mode", &self.inner.matcher.is_some())
            .finish()
    }
}
