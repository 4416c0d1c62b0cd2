use std::any::Any;
use std::sync::Arc;

/// Type alias for the argument list shared by every listener of one emission.
///
/// The arguments are collected once per `emit`/`emit_async` call and handed to each listener
/// by reference, so concurrent listeners share a single allocation.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use rs_emitter::EventArgs;
///
/// let args: EventArgs<String> = Arc::from(vec![String::from("x")]);
/// assert_eq!(args.len(), 1);
/// ```
pub type EventArgs<T> = Arc<[T]>;

/// Opaque argument type used when the emitter is agnostic to payload shape.
///
/// Listeners downcast the values they understand and ignore the rest.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use rs_emitter::AnyPayload;
///
/// let arg: AnyPayload = Arc::new(42_u32);
/// assert_eq!(arg.downcast_ref::<u32>(), Some(&42));
/// ```
pub type AnyPayload = Arc<dyn Any + Send + Sync>;

/// Type alias for a listener callback.
///
/// Invoked with the emitted event name and the emission's arguments.
/// Requires `Send + Sync` since listeners may run on any thread.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use rs_emitter::Callback;
///
/// let callback: Callback<String> = Arc::new(|event: &str, args: &[String]| {
///     println!("{event}: {args:?}");
/// });
/// ```
pub type Callback<T> = Arc<dyn Fn(&str, &[T]) + Send + Sync>;

/// Pattern predicate, called as `matcher(registered_pattern, emitted_event)`.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use rs_emitter::MatchFn;
///
/// let exact: MatchFn = Arc::new(|pattern: &str, event: &str| pattern == event);
/// assert!(exact("a", "a"));
/// ```
pub type MatchFn = Arc<dyn Fn(&str, &str) -> bool + Send + Sync>;
