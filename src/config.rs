use std::marker::PhantomData;

use crate::{EventEmitter, MatchFn};

/// Tunables for an [`EventEmitter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitterConfig {
    /// Maximum listeners per event; `0` means unlimited.
    pub max_listeners: usize,
}

/// Builder for [`EventEmitter`].
///
/// # Example
/// ```
/// use rs_emitter::{wildcard, EventEmitter, EventHandler};
///
/// let emitter = EventEmitter::<String>::builder()
///     .max_listeners(8)
///     .matcher(wildcard())
///     .build();
/// assert_eq!(emitter.max_listeners(), 8);
/// assert!(emitter.is_pattern_mode());
/// ```
pub struct EmitterBuilder<T> {
    config: EmitterConfig,
    matcher: Option<MatchFn>,
    _payload: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> EmitterBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            config: EmitterConfig::default(),
            matcher: None,
            _payload: PhantomData,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: EmitterConfig) -> Self {
        self.config = config;
        self
    }

    /// Cap the number of listeners per event; `0` removes the cap.
    pub fn max_listeners(mut self, max: usize) -> Self {
        self.config.max_listeners = max;
        self
    }

    /// Switch the emitter to pattern-matching mode.
    pub fn matcher(mut self, matcher: MatchFn) -> Self {
        self.matcher = Some(matcher);
        self
    }

    pub fn build(self) -> EventEmitter<T> {
        EventEmitter::from_parts(self.config, self.matcher)
    }
}
