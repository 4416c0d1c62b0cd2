use std::collections::HashMap;
use std::sync::Arc;

use crate::{Listener, MatchFn};

/// Authoritative registry state: event name -> listener name -> listener.
pub(crate) type Entries<T> = HashMap<String, HashMap<String, Listener<T>>>;

/// Immutable, point-in-time view of every event and its listeners.
///
/// Built from scratch after each mutation and published as a whole, so a reader holding a
/// snapshot never sees a partially applied change. Listener lists are ordered by ascending
/// registration sequence.
pub(crate) struct Snapshot<T> {
    events: HashMap<String, Arc<[Listener<T>]>>,
}

impl<T> Snapshot<T> {
    pub(crate) fn empty() -> Self {
        Self {
            events: HashMap::new(),
        }
    }

    pub(crate) fn build(entries: &Entries<T>) -> Self {
        let events = entries
            .iter()
            .filter(|(_, listeners)| !listeners.is_empty())
            .map(|(event, listeners)| {
                let mut ordered: Vec<Listener<T>> = listeners.values().cloned().collect();
                ordered.sort_by_key(Listener::sequence);
                (event.clone(), Arc::<[Listener<T>]>::from(ordered))
            })
            .collect();
        Self { events }
    }

    pub(crate) fn event_names(&self) -> Vec<String> {
        self.events.keys().cloned().collect()
    }

    pub(crate) fn event_count(&self) -> usize {
        self.events.len()
    }

    pub(crate) fn listeners(&self, event: &str) -> Option<&Arc<[Listener<T>]>> {
        self.events.get(event)
    }

    /// Listeners an emission of `event` dispatches to.
    ///
    /// Without a matcher this is a direct key lookup. With one, every registered pattern is
    /// tested against `event` and the matching lists are merged in registration order.
    pub(crate) fn resolve(&self, event: &str, matcher: Option<&MatchFn>) -> Arc<[Listener<T>]> {
        match matcher {
            None => self
                .events
                .get(event)
                .cloned()
                .unwrap_or_else(|| Arc::from(Vec::new())),
            Some(matches) => {
                let mut resolved: Vec<Listener<T>> = self
                    .events
                    .iter()
                    .filter(|(pattern, _)| matches(pattern.as_str(), event))
                    .flat_map(|(_, listeners)| listeners.iter().cloned())
                    .collect();
                resolved.sort_by_key(Listener::sequence);
                Arc::from(resolved)
            }
        }
    }
}
