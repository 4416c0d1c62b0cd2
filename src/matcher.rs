//! Built-in wildcard matcher for pattern-matching emitters.

use std::sync::Arc;

use crate::MatchFn;

/// Reference matcher comparing a registered `pattern` with an `emitted` event name.
///
/// - `"*"` matches every event.
/// - `"*suffix"` matches events ending in `suffix`.
/// - `"prefix*"` matches events starting with `prefix`.
/// - Anything else must equal the emitted name exactly.
///
/// # Example
/// ```
/// use rs_emitter::wildcard_match;
///
/// assert!(wildcard_match("*", "anything"));
/// assert!(wildcard_match("*.suffix", "e1.suffix"));
/// assert!(wildcard_match("prefix.*", "prefix.e2"));
/// assert!(wildcard_match("exact", "exact"));
/// assert!(!wildcard_match("exact", "exactly"));
/// ```
pub fn wildcard_match(pattern: &str, emitted: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    if let Some(suffix) = pattern.strip_prefix('*') {
        if emitted.ends_with(suffix) {
            return true;
        }
    }
    if let Some(prefix) = pattern.strip_suffix('*') {
        if emitted.starts_with(prefix) {
            return true;
        }
    }
    pattern == emitted
}

/// [`wildcard_match`] as a [`MatchFn`], ready to hand to an emitter.
pub fn wildcard() -> MatchFn {
    Arc::new(wildcard_match)
}
