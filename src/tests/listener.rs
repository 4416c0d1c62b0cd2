use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use crate::{wildcard, Callback, EventEmitter, EventHandler};

fn counter(calls: &Arc<AtomicU64>) -> Callback<u32> {
    let calls = Arc::clone(calls);
    Arc::new(move |_: &str, _: &[u32]| {
        calls.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn listener_accessors() {
    let emitter = EventEmitter::<u32>::new();
    let calls = Arc::new(AtomicU64::new(0));
    let listener = emitter.on("event", "count", counter(&calls)).unwrap();

    assert_eq!(listener.name(), "count");
    assert!(!listener.is_once());
    listener.call("event", &[1, 2]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let stored = emitter.listeners("event");
    assert_eq!(stored, vec![listener]);
}

#[test]
fn debug_output_names_the_listener() {
    let emitter = EventEmitter::<u32>::new();
    let listener = emitter
        .once("event", "printer", Arc::new(|_: &str, _: &[u32]| {}))
        .unwrap();

    let debug = format!("{listener:?}");
    assert!(debug.contains("printer"));
    assert!(debug.contains("once: true"));
}

mod once_listeners {
    use super::*;

    #[test]
    fn fires_once_then_detaches() {
        let emitter = EventEmitter::<u32>::new();
        let calls = Arc::new(AtomicU64::new(0));
        let listener = emitter.once("event", "once", counter(&calls)).unwrap();
        assert!(listener.is_once());

        assert_eq!(emitter.emit("event", vec![1]), 1);
        assert_eq!(emitter.emit("event", vec![2]), 0);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(emitter.event_names().is_empty());
    }

    #[test]
    fn detaches_before_forwarding_the_call() {
        let emitter = EventEmitter::<u32>::new();
        let seen_during_call = Arc::new(AtomicU64::new(u64::MAX));

        let inner = emitter.clone();
        let seen = Arc::clone(&seen_during_call);
        emitter
            .once("event", "once", Arc::new(move |_: &str, _: &[u32]| {
                seen.store(inner.listener_count("event") as u64, Ordering::SeqCst);
            }))
            .unwrap();

        emitter.emit("event", vec![]);
        assert_eq!(seen_during_call.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn leaves_other_listeners_in_place() {
        let emitter = EventEmitter::<u32>::new();
        let calls = Arc::new(AtomicU64::new(0));
        emitter.on("event", "always", counter(&calls)).unwrap();
        emitter.once("event", "once", counter(&calls)).unwrap();

        emitter.emit("event", vec![]);
        emitter.emit("event", vec![]);

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        let names: Vec<String> = emitter
            .listeners("event")
            .iter()
            .map(|l| l.name().to_string())
            .collect();
        assert_eq!(names, vec!["always"]);
    }

    #[test]
    fn fires_at_most_once_under_racing_emits() {
        let emitter = EventEmitter::<u32>::new();
        let calls = Arc::new(AtomicU64::new(0));
        emitter.once("event", "once", counter(&calls)).unwrap();

        let barrier = Arc::new(Barrier::new(8));
        let racers: Vec<_> = (0..8)
            .map(|_| {
                let emitter = emitter.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for _ in 0..10 {
                        emitter.emit("event", vec![]);
                    }
                })
            })
            .collect();
        for racer in racers {
            racer.join().unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!emitter.has_listener("event"));
    }

    #[test]
    fn stale_wrapper_keeps_re_registered_listener() {
        let emitter = EventEmitter::<u32>::new();
        let once_calls = Arc::new(AtomicU64::new(0));
        let stale = emitter.once("event", "ln", counter(&once_calls)).unwrap();

        // replace the once-listener before it ever fires
        let calls = Arc::new(AtomicU64::new(0));
        emitter.on("event", "ln", counter(&calls)).unwrap();

        // a snapshot taken earlier may still invoke the old wrapper
        stale.call("event", &[]);
        assert_eq!(once_calls.load(Ordering::SeqCst), 1);
        assert_eq!(emitter.listener_count("event"), 1);

        emitter.emit("event", vec![]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn detaches_from_pattern_it_was_registered_under() {
        let emitter = EventEmitter::<u32>::with_matcher(wildcard());
        let calls = Arc::new(AtomicU64::new(0));
        emitter.once("job.*", "once", counter(&calls)).unwrap();

        assert_eq!(emitter.emit("job.started", vec![]), 1);
        assert_eq!(emitter.emit("job.finished", vec![]), 0);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(emitter.event_names().is_empty());
    }

    #[test]
    fn wrapper_outliving_emitter_is_harmless() {
        let emitter = EventEmitter::<u32>::new();
        let calls = Arc::new(AtomicU64::new(0));
        let listener = emitter.once("event", "once", counter(&calls)).unwrap();
        drop(emitter);

        listener.call("event", &[]);
        listener.call("event", &[]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
