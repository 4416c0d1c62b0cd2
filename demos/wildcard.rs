//! Example: pattern-matched events with synchronous and asynchronous emission.
use std::sync::Arc;

use rs_emitter::{wildcard, EventEmitter, EventHandler};

fn listener(name: &'static str) -> rs_emitter::Callback<String> {
    Arc::new(move |event: &str, args: &[String]| {
        println!("listener={name}, event={event}, data={args:?}");
    })
}

#[tokio::main]
async fn main() -> Result<(), rs_emitter::EventError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let emitter = EventEmitter::<String>::with_matcher(wildcard());
    emitter.on("*", "ln1", listener("ln1"))?;
    emitter.on("*.suffix", "ln2", listener("ln2"))?;
    emitter.on("prefix.*", "ln3", listener("ln3"))?;
    emitter.on("exact", "ln4", listener("ln4"))?;
    emitter.once("exact", "ln5", listener("ln5"))?;

    let mut events = emitter.event_names();
    events.sort();
    println!("Events: {events:?}");

    println!("Emit the event sync");
    emitter.emit("e1.suffix", vec!["data1".to_string()]);
    emitter.emit("prefix.e2", vec!["data2".to_string()]);
    emitter.emit("exact", vec!["data3".to_string()]);

    println!("Emit the event async");
    emitter
        .emit_async("e1.suffix", vec!["data4".to_string()])
        .wait()
        .await;
    emitter
        .emit_async("prefix.e2", vec!["data5".to_string()])
        .wait()
        .await;
    emitter
        .emit_async("exact", vec!["data6".to_string()])
        .wait()
        .await;

    emitter.clear();
    println!("Events after clear: {:?}", emitter.event_names());
    Ok(())
}
