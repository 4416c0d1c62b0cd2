use std::thread;

use futures::channel::oneshot;
use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::warn;

/// Completion handle for an asynchronous emission.
///
/// Holds one task per dispatched listener invocation. Inside a Tokio runtime the tasks run
/// on its blocking pool; anywhere else each invocation gets its own OS thread. Listener
/// panics are recovered inside each task, so waiting always completes once every invocation
/// has returned. Dropping the handle detaches the tasks; they still run to completion.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use tokio::runtime::Runtime;
/// use rs_emitter::{EventEmitter, EventHandler};
///
/// let emitter = EventEmitter::<u32>::new();
/// emitter.on("tick", "counter", Arc::new(|_event: &str, _args: &[u32]| {})).unwrap();
///
/// let rt = Runtime::new().unwrap();
/// rt.block_on(async {
///     let pending = emitter.emit_async("tick", vec![1]);
///     assert_eq!(pending.len(), 1);
///     pending.wait().await;
/// });
///
/// // no runtime on this thread: listeners run on dedicated threads
/// emitter.emit_async("tick", vec![2]).wait_blocking();
/// ```
#[derive(Debug)]
pub struct PendingEmission {
    tasks: Vec<Task>,
}

/// A single dispatched listener invocation.
#[derive(Debug)]
pub(crate) enum Task {
    Runtime(JoinHandle<()>),
    Thread {
        handle: Option<thread::JoinHandle<()>>,
        done: oneshot::Receiver<()>,
    },
}

impl Task {
    /// Runs `job` on a fresh OS thread.
    pub(crate) fn spawn_thread<F>(job: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (done_tx, done) = oneshot::channel();
        let spawned = thread::Builder::new()
            .name("rs-emitter-listener".to_string())
            .spawn(move || {
                job();
                let _ = done_tx.send(());
            });
        let handle = match spawned {
            Ok(handle) => Some(handle),
            Err(err) => {
                // the sender went down with the closure, so `done` resolves as cancelled
                warn!(error = %err, "failed to spawn listener thread");
                None
            }
        };
        Task::Thread { handle, done }
    }

    fn is_finished(&self) -> bool {
        match self {
            Task::Runtime(handle) => handle.is_finished(),
            Task::Thread { handle, .. } => handle.as_ref().map_or(true, |h| h.is_finished()),
        }
    }

    async fn finish(self) {
        match self {
            Task::Runtime(handle) => {
                if let Err(err) = handle.await {
                    warn!(error = %err, "listener task did not complete");
                }
            }
            Task::Thread { done, .. } => {
                if done.await.is_err() {
                    warn!("listener thread did not complete");
                }
            }
        }
    }
}

impl PendingEmission {
    pub(crate) fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Number of listener invocations dispatched.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// `true` when the emission resolved no listeners.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// `true` once every dispatched invocation has returned.
    pub fn is_finished(&self) -> bool {
        self.tasks.iter().all(Task::is_finished)
    }

    /// Wait until every dispatched invocation has returned, successfully or not.
    pub async fn wait(self) {
        join_all(self.tasks.into_iter().map(Task::finish)).await;
    }

    /// Blocking form of [`wait`](Self::wait) for callers outside of async code.
    ///
    /// Parks the calling thread. Do not call it from a Tokio worker thread; `.await` the
    /// [`wait`](Self::wait) future there instead.
    pub fn wait_blocking(self) {
        futures::executor::block_on(self.wait());
    }
}
