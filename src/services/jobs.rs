use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use tracing::{debug, warn};

/// Runs blocking collaborator calls off the UI thread.
///
/// Each job gets its own thread and reports back with exactly one message;
/// the event loop drains them with [`JobRunner::drain`] between frames. A job
/// that panics, or whose thread cannot be started, reports through its
/// fallback instead.
#[derive(Debug)]
pub struct JobRunner<M> {
    tx: Sender<M>,
    rx: Receiver<M>,
}

/// Builds the completion message for a job that did not finish.
type Fallback<M> = Box<dyn FnOnce(String) -> M + Send>;

impl<M: Send + 'static> JobRunner<M> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// Run `job` on a new thread and queue its completion message.
    ///
    /// `fallback` turns a failure reason into the message sent when the job
    /// panics or its thread cannot be spawned.
    pub fn spawn<F, G>(&self, name: &'static str, job: F, fallback: G)
    where
        F: FnOnce() -> M + Send + 'static,
        G: FnOnce(String) -> M + Send + 'static,
    {
        self.spawn_on(thread::Builder::new(), name, job, fallback);
    }

    fn spawn_on<F, G>(&self, builder: thread::Builder, name: &'static str, job: F, fallback: G)
    where
        F: FnOnce() -> M + Send + 'static,
        G: FnOnce(String) -> M + Send + 'static,
    {
        // Shared so whichever side sees the failure can still report it.
        let slot: Arc<Mutex<Option<Fallback<M>>>> = Arc::new(Mutex::new(Some(Box::new(fallback))));
        let thread_slot = Arc::clone(&slot);
        let tx = self.tx.clone();
        let spawned = builder.name(format!("resumark-{name}")).spawn(move || {
            debug!(job = name, "job started");
            let msg = match panic::catch_unwind(AssertUnwindSafe(job)) {
                Ok(msg) => msg,
                Err(payload) => {
                    let reason = panic_reason(payload.as_ref());
                    warn!(job = name, %reason, "job panicked");
                    let Some(fallback) = take_fallback(&thread_slot) else {
                        return;
                    };
                    fallback(reason)
                }
            };
            if tx.send(msg).is_err() {
                debug!(job = name, "job finished after receiver closed");
            }
        });
        if let Err(err) = spawned {
            warn!(job = name, error = %err, "failed to spawn job thread");
            if let Some(fallback) = take_fallback(&slot) {
                let _ = self.tx.send(fallback(err.to_string()));
            }
        }
    }

    /// Completed job messages, without blocking.
    pub fn drain(&self) -> Vec<M> {
        let mut done = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            done.push(msg);
        }
        done
    }

    /// Block until the next job completes.
    pub fn wait(&self) -> Option<M> {
        self.rx.recv().ok()
    }
}

impl<M: Send + 'static> Default for JobRunner<M> {
    fn default() -> Self {
        Self::new()
    }
}

fn take_fallback<M>(slot: &Mutex<Option<Fallback<M>>>) -> Option<Fallback<M>> {
    slot.lock().ok().and_then(|mut fallback| fallback.take())
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "job panicked".to_string())
}
