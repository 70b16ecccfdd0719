//! Trailing-edge debouncer.
//!
//! Every [`Debouncer::call`] restarts the quiet window. When the window
//! elapses the most recent value is handed to the action; values superseded
//! inside the window are dropped, never queued. Callers observe effects
//! (session state, events) instead of a return value.

use crate::BoxFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// Async action invoked with the last value of a burst.
pub type DebouncedAction<T> = Arc<dyn Fn(T) -> BoxFuture<'static, ()> + Send + Sync>;

enum Command<T> {
    Call(T),
    Flush,
    Cancel,
}

/// Handle to a debounce task. Dropping it discards any pending value.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<Command<T>>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn a debouncer on the current tokio runtime.
    pub fn new<F>(delay: Duration, action: F) -> Self
    where
        F: Fn(T) -> BoxFuture<'static, ()> + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(delay, rx, Arc::new(action)));
        Self { tx, task }
    }

    /// Record `value` and restart the quiet window.
    pub fn call(&self, value: T) {
        let _ = self.tx.send(Command::Call(value));
    }

    /// Fire the pending value now, if any.
    pub fn flush(&self) {
        let _ = self.tx.send(Command::Flush);
    }

    /// Discard the pending value, if any.
    pub fn cancel(&self) {
        let _ = self.tx.send(Command::Cancel);
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<T: Send + 'static>(
    delay: Duration,
    mut rx: mpsc::UnboundedReceiver<Command<T>>,
    action: DebouncedAction<T>,
) {
    let mut pending: Option<(T, Instant)> = None;
    loop {
        let deadline = pending.as_ref().map(|(_, at)| *at);
        let quiet = async move {
            match deadline {
                Some(at) => sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            command = rx.recv() => match command {
                Some(Command::Call(value)) => {
                    pending = Some((value, Instant::now() + delay));
                }
                Some(Command::Flush) => {
                    if let Some((value, _)) = pending.take() {
                        tokio::spawn(action(value));
                    }
                }
                Some(Command::Cancel) => pending = None,
                None => break,
            },
            _ = quiet => {
                if let Some((value, _)) = pending.take() {
                    tokio::spawn(action(value));
                }
            }
        }
    }
}
