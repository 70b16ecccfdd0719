//! Periodic fallback save timer owned by an editing session.

use crate::BoxFuture;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Runs `tick` every `period` until stopped or dropped.
///
/// The first tick happens one full period after start. A tick that is still
/// running when the next one is due delays the schedule instead of bursting.
pub struct PeriodicSaver {
    task: JoinHandle<()>,
}

impl PeriodicSaver {
    pub fn start<F>(period: Duration, tick: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, ()> + Send + Sync + 'static,
    {
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                tick().await;
            }
        });
        tracing::debug!("Periodic save started ({} ms)", period.as_millis());
        Self { task }
    }

    pub fn stop(&self) {
        if !self.task.is_finished() {
            self.task.abort();
            tracing::debug!("Periodic save stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for PeriodicSaver {
    fn drop(&mut self) {
        self.task.abort();
    }
}
