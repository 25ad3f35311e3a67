// File: rusty-validator/src/flash.rs
// Purpose: Timer abstraction and the cosmetic error flash

//! Error flash.
//!
//! After a submission attempt with errors, the marker on every errored field
//! is toggled `toggles` times, one toggle per `interval`, ending with the
//! marker present. Each toggle is an independent fire-and-forget task that
//! owns its own phase; nothing is cancelled when a new attempt starts.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::field::Field;
use crate::settings::FlashSettings;

pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs a task after a delay
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: Task);
}

/// Runs every task immediately, ignoring the delay
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateScheduler;

impl Scheduler for ImmediateScheduler {
    fn schedule(&self, _delay: Duration, task: Task) {
        task();
    }
}

/// Queues tasks until `run_pending` is called
#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<Vec<(Duration, Task)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    /// Delays of the queued tasks, in scheduling order
    pub fn delays(&self) -> Vec<Duration> {
        self.lock().iter().map(|(delay, _)| *delay).collect()
    }

    /// Run queued tasks in delay order, ties in scheduling order
    pub fn run_pending(&self) -> usize {
        let mut tasks = std::mem::take(&mut *self.lock());
        tasks.sort_by_key(|(delay, _)| *delay);

        let count = tasks.len();
        for (_, task) in tasks {
            task();
        }
        count
    }

    /// Run only the tasks due at or before `elapsed`
    pub fn run_until(&self, elapsed: Duration) -> usize {
        let due = {
            let mut queue = self.lock();
            let (due, later): (Vec<_>, Vec<_>) =
                std::mem::take(&mut *queue).into_iter().partition(|(delay, _)| *delay <= elapsed);
            *queue = later;
            due
        };

        let mut due = due;
        due.sort_by_key(|(delay, _)| *delay);
        let count = due.len();
        for (_, task) in due {
            task();
        }
        count
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Duration, Task)>> {
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        self.lock().push((delay, task));
    }
}

/// Runs each task on the tokio runtime after sleeping for its delay
#[cfg(feature = "tokio")]
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: tokio::runtime::Handle,
}

#[cfg(feature = "tokio")]
impl TokioScheduler {
    /// Bind to the runtime of the calling context.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime; use [`TokioScheduler::try_current`]
    /// to check first.
    pub fn current() -> Self {
        Self {
            handle: tokio::runtime::Handle::current(),
        }
    }

    /// Bind to the runtime of the calling context, if there is one
    pub fn try_current() -> Option<Self> {
        tokio::runtime::Handle::try_current()
            .ok()
            .map(|handle| Self { handle })
    }

    pub fn with_handle(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }
}

#[cfg(feature = "tokio")]
impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}

/// Marker state for toggle `index` of `toggles`; the last toggle is always on
pub fn phase(index: u32, toggles: u32) -> bool {
    (toggles - 1 - index) % 2 == 0
}

/// Schedule the flash over `errored`
pub fn schedule_flash(
    scheduler: &dyn Scheduler,
    errored: &[Arc<dyn Field>],
    marker: &str,
    settings: FlashSettings,
) {
    if errored.is_empty() || settings.toggles == 0 {
        return;
    }

    for index in 0..settings.toggles {
        let on = phase(index, settings.toggles);
        let fields = errored.to_vec();
        let marker = marker.to_string();
        let delay = settings.interval() * (index + 1);

        scheduler.schedule(
            delay,
            Box::new(move || {
                for field in &fields {
                    field.set_marker(&marker, on);
                }
            }),
        );
    }

    tracing::trace!(fields = errored.len(), toggles = settings.toggles, "Error flash scheduled");
}
