//! Cooperative cancellation for long-running solver and generator work.

use std::sync::{Mutex, PoisonError};

/// Lifecycle of a cancellable unit of work.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TaskState {
    /// Not started, or finished without an abort request.
    Idle,
    /// Currently running.
    Running,
    /// An abort was requested; the work should stop at the next check.
    Aborted,
}

/// Shared handle that long-running work polls for abort requests.
///
/// The intended split: a controller thread holds the handle and calls
/// [`request_abort`](CancellableTask::request_abort), while the worker checks
/// [`is_running`](CancellableTask::is_running) at every convenient point of
/// its inner loop and bails out once it turns false.
#[derive(Debug)]
pub struct CancellableTask {
    state: Mutex<TaskState>,
}

impl CancellableTask {
    /// Creates a handle in the [`TaskState::Idle`] state.
    pub fn new() -> CancellableTask {
        CancellableTask {
            state: Mutex::new(TaskState::Idle),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TaskState> {
        // state is a plain enum, a panicked holder cannot leave it torn
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Transitions to [`TaskState::Running`]. Returns false without touching
    /// the state if the task is already running.
    pub fn start(&self) -> bool {
        let mut state = self.lock();
        if *state == TaskState::Running {
            return false;
        }
        *state = TaskState::Running;
        true
    }

    /// Requests an abort of a running task. Has no effect in any other state.
    pub fn request_abort(&self) {
        let mut state = self.lock();
        if *state == TaskState::Running {
            *state = TaskState::Aborted;
        }
    }

    /// Checks if the task is running and has not been asked to stop.
    pub fn is_running(&self) -> bool {
        *self.lock() == TaskState::Running
    }

    /// Marks the work as done. Returns true if it ran to completion, false
    /// if an abort had been requested; either way the state becomes
    /// [`TaskState::Idle`].
    pub fn finish(&self) -> bool {
        let mut state = self.lock();
        let completed = *state == TaskState::Running;
        *state = TaskState::Idle;
        completed
    }

    /// The current state.
    pub fn state(&self) -> TaskState {
        *self.lock()
    }
}

impl Default for CancellableTask {
    fn default() -> Self {
        CancellableTask::new()
    }
}
