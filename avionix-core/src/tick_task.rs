// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Background task spawning with cooperative cancellation.

use crate::CancellationToken;
use std::future::Future;

/// Handle to a spawned background task, cancelled on drop.
///
/// The spawned future receives a [`CancellationToken`] that it is expected to
/// observe; cancelling the handle (or dropping it) signals the token and the task
/// exits at its next checkpoint.
///
/// Requires a running Tokio runtime.
///
/// # Example
///
/// ```rust
/// use avionix_core::TickTask;
///
/// # #[tokio::main]
/// # async fn main() {
/// let task = TickTask::spawn(|cancel| async move {
///     cancel.cancelled().await;
/// });
///
/// task.cancel();
/// assert!(task.is_cancelled());
/// # }
/// ```
#[derive(Debug)]
pub struct TickTask {
    cancel: CancellationToken,
}

impl TickTask {
    /// Spawn a background task with cancellation support.
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let future = f(cancel.clone());
        tokio::spawn(future);

        Self { cancel }
    }

    /// Signal the task to stop.
    ///
    /// Does not wait for the task to finish.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Check if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Token shared with the spawned task.
    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }
}

impl Drop for TickTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
