// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cancellable fixed-interval task.

use crate::timer::Timer;
use avionix_core::{CancellationToken, TickTask};
use futures::future::{select, Either};
use std::pin::pin;
use std::time::Duration;
use tracing::trace;

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Longest supported period (one year); keeps deadline arithmetic in range.
pub const MAX_PERIOD: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Handle to a callback invoked on a fixed interval.
///
/// The callback runs on a single spawned task, so two invocations never overlap.
/// Deadlines are computed from the timer's clock rather than chained sleeps; when a
/// callback overruns one or more periods the missed deadlines are skipped instead of
/// being replayed back to back.
///
/// Dropping the handle or calling [`cancel`](Self::cancel) stops the task before its
/// next invocation.
///
/// # Example
///
/// ```rust
/// use avionix_runtime::{RepeatingTask, TokioTimer};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() {
/// let task = RepeatingTask::spawn(TokioTimer, Duration::from_millis(1000), || {
///     // advance state
/// });
/// task.cancel();
/// # }
/// ```
#[derive(Debug)]
pub struct RepeatingTask {
    task: TickTask,
    period: Duration,
}

impl RepeatingTask {
    /// Spawn `on_tick` to run every `period` on `timer`'s clock.
    ///
    /// The first invocation happens one full period after spawning. Periods below
    /// one millisecond are raised to one millisecond, periods above [`MAX_PERIOD`]
    /// are lowered to it.
    pub fn spawn<T, F>(timer: T, period: Duration, mut on_tick: F) -> Self
    where
        T: Timer,
        F: FnMut() + Send + 'static,
    {
        let period = period.clamp(MIN_PERIOD, MAX_PERIOD);

        let task = TickTask::spawn(move |cancel: CancellationToken| async move {
            let mut deadline = timer.now() + period;

            loop {
                let now = timer.now();
                let wait = if deadline > now {
                    deadline - now
                } else {
                    Duration::ZERO
                };

                let sleep = pin!(timer.sleep_future(wait));
                let cancelled = pin!(cancel.cancelled());
                if let Either::Right(_) = select(sleep, cancelled).await {
                    break;
                }
                if cancel.is_cancelled() {
                    break;
                }

                on_tick();

                deadline = deadline + period;
                let now = timer.now();
                if deadline <= now {
                    deadline = now + period;
                }
            }

            trace!(?period, "repeating task stopped");
        });

        Self { task, period }
    }

    /// Stop the task. Idempotent.
    pub fn cancel(&self) {
        self.task.cancel();
    }

    /// Check whether the task has been stopped.
    pub fn is_cancelled(&self) -> bool {
        self.task.is_cancelled()
    }

    /// The interval between invocations.
    pub fn period(&self) -> Duration {
        self.period
    }
}
