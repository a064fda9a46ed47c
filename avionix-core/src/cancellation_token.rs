// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cooperative cancellation for the engine's repeating tasks.

use event_listener::Event;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable cancellation flag with async notification.
///
/// All clones share one state: `cancel()` on any clone wakes every task
/// awaiting [`cancelled()`](Self::cancelled).
///
/// # Example
///
/// ```
/// use avionix_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let observer = token.clone();
///
/// token.cancel();
/// assert!(observer.is_cancelled());
/// ```
#[derive(Clone, Debug)]
pub struct CancellationToken {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    flag: AtomicBool,
    wakeup: Event,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                flag: AtomicBool::new(false),
                wakeup: Event::new(),
            }),
        }
    }

    /// Cancel the token, waking every waiter. Idempotent.
    pub fn cancel(&self) {
        if !self.shared.flag.swap(true, Ordering::AcqRel) {
            self.shared.wakeup.notify(usize::MAX);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.shared.flag.load(Ordering::Acquire)
    }

    /// Resolves once the token is cancelled, immediately if it already is.
    pub async fn cancelled(&self) {
        loop {
            if self.is_cancelled() {
                return;
            }
            let listener = self.shared.wakeup.listen();
            // cancel() may have notified before the listener was registered
            if self.is_cancelled() {
                return;
            }
            listener.await;
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
