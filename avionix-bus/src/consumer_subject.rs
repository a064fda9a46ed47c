// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Precision-gated view of a single topic.
//!
//! A [`ConsumerSubject`] holds the last value it let through. Each publish on its
//! topic is rounded to the subject's precision and only surfaces when the rounded
//! value differs from that last value, so jitter below the display precision never
//! reaches the renderer.
//!
//! ## Example
//!
//! ```
//! use avionix_bus::{ConsumerSubject, EventBus};
//!
//! let bus = EventBus::new();
//! let airspeed = ConsumerSubject::create(
//!     bus.subscriber().on("indicated_airspeed").with_precision(0),
//!     0.0,
//! );
//!
//! bus.publish("indicated_airspeed", 110.4);
//! assert_eq!(airspeed.get(), 110.0);
//! ```

use crate::event_bus::EventBus;
use crate::rounding::{is_distinct, round_to};
use crate::TopicConsumer;
use async_channel::Sender;
use avionix_core::{AvionixError, Result};
use futures::stream::Stream;
use parking_lot::Mutex;
use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use tracing::trace;

/// Stream of values emitted by one subject.
pub type ChangeStream = Pin<Box<dyn Stream<Item = f64> + Send + 'static>>;

type Handler = Arc<dyn Fn(f64) + Send + Sync>;

/// Identifies a handler registered with [`ConsumerSubject::sub`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Identifies a subject within the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SubjectId(pub(crate) u64);

struct SubjectState {
    last: f64,
    /// Sequence number of the newest publish applied.
    seen: u64,
    awaiting_first: bool,
    attached: bool,
    next_handler: u64,
    handlers: Vec<(HandlerId, Handler)>,
    senders: Vec<Sender<f64>>,
}

/// State shared between a [`ConsumerSubject`] and the bus that feeds it.
pub(crate) struct SubjectCore {
    id: SubjectId,
    topic: String,
    precision: u32,
    state: Mutex<SubjectState>,
}

impl SubjectCore {
    pub(crate) fn new(
        id: SubjectId,
        topic: String,
        precision: u32,
        initial: f64,
        emit_on_attach: bool,
    ) -> Self {
        Self {
            id,
            topic,
            precision,
            state: Mutex::new(SubjectState {
                last: initial,
                seen: 0,
                awaiting_first: emit_on_attach,
                attached: true,
                next_handler: 0,
                handlers: Vec::new(),
                senders: Vec::new(),
            }),
        }
    }

    pub(crate) fn id(&self) -> SubjectId {
        self.id
    }

    /// Apply the raw value of publish `seq`. Values older than one already applied
    /// are dropped. Handlers run after the subject lock is released.
    pub(crate) fn offer(&self, raw: f64, seq: u64) {
        let rounded = round_to(raw, self.precision);

        let handlers: Vec<Handler> = {
            let mut state = self.state.lock();
            if !state.attached || seq <= state.seen {
                return;
            }
            state.seen = seq;
            let first = std::mem::replace(&mut state.awaiting_first, false);
            if !first && !is_distinct(rounded, state.last) {
                return;
            }
            state.last = rounded;
            state.senders.retain(|tx| tx.try_send(rounded).is_ok());
            state.handlers.iter().map(|(_, h)| Arc::clone(h)).collect()
        };

        trace!(topic = %self.topic, value = rounded, "subject emitted");
        for handler in handlers {
            handler(rounded);
        }
    }

    fn close(&self) -> bool {
        let mut state = self.state.lock();
        let was_attached = std::mem::replace(&mut state.attached, false);
        state.handlers.clear();
        state.senders.clear();
        was_attached
    }
}

impl fmt::Debug for SubjectCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubjectCore")
            .field("id", &self.id)
            .field("topic", &self.topic)
            .field("precision", &self.precision)
            .finish_non_exhaustive()
    }
}

/// A subscription to one topic at one precision.
///
/// Each subject is an independent filter, even when several subjects watch the same
/// topic. Dropping the subject detaches it from the bus.
#[derive(Debug)]
pub struct ConsumerSubject {
    bus: EventBus,
    core: Arc<SubjectCore>,
}

impl ConsumerSubject {
    pub(crate) fn new(bus: EventBus, core: Arc<SubjectCore>) -> Self {
        Self { bus, core }
    }

    /// Attach to the consumer's topic, starting from `default`.
    ///
    /// The subject emits on attach: if the topic already carries a value, it is applied
    /// immediately, even when it rounds to `default`.
    pub fn create(consumer: TopicConsumer, default: f64) -> Self {
        consumer.subscribe(default)
    }

    /// Value last emitted, or the default if nothing has been emitted yet.
    pub fn get(&self) -> f64 {
        self.core.state.lock().last
    }

    pub fn topic(&self) -> &str {
        &self.core.topic
    }

    /// Decimal places values are rounded to.
    pub fn precision(&self) -> u32 {
        self.core.precision
    }

    pub fn is_attached(&self) -> bool {
        self.core.state.lock().attached
    }

    /// A cloneable handle for reading this subject's value from elsewhere.
    pub fn reader(&self) -> SubjectReader {
        SubjectReader {
            core: Arc::clone(&self.core),
        }
    }

    /// Register `handler` to run on every emission.
    ///
    /// With `notify_now`, the handler is also called once right away with the current
    /// value. Handlers may publish or subscribe on the same bus.
    pub fn sub<F>(&self, handler: F, notify_now: bool) -> HandlerId
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        let handler: Handler = Arc::new(handler);
        let (id, current) = {
            let mut state = self.core.state.lock();
            let id = HandlerId(state.next_handler);
            state.next_handler += 1;
            if state.attached {
                state.handlers.push((id, Arc::clone(&handler)));
            }
            (id, state.last)
        };

        if notify_now {
            handler(current);
        }
        id
    }

    /// Remove a handler. Returns `false` if it was not registered.
    pub fn unsub(&self, id: HandlerId) -> bool {
        let mut state = self.core.state.lock();
        let before = state.handlers.len();
        state.handlers.retain(|(handler_id, _)| *handler_id != id);
        state.handlers.len() != before
    }

    /// Stream of future emissions.
    ///
    /// The stream ends when the subject is detached.
    ///
    /// # Errors
    /// [`AvionixError::Closed`] if the subject is already detached.
    pub fn changes(&self) -> Result<ChangeStream> {
        let mut state = self.core.state.lock();
        if !state.attached {
            return Err(AvionixError::Closed);
        }
        let (tx, rx) = async_channel::unbounded();
        state.senders.push(tx);
        Ok(Box::pin(rx))
    }

    /// Stop receiving publishes. Idempotent.
    ///
    /// The last emitted value stays readable through [`get`](Self::get).
    pub fn detach(&self) {
        if self.core.close() {
            self.bus.remove(&self.core.topic, self.core.id());
            trace!(topic = %self.core.topic, "subject detached");
        }
    }
}

/// Read-only view of a [`ConsumerSubject`]'s current value.
///
/// Outliving the subject is fine; the reader then keeps returning the last value.
#[derive(Debug, Clone)]
pub struct SubjectReader {
    core: Arc<SubjectCore>,
}

impl SubjectReader {
    pub fn get(&self) -> f64 {
        self.core.state.lock().last
    }

    pub fn topic(&self) -> &str {
        &self.core.topic
    }
}

impl Drop for ConsumerSubject {
    fn drop(&mut self) {
        self.detach();
    }
}
