// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Render-clock producer bridging variable state onto the event bus.

use crate::topics;
use avionix_bus::{EventBus, EventPublisher};
use avionix_runtime::{RepeatingTask, Timer};
use avionix_state::ValueSource;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Default render-clock period.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Maps one variable onto one topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub topic: String,
    pub variable: String,
}

impl Binding {
    pub fn new(topic: impl Into<String>, variable: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            variable: variable.into(),
        }
    }
}

/// The gauge panel's bindings.
pub fn panel_bindings() -> Vec<Binding> {
    vec![
        Binding::new(topics::INDICATED_AIRSPEED, "AIRSPEED INDICATED"),
        Binding::new(topics::FUEL_TOTAL_GAL, "FUEL TOTAL QUANTITY"),
        Binding::new(topics::FUEL_TOTAL_CAPACITY, "FUEL TOTAL CAPACITY"),
        Binding::new(topics::FLAPS_INDEX, "FLAPS HANDLE INDEX"),
        Binding::new(topics::FLAPS_PERCENT, "TRAILING EDGE FLAPS LEFT PERCENT"),
    ]
}

/// Reads bound variables and publishes them, once per frame.
///
/// The instrument runs on its own clock, independent of the state tick; each frame
/// publishes whatever values the source currently holds, so published values may
/// lag the state by up to one state interval.
///
/// ```rust
/// use avionix::instrument::Instrument;
/// use avionix_bus::EventBus;
/// use avionix_state::{Configuration, StateEngine};
/// use std::sync::Arc;
///
/// let bus = EventBus::new();
/// let engine = Arc::new(StateEngine::new(&Configuration::fallback()));
/// let instrument = Instrument::new(bus.clone(), engine);
///
/// instrument.update();
/// assert_eq!(bus.raw_value("fuel_total_capacity"), Some(50.0));
/// ```
pub struct Instrument<S: ValueSource + 'static> {
    inner: Arc<Frame<S>>,
    task: Mutex<Option<RepeatingTask>>,
}

struct Frame<S> {
    publisher: EventPublisher,
    source: Arc<S>,
    bindings: Vec<Binding>,
}

impl<S: ValueSource> Frame<S> {
    fn publish(&self) {
        for binding in &self.bindings {
            let value = self.source.get_value(&binding.variable);
            self.publisher.publish(&binding.topic, value);
        }
    }
}

impl<S: ValueSource + 'static> Instrument<S> {
    /// Instrument publishing the gauge panel's five topics.
    pub fn new(bus: EventBus, source: Arc<S>) -> Self {
        Self::with_bindings(bus, source, panel_bindings())
    }

    pub fn with_bindings(bus: EventBus, source: Arc<S>, bindings: Vec<Binding>) -> Self {
        Self {
            inner: Arc::new(Frame {
                publisher: bus.publisher(),
                source,
                bindings,
            }),
            task: Mutex::new(None),
        }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.inner.bindings
    }

    /// Publish every binding once.
    pub fn update(&self) {
        self.inner.publish();
    }

    /// Publish on `timer` every `frame`. Returns `false` if already running.
    ///
    /// Requires a running Tokio runtime.
    pub fn start<T: Timer>(&self, timer: T, frame: Duration) -> bool {
        let mut task = self.task.lock();
        if task.is_some() {
            return false;
        }

        let inner = Arc::clone(&self.inner);
        *task = Some(RepeatingTask::spawn(timer, frame, move || inner.publish()));
        info!(
            frame_ms = frame.as_millis() as u64,
            topics = self.inner.bindings.len(),
            "instrument started"
        );
        true
    }

    /// Stop publishing. Returns `true` if the instrument was running.
    pub fn stop(&self) -> bool {
        let stopped = self.task.lock().take().map(|task| task.cancel()).is_some();
        if stopped {
            debug!("instrument stopped");
        }
        stopped
    }

    pub fn is_running(&self) -> bool {
        self.task.lock().is_some()
    }
}

impl<S: ValueSource + 'static> std::fmt::Debug for Instrument<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instrument")
            .field("bindings", &self.inner.bindings)
            .field("running", &self.is_running())
            .finish()
    }
}

impl<S: ValueSource + 'static> Drop for Instrument<S> {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.cancel();
        }
    }
}
