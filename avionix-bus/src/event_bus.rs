// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::builder::{EventPublisher, EventSubscriber};
use crate::consumer_subject::{ConsumerSubject, SubjectCore, SubjectId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Debug, Default)]
struct TopicState {
    raw: Option<f64>,
    /// Sequence number of `raw`; zero before the first publish.
    seq: u64,
    subjects: Vec<Arc<SubjectCore>>,
}

#[derive(Debug, Default)]
struct BusState {
    topics: HashMap<String, TopicState>,
    next_subject: u64,
}

/// Topic-keyed publish/subscribe hub.
///
/// The bus remembers the last raw value published on each topic and fans every
/// publish out to the [`ConsumerSubject`]s attached to that topic. Cheap to clone;
/// clones share the same topics.
///
/// Subject handlers run after the bus lock is released, so a handler may publish or
/// subscribe on the same bus. Every publish is numbered per topic under the lock and
/// subjects ignore values older than the newest one they have seen, so nested or
/// concurrent publishes always leave each subject on the topic's latest value.
///
/// ```
/// use avionix_bus::EventBus;
///
/// let bus = EventBus::new();
/// let fuel = bus.subscribe_with_precision("fuel_total_gal", 1, 0.0);
///
/// bus.publish("fuel_total_gal", 39.987);
/// assert_eq!(fuel.get(), 40.0);
/// assert_eq!(bus.raw_value("fuel_total_gal"), Some(39.987));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    state: Arc<Mutex<BusState>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` as the topic's latest and offer it to every attached subject.
    ///
    /// With no subjects attached the value is only cached.
    pub fn publish(&self, topic: &str, value: f64) {
        let (seq, subjects) = {
            let mut state = self.state.lock();
            let entry = state.topics.entry(topic.to_string()).or_default();
            entry.raw = Some(value);
            entry.seq += 1;
            (entry.seq, entry.subjects.clone())
        };

        trace!(topic, value, seq, subjects = subjects.len(), "publish");
        for subject in subjects {
            subject.offer(value, seq);
        }
    }

    /// Attach a new subject to `topic`.
    ///
    /// The subject starts at `initial`. With `emit_on_attach`, the first value it is
    /// offered is emitted even if it rounds to `initial`; if the topic already carries a
    /// value, that first offer happens before this call returns.
    pub fn subscribe(
        &self,
        topic: &str,
        precision: u32,
        initial: f64,
        emit_on_attach: bool,
    ) -> ConsumerSubject {
        let (core, cached) = {
            let mut state = self.state.lock();
            let id = SubjectId(state.next_subject);
            state.next_subject += 1;

            let core = Arc::new(SubjectCore::new(
                id,
                topic.to_string(),
                precision,
                initial,
                emit_on_attach,
            ));
            let entry = state.topics.entry(topic.to_string()).or_default();
            entry.subjects.push(Arc::clone(&core));
            (core, entry.raw.map(|raw| (raw, entry.seq)))
        };

        debug!(topic, precision, emit_on_attach, "subject attached");
        if emit_on_attach {
            if let Some((raw, seq)) = cached {
                core.offer(raw, seq);
            }
        }
        ConsumerSubject::new(self.clone(), core)
    }

    /// Subscribe with emit-on-attach.
    pub fn subscribe_with_precision(
        &self,
        topic: &str,
        places: u32,
        default: f64,
    ) -> ConsumerSubject {
        self.subscribe(topic, places, default, true)
    }

    pub fn publisher(&self) -> EventPublisher {
        EventPublisher::new(self.clone())
    }

    pub fn subscriber(&self) -> EventSubscriber {
        EventSubscriber::new(self.clone())
    }

    /// The last raw value published on `topic`.
    pub fn raw_value(&self, topic: &str) -> Option<f64> {
        self.state.lock().topics.get(topic).and_then(|t| t.raw)
    }

    /// Number of attached subjects on `topic`.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.state
            .lock()
            .topics
            .get(topic)
            .map_or(0, |t| t.subjects.len())
    }

    /// Every topic that has been published or subscribed to, sorted.
    pub fn topics(&self) -> Vec<String> {
        let mut topics: Vec<String> = self.state.lock().topics.keys().cloned().collect();
        topics.sort();
        topics
    }

    pub(crate) fn remove(&self, topic: &str, id: SubjectId) {
        if let Some(entry) = self.state.lock().topics.get_mut(topic) {
            entry.subjects.retain(|subject| subject.id() != id);
        }
    }
}
