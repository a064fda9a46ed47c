// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Fluent publish/subscribe handles.

use crate::consumer_subject::ConsumerSubject;
use crate::event_bus::EventBus;
use crate::rounding::MAX_PRECISION;

/// Publishing side of an [`EventBus`].
#[derive(Debug, Clone)]
pub struct EventPublisher {
    bus: EventBus,
}

impl EventPublisher {
    pub(crate) fn new(bus: EventBus) -> Self {
        Self { bus }
    }

    pub fn publish(&self, topic: &str, value: f64) {
        self.bus.publish(topic, value);
    }
}

/// Subscribing side of an [`EventBus`].
#[derive(Debug, Clone)]
pub struct EventSubscriber {
    bus: EventBus,
}

impl EventSubscriber {
    pub(crate) fn new(bus: EventBus) -> Self {
        Self { bus }
    }

    /// Describe a consumer of `topic`; values are not rounded unless
    /// [`with_precision`](TopicConsumer::with_precision) is applied.
    pub fn on(&self, topic: impl Into<String>) -> TopicConsumer {
        TopicConsumer {
            bus: self.bus.clone(),
            topic: topic.into(),
            precision: MAX_PRECISION,
        }
    }
}

/// A topic plus a precision, ready to become a [`ConsumerSubject`].
#[derive(Debug, Clone)]
pub struct TopicConsumer {
    bus: EventBus,
    topic: String,
    precision: u32,
}

impl TopicConsumer {
    #[must_use]
    pub fn with_precision(mut self, places: u32) -> Self {
        self.precision = places;
        self
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub(crate) fn subscribe(self, default: f64) -> ConsumerSubject {
        self.bus
            .subscribe_with_precision(&self.topic, self.precision, default)
    }
}
