// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Event distribution for instrument telemetry.
//!
//! Producers publish raw `f64` values keyed by topic on an [`EventBus`]; consumers
//! attach [`ConsumerSubject`]s that round each value to a fixed number of decimal
//! places and only surface values that are distinct after rounding.
//!
//! ```
//! use avionix_bus::EventBus;
//!
//! let bus = EventBus::new();
//! let airspeed = bus.subscribe_with_precision("indicated_airspeed", 0, 0.0);
//!
//! let mut emitted = Vec::new();
//! for raw in [10.01, 10.04, 10.6] {
//!     bus.publish("indicated_airspeed", raw);
//!     emitted.push(airspeed.get());
//! }
//! assert_eq!(emitted, vec![10.0, 10.0, 11.0]);
//! ```

mod builder;
pub mod consumer_subject;
mod event_bus;
mod rounding;

pub use self::builder::{EventPublisher, EventSubscriber, TopicConsumer};
pub use self::consumer_subject::{ChangeStream, ConsumerSubject, HandlerId, SubjectReader};
pub use self::event_bus::EventBus;
pub use self::rounding::{round_to, MAX_PRECISION};
