// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Avionix
//!
//! State side of an emulated flight-simulator gauge host.
//!
//! ## Overview
//!
//! Two clocks drive the system:
//!
//! - **State tick**: a [`StateEngine`] advances every simulator variable once per
//!   configured interval, following the rules of its [`Configuration`]
//! - **Render tick**: an [`Instrument`] reads the current values and publishes them on
//!   an [`EventBus`], where [`ConsumerSubject`]s surface only the changes that are
//!   visible at their display precision
//!
//! ## Quick Start
//!
//! ```rust
//! use avionix::prelude::*;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let config = ConfigLoader::from_file("simvars.json").load().await;
//! let engine = Arc::new(StateEngine::new(&config));
//! engine.start(TokioTimer);
//!
//! let bus = EventBus::new();
//! let panel = GaugePanel::attach(&bus);
//! let instrument = Instrument::new(bus.clone(), Arc::clone(&engine));
//! instrument.update();
//!
//! assert_eq!(panel.fuel_capacity.get(), 50.0);
//! assert_eq!(panel.fuel_band(), FuelBand::Full);
//! # }
//! ```

pub mod instrument;
pub mod panel;
pub mod topics;

pub use avionix_bus::{
    round_to, ConsumerSubject, EventBus, EventPublisher, EventSubscriber, HandlerId,
    SubjectReader, TopicConsumer,
};
pub use avionix_core::{AvionixError, CancellationToken, Result};
pub use avionix_expr::{evaluate, ExprError, Formula, FormulaInputs};
pub use avionix_runtime::{RepeatingTask, Timer, TokioTimer};
pub use avionix_state::{
    ConfigLoader, ConfigSource, Configuration, Rule, SharedStore, StateEngine, ValueSource,
    VarId, VariableConfig, VariableStore,
};

pub use self::instrument::{Binding, Instrument};
pub use self::panel::{FuelBand, GaugePanel, PanelReadout};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::instrument::Instrument;
    pub use crate::panel::{FuelBand, GaugePanel};
    pub use avionix_bus::{ConsumerSubject, EventBus};
    pub use avionix_runtime::TokioTimer;
    pub use avionix_state::{ConfigLoader, Configuration, StateEngine, ValueSource};
}
