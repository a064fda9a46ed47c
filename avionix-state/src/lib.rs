// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Simulator variable state driven by a declarative configuration.
//!
//! A [`ConfigLoader`] resolves a [`Configuration`] (falling back to a built-in one when
//! the document is unavailable), a [`StateEngine`] seeds a [`VariableStore`] from it and
//! then advances every variable once per tick according to its [`Rule`].
//!
//! ```
//! use avionix_state::{Configuration, StateEngine};
//!
//! let engine = StateEngine::new(&Configuration::fallback());
//! engine.tick();
//!
//! let fuel = engine.get_value("fuel total quantity");
//! assert!((fuel - 39.99).abs() < 1e-9);
//! ```

pub mod config;
pub mod engine;
pub mod loader;
pub mod store;
pub mod variable;

pub use self::config::{Configuration, CycleConfig, RandomWalkConfig, VariableConfig};
pub use self::engine::StateEngine;
pub use self::loader::{ConfigError, ConfigFormat, ConfigLoader, ConfigSource};
pub use self::store::{SharedStore, ValueSource, VarId, VariableStore};
pub use self::variable::{normalize_key, Rule, Variable};
