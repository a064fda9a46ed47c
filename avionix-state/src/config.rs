// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The `simvars.json` document and its conversion into variables.
//!
//! ```json
//! {
//!   "intervalMs": 1000,
//!   "variables": [
//!     { "name": "AIRSPEED INDICATED", "unit": "knots", "initial": 110,
//!       "randomWalk": { "min": 60, "max": 160, "step": 1.2 } }
//!   ]
//! }
//! ```
//!
//! A definition without any behaviour field is static.

use crate::variable::{Rule, Variable};
use avionix_core::AvionixError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_INTERVAL_MS: u64 = 1000;

/// Longest accepted tick interval (one day); larger values are clamped.
pub const MAX_INTERVAL_MS: u64 = 86_400_000;

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

fn default_cycle_count() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// State tick interval. Zero means [`DEFAULT_INTERVAL_MS`].
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    pub variables: Vec<VariableConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableConfig {
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub initial: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_walk: Option<RandomWalkConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decrement: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle: Option<CycleConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RandomWalkConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleConfig {
    /// Number of positions; missing or zero means one.
    #[serde(default = "default_cycle_count")]
    pub count: u32,
    #[serde(default)]
    pub probability: f64,
}

impl Configuration {
    /// Built-in configuration used when the document cannot be loaded.
    ///
    /// Covers every variable the gauge panel reads.
    pub fn fallback() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            variables: vec![
                VariableConfig::new("AIRSPEED INDICATED", "knots", 110.0)
                    .with_random_walk(60.0, 160.0, 1.2),
                VariableConfig::new("FUEL TOTAL QUANTITY", "gallons", 40.0)
                    .with_decrement(0.01),
                VariableConfig::new("FUEL TOTAL CAPACITY", "gallons", 50.0),
                VariableConfig::new("FLAPS HANDLE INDEX", "number", 0.0)
                    .with_cycle(4, 0.01),
                VariableConfig::new("TRAILING EDGE FLAPS LEFT PERCENT", "percent", 0.0)
                    .derived_from("FLAPS HANDLE INDEX", Some("(base/3)*100")),
            ],
        }
    }

    /// # Errors
    /// Returns the parse error for malformed or incomplete documents.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// # Errors
    /// Returns the parse error for malformed or incomplete documents.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// The effective tick interval, clamped to [`MAX_INTERVAL_MS`].
    pub fn interval(&self) -> Duration {
        match self.interval_ms {
            0 => Duration::from_millis(DEFAULT_INTERVAL_MS),
            ms => Duration::from_millis(ms.min(MAX_INTERVAL_MS)),
        }
    }

    /// Variables in declaration order.
    pub fn to_variables(&self) -> Vec<Variable> {
        self.variables
            .iter()
            .map(VariableConfig::to_variable)
            .collect()
    }
}

impl VariableConfig {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, initial: f64) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            initial,
            random_walk: None,
            decrement: None,
            cycle: None,
            derived_from: None,
            formula: None,
        }
    }

    pub fn with_random_walk(mut self, min: f64, max: f64, step: f64) -> Self {
        self.random_walk = Some(RandomWalkConfig { min, max, step });
        self
    }

    pub fn with_decrement(mut self, rate: f64) -> Self {
        self.decrement = Some(rate);
        self
    }

    pub fn with_cycle(mut self, count: u32, probability: f64) -> Self {
        self.cycle = Some(CycleConfig { count, probability });
        self
    }

    pub fn derived_from(mut self, source: impl Into<String>, formula: Option<&str>) -> Self {
        self.derived_from = Some(source.into());
        self.formula = formula.map(str::to_string);
        self
    }

    /// Resolve the behaviour fields into a single rule.
    ///
    /// Precedence when several are present: `derivedFrom`, `randomWalk`, `decrement`,
    /// `cycle`. The ignored fields are reported with one warning.
    pub fn to_rule(&self) -> Rule {
        let mut present = Vec::new();
        if self.derived_from.is_some() {
            present.push("derivedFrom");
        }
        if self.random_walk.is_some() {
            present.push("randomWalk");
        }
        if self.decrement.is_some() {
            present.push("decrement");
        }
        if self.cycle.is_some() {
            present.push("cycle");
        }
        if present.len() > 1 {
            warn!(
                variable = %self.name,
                applied = present[0],
                ignored = ?&present[1..],
                "several behaviours configured, only the first applies"
            );
        }

        if let Some(source) = &self.derived_from {
            let rule = Rule::derived(source, self.formula.as_deref());
            if let Rule::Derived {
                formula: Some(formula),
                ..
            } = &rule
            {
                if let Some(reason) = formula.error() {
                    let error = AvionixError::formula(formula.source(), reason);
                    warn!(
                        variable = %self.name,
                        %error,
                        "formula does not compile, the variable will evaluate to 0"
                    );
                }
            }
            return rule;
        }

        if self.formula.is_some() {
            warn!(variable = %self.name, "formula without derivedFrom is ignored");
        }

        if let Some(walk) = self.random_walk {
            Rule::random_walk(walk.min, walk.max, walk.step)
        } else if let Some(rate) = self.decrement {
            Rule::decrement(rate)
        } else if let Some(cycle) = self.cycle {
            Rule::cyclic(cycle.count, cycle.probability)
        } else {
            Rule::Static
        }
    }

    pub fn to_variable(&self) -> Variable {
        Variable::new(&self.name, self.unit.clone(), self.initial, self.to_rule())
    }
}
