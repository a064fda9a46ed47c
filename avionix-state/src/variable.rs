// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use avionix_expr::LenientFormula;

/// Store key for a variable name. Names are case-insensitive.
pub fn normalize_key(name: &str) -> String {
    name.to_uppercase()
}

/// How a variable evolves on each tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Never changes on its own.
    Static,
    /// Adds a uniform delta in `[-step, +step]`, clamped to `[min, max]`.
    RandomWalk { min: f64, max: f64, step: f64 },
    /// Subtracts `rate`, never going below zero.
    Decrement { rate: f64 },
    /// With `probability` per tick, steps to `(value + 1) mod count`.
    Cyclic { count: u32, probability: f64 },
    /// Computed from another variable, either through `formula` or as a direct mirror.
    Derived {
        source: String,
        formula: Option<LenientFormula>,
    },
}

impl Rule {
    /// Random walk with normalised bounds: `min <= max` and a non-negative step.
    pub fn random_walk(min: f64, max: f64, step: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self::RandomWalk {
            min,
            max,
            step: if step.is_nan() { 0.0 } else { step.abs() },
        }
    }

    pub fn decrement(rate: f64) -> Self {
        Self::Decrement { rate: rate.abs() }
    }

    /// Cyclic stepping; a zero `count` is treated as one and `probability` is clamped
    /// to `[0, 1]`.
    pub fn cyclic(count: u32, probability: f64) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self::Cyclic {
            count: count.max(1),
            probability,
        }
    }

    pub fn derived(source: &str, formula: Option<&str>) -> Self {
        Self::Derived {
            source: normalize_key(source),
            formula: formula.map(LenientFormula::new),
        }
    }

    pub fn is_derived(&self) -> bool {
        matches!(self, Self::Derived { .. })
    }

    /// The source key of a derived rule.
    pub fn source(&self) -> Option<&str> {
        match self {
            Self::Derived { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::RandomWalk { .. } => "randomWalk",
            Self::Decrement { .. } => "decrement",
            Self::Cyclic { .. } => "cycle",
            Self::Derived { .. } => "derived",
        }
    }
}

/// A named simulator variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    key: String,
    unit: String,
    value: f64,
    rule: Rule,
}

impl Variable {
    pub fn new(name: &str, unit: impl Into<String>, initial: f64, rule: Rule) -> Self {
        Self {
            key: normalize_key(name),
            unit: unit.into(),
            value: initial,
            rule,
        }
    }

    pub fn fixed(name: &str, unit: impl Into<String>, initial: f64) -> Self {
        Self::new(name, unit, initial, Rule::Static)
    }

    /// The upper-cased name.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub(crate) fn set_value(&mut self, value: f64) {
        self.value = value;
    }
}
